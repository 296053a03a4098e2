//! Structural type inference.
//!
//! Derives, purely from a node's position in the tree, the execution
//! contract its backing script must satisfy. The classification is total:
//! it never fails, and a node with no decision-bearing ancestor gets the
//! default contract.

use crate::el::{ElKind, ElTree, NodeId};
use crate::registry::NodeTypeRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The required return semantics of a script node, keyed by structural
/// position: free-form, boolean decision, branch selector or loop count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptContract {
    Script,
    BooleanScript,
    SwitchScript,
    ForScript,
}

impl ScriptContract {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptContract::Script => "script",
            ScriptContract::BooleanScript => "boolean_script",
            ScriptContract::SwitchScript => "switch_script",
            ScriptContract::ForScript => "for_script",
        }
    }
}

impl fmt::Display for ScriptContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract imposed on the occupant of `kind`'s condition slot.
///
/// CATCH's slot holds the protected flow, not a decision input, so it maps
/// to the default contract.
fn condition_contract(kind: ElKind) -> ScriptContract {
    match kind {
        ElKind::If | ElKind::While => ScriptContract::BooleanScript,
        ElKind::Switch => ScriptContract::SwitchScript,
        ElKind::For | ElKind::Iterator => ScriptContract::ForScript,
        _ => ScriptContract::Script,
    }
}

impl ElTree {
    /// Classifies `node` by walking parent pointers.
    ///
    /// A node in its parent's condition slot takes the contract that slot
    /// imposes. A node under a logical combinator inherits the combinator's
    /// own classification, repeated upward until a decision-bearing ancestor
    /// or the root. Everything else is the default contract.
    ///
    /// Depends only on the path from `node` to the root, so moving an
    /// unrelated sibling never changes the result.
    pub fn infer_contract(&self, node: NodeId) -> ScriptContract {
        let mut current = node;
        loop {
            let Some(parent) = self.node(current).parent() else {
                return ScriptContract::Script;
            };
            if self.node(parent).condition() == Some(current) {
                return condition_contract(self.node(parent).kind);
            }
            if self.node(parent).kind.is_combinator() {
                current = parent;
                continue;
            }
            return ScriptContract::Script;
        }
    }

    /// The contract to enforce for `node`: the registry's authoritative type
    /// when the persistence layer registered one, the local inference
    /// otherwise.
    pub fn effective_contract(
        &self,
        node: NodeId,
        registry: &NodeTypeRegistry,
    ) -> ScriptContract {
        let registered = self
            .node(node)
            .id
            .as_deref()
            .and_then(|id| registry.get(id))
            .map(|entry| entry.node_type);
        registered.unwrap_or_else(|| self.infer_contract(node))
    }
}
