//! Structural mutation commands.
//!
//! Every user edit is one explicit command applied synchronously to the
//! tree: validate, mutate, done. There is no debouncing or coalescing in the
//! core and no history; the shell re-projects cells immediately after each
//! successful apply and hands exported documents to its own undo stack.

use crate::el::{ElKind, ElTree, NodeId, Properties};
use crate::error::EditError;

/// One structural edit. Creation commands insert the minimal default
/// subtree for the kind, the same shape the "add node" palette produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AppendChild {
        parent: NodeId,
        kind: ElKind,
        id: Option<String>,
    },
    InsertChild {
        parent: NodeId,
        index: usize,
        kind: ElKind,
        id: Option<String>,
    },
    RemoveNode {
        node: NodeId,
    },
    RenameNode {
        node: NodeId,
        id: String,
    },
    SetProperties {
        node: NodeId,
        properties: Properties,
    },
    SetCollapsed {
        node: NodeId,
        collapsed: bool,
    },
    ReplaceCondition {
        parent: NodeId,
        kind: ElKind,
        id: Option<String>,
    },
}

impl ElTree {
    /// Applies one command atomically. Creation commands return the created
    /// node's id; a failed command leaves the tree untouched.
    pub fn apply(&mut self, command: Command) -> Result<Option<NodeId>, EditError> {
        match command {
            Command::AppendChild { parent, kind, id } => {
                self.append_child(parent, kind, id).map(Some)
            }
            Command::InsertChild {
                parent,
                index,
                kind,
                id,
            } => self.insert_child(parent, index, kind, id).map(Some),
            Command::RemoveNode { node } => self.remove_node(node).map(|()| None),
            Command::RenameNode { node, id } => self.rename(node, id).map(|()| None),
            Command::SetProperties { node, properties } => {
                self.set_properties(node, properties);
                Ok(None)
            }
            Command::SetCollapsed { node, collapsed } => {
                self.set_collapsed(node, collapsed);
                Ok(None)
            }
            Command::ReplaceCondition { parent, kind, id } => {
                self.replace_condition(parent, kind, id).map(Some)
            }
        }
    }
}
