//! Node-type registry and save-time reconciliation.
//!
//! The persistence layer registers each reusable node id with an
//! authoritative script type. Before a save, local structural inference is
//! reconciled against the registry; disagreements are user-facing
//! validation messages that block the save, not errors.

use crate::el::ElTree;
use crate::infer::ScriptContract;
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One registry entry, as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredNode {
    pub node_type: ScriptContract,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub is_script_node: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liteflow_node_type: Option<String>,
}

/// Mapping from node id to its registered type.
#[derive(Debug, Clone, Default)]
pub struct NodeTypeRegistry {
    entries: AHashMap<String, RegisteredNode>,
}

/// Wire shapes the registry endpoint may answer with: a map keyed by node
/// id, or a list of rows carrying a `nodeId` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryDoc {
    Map(AHashMap<String, RegisteredNode>),
    List(Vec<RegistryRow>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryRow {
    node_id: String,
    #[serde(flatten)]
    entry: RegisteredNode,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let doc: RegistryDoc = serde_json::from_str(text)?;
        let entries = match doc {
            RegistryDoc::Map(map) => map,
            RegistryDoc::List(rows) => rows
                .into_iter()
                .map(|row| (row.node_id, row.entry))
                .collect(),
        };
        Ok(Self { entries })
    }

    pub fn insert(&mut self, node_id: impl Into<String>, entry: RegisteredNode) {
        self.entries.insert(node_id.into(), entry);
    }

    pub fn get(&self, node_id: &str) -> Option<&RegisteredNode> {
        self.entries.get(node_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A user-facing reconciliation finding. These gate the save operation until
/// the user renames the node or accepts the registered type; they are data,
/// not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileIssue {
    /// Local inference disagrees with the registered authoritative type.
    Mismatch {
        node_id: String,
        inferred: ScriptContract,
        registered: ScriptContract,
    },
    /// The same node id is used with incompatible structural roles across
    /// chains; the user must disambiguate.
    Conflict {
        node_id: String,
        usages: Vec<(String, ScriptContract)>,
    },
}

impl fmt::Display for ReconcileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileIssue::Mismatch {
                node_id,
                inferred,
                registered,
            } => write!(
                f,
                "node '{node_id}' is registered as {registered} but its position requires \
                 {inferred}; rename the node or accept the registered type"
            ),
            ReconcileIssue::Conflict { node_id, usages } => {
                let usages = usages
                    .iter()
                    .map(|(chain, contract)| format!("{contract} in chain '{chain}'"))
                    .join(", ");
                write!(
                    f,
                    "node '{node_id}' is used with incompatible contracts: {usages}"
                )
            }
        }
    }
}

impl ElTree {
    /// Reconciles every script-backed leaf against the registry. An empty
    /// result means the save may proceed.
    pub fn reconcile(&self, registry: &NodeTypeRegistry) -> Vec<ReconcileIssue> {
        let mut issues = Vec::new();
        for leaf in self.flatten_leaves() {
            let Some(node_id) = self.node(leaf).id.as_deref() else {
                continue;
            };
            let Some(entry) = registry.get(node_id) else {
                continue;
            };
            if !entry.is_script_node {
                continue;
            }
            let inferred = self.infer_contract(leaf);
            if inferred != entry.node_type {
                issues.push(ReconcileIssue::Mismatch {
                    node_id: node_id.to_string(),
                    inferred,
                    registered: entry.node_type,
                });
            }
        }
        issues
    }
}

/// Detects node ids used with incompatible structural roles across several
/// chains. `chains` pairs a chain id with its tree.
pub fn reconcile_chains(chains: &[(&str, &ElTree)]) -> Vec<ReconcileIssue> {
    let mut usages: AHashMap<String, Vec<(String, ScriptContract)>> = AHashMap::new();
    for (chain_id, tree) in chains {
        for leaf in tree.flatten_leaves() {
            let Some(node_id) = tree.node(leaf).id.clone() else {
                continue;
            };
            usages
                .entry(node_id)
                .or_default()
                .push((chain_id.to_string(), tree.infer_contract(leaf)));
        }
    }

    usages
        .into_iter()
        .filter(|(_, usages)| usages.iter().map(|(_, c)| c).unique().count() > 1)
        .map(|(node_id, usages)| ReconcileIssue::Conflict { node_id, usages })
        .sorted_by(|a, b| issue_id(a).cmp(issue_id(b)))
        .collect()
}

fn issue_id(issue: &ReconcileIssue) -> &str {
    match issue {
        ReconcileIssue::Mismatch { node_id, .. } | ReconcileIssue::Conflict { node_id, .. } => {
            node_id
        }
    }
}
