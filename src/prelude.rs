//! Prelude module for convenient imports
//!
//! Re-exports the core surface of the crate: the tree and its kinds, the
//! JSON document type, commands, projections, inference and reconciliation.
//!
//! # Example
//!
//! ```rust,no_run
//! use rensa::prelude::*;
//!
//! # fn run_example() -> Result<(), Box<dyn std::error::Error>> {
//! let text = std::fs::read_to_string("path/to/chain.json")?;
//! let mut tree = ElTree::from_json(&text)?;
//!
//! let graph = tree.to_cells();
//! println!("{} ({} cells)", tree.to_el(), graph.cells.len());
//! # Ok(())
//! # }
//! ```

pub use crate::builder::ElJsonNode;
pub use crate::command::Command;
pub use crate::el::{ElKind, ElNode, ElTree, LeafKind, NodeId, Properties};
pub use crate::error::{EditError, ParseError};
pub use crate::graph::{CellGraph, CellId, GraphCell, GraphEdge, MarkerRole};
pub use crate::infer::ScriptContract;
pub use crate::registry::{NodeTypeRegistry, ReconcileIssue, RegisteredNode, reconcile_chains};
