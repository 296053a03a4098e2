//! # Rensa - Chain-Flow Expression Model and Projection Engine
//!
//! **Rensa** models the recursive "chain" structure used by rule-engine
//! runtimes and keeps one typed tree as the single source of truth behind
//! three projections: a JSON document, a human-readable EL expression
//! string, and a renderable graph of cells. On top of the tree it provides
//! structural type inference, deriving from a script node's position the
//! execution contract the backing script must satisfy.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse a chain JSON document into an [`ElTree`](el::ElTree)
//!     with [`ElTree::from_json`](el::ElTree::from_json). Parsing validates
//!     the full shape; you never receive a partially built tree.
//! 2.  **Edit**: Apply [`Command`](command::Command) values to the tree. Each
//!     command is one synchronous, atomic edit; failures leave the tree
//!     untouched.
//! 3.  **Project**: Regenerate the cell graph with
//!     [`ElTree::to_cells`](el::ElTree::to_cells) and the expression string
//!     with [`ElTree::to_el`](el::ElTree::to_el) after every edit. The cells
//!     are never the authority, the tree is.
//! 4.  **Save**: Reconcile inferred script contracts against the node-type
//!     registry supplied by the persistence layer, then export back to JSON
//!     with [`ElTree::to_json`](el::ElTree::to_json).
//!
//! ## Quick Start
//!
//! ```rust
//! use rensa::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tree = ElTree::from_json(
//!         r#"{
//!             "type": "IF",
//!             "condition": { "type": "NodeBooleanComponent", "id": "x" },
//!             "children": [{ "type": "NodeComponent", "id": "a" }]
//!         }"#,
//!     )?;
//!
//!     assert_eq!(tree.to_el(), "IF(x).then(a)");
//!
//!     let cond = tree.find_by_id("x").unwrap();
//!     assert_eq!(tree.infer_contract(cond), ScriptContract::BooleanScript);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod command;
pub mod el;
pub mod error;
pub mod expression;
pub mod graph;
pub mod infer;
pub mod prelude;
pub mod registry;
