use crate::el::ElKind;
use thiserror::Error;

/// Errors raised while building an [`ElTree`](crate::el::ElTree) from a JSON
/// document. Every variant carries the `$`-rooted path of the offending node
/// (for example `$.children[2].condition`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("failed to parse chain JSON: {0}")]
    Json(String),

    #[error("unknown node type '{type_name}' at {path}")]
    UnknownKind { path: String, type_name: String },

    #[error("{kind} at {path} requires a condition")]
    MissingCondition { path: String, kind: ElKind },

    #[error("{kind} at {path} does not take a condition")]
    UnexpectedCondition { path: String, kind: ElKind },

    #[error("{kind} at {path} requires at least one child")]
    MissingChildren { path: String, kind: ElKind },

    #[error("NOT at {path} takes exactly one child, found {count}")]
    NotArity { path: String, count: usize },

    #[error("IF at {path} takes one or two children, found {count}")]
    IfArity { path: String, count: usize },

    #[error("{kind} at {path} requires an id")]
    MissingId { path: String, kind: ElKind },

    #[error("{kind} at {path} does not take children")]
    UnexpectedChildren { path: String, kind: ElKind },
}

/// Errors raised by structural mutation commands. A failed command leaves the
/// tree exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("a {kind} node cannot take children")]
    LeafChildren { kind: ElKind },

    #[error("the chain root cannot be removed")]
    RemoveRoot,

    #[error("a condition slot cannot be removed; replace it instead")]
    RemoveCondition,

    #[error("{kind} requires at least one child")]
    UnderMinimumChildren { kind: ElKind },

    #[error("{kind} takes at most {limit} children")]
    ChildLimit { kind: ElKind, limit: usize },

    #[error("child index {index} is out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("{kind} does not take a condition")]
    NoConditionSlot { kind: ElKind },

    #[error("node id cannot be empty")]
    EmptyId,
}
