//! JSON document ↔ tree conversion.
//!
//! The wire format is the recursive chain document exchanged with the
//! persistence layer: `{ id?, type, properties?, condition?, children?,
//! collapsed? }`. Building validates the full shape before any node becomes
//! visible; a failed build never yields a partial tree.

use crate::el::{ElKind, ElTree, NodeId, Properties};
use crate::error::ParseError;
use serde::{Deserialize, Serialize};

/// One node of the persisted chain document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElJsonNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Box<ElJsonNode>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElJsonNode>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub collapsed: bool,
}

impl ElTree {
    /// Builds a tree from chain JSON text.
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        let doc: ElJsonNode =
            serde_json::from_str(text).map_err(|e| ParseError::Json(e.to_string()))?;
        Self::from_document(&doc)
    }

    /// Builds a tree from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ParseError> {
        let doc: ElJsonNode =
            serde_json::from_value(value).map_err(|e| ParseError::Json(e.to_string()))?;
        Self::from_document(&doc)
    }

    /// Builds a tree from a chain document by recursive descent.
    ///
    /// Each node's `type` is resolved against the fixed kind table and its
    /// kind-specific shape is validated before descending, so parent
    /// back-references are wired as children are constructed and are valid
    /// at every point of the build.
    pub fn from_document(doc: &ElJsonNode) -> Result<Self, ParseError> {
        let kind = resolve_kind(doc, "$")?;
        validate_shape(doc, kind, "$")?;
        let mut tree = ElTree::new_with(kind, doc.id.clone());
        let root = tree.root();
        apply_presentation(&mut tree, root, doc);
        build_slots(&mut tree, root, doc, "$")?;
        Ok(tree)
    }

    /// Exports the tree back into a chain document.
    pub fn to_document(&self) -> ElJsonNode {
        self.export(self.root())
    }

    /// Exports the tree as pretty-printed chain JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_document())
    }

    fn export(&self, id: NodeId) -> ElJsonNode {
        let node = self.node(id);
        ElJsonNode {
            id: node.id.clone(),
            node_type: node.kind.type_str().to_string(),
            properties: if node.properties.is_empty() {
                None
            } else {
                Some(node.properties.clone())
            },
            condition: node.condition().map(|c| Box::new(self.export(c))),
            children: node.children().iter().map(|&c| self.export(c)).collect(),
            collapsed: node.collapsed,
        }
    }
}

fn resolve_kind(doc: &ElJsonNode, path: &str) -> Result<ElKind, ParseError> {
    ElKind::from_type(&doc.node_type).ok_or_else(|| ParseError::UnknownKind {
        path: path.to_string(),
        type_name: doc.node_type.clone(),
    })
}

fn validate_shape(doc: &ElJsonNode, kind: ElKind, path: &str) -> Result<(), ParseError> {
    let at = || path.to_string();

    if kind.requires_condition() && doc.condition.is_none() {
        return Err(ParseError::MissingCondition { path: at(), kind });
    }
    if !kind.requires_condition() && doc.condition.is_some() {
        return Err(ParseError::UnexpectedCondition { path: at(), kind });
    }
    if kind.requires_id() && doc.id.as_deref().unwrap_or("").is_empty() {
        return Err(ParseError::MissingId { path: at(), kind });
    }
    match kind {
        ElKind::Leaf(_) if !doc.children.is_empty() => {
            Err(ParseError::UnexpectedChildren { path: at(), kind })
        }
        ElKind::And | ElKind::Or if doc.children.is_empty() => {
            Err(ParseError::MissingChildren { path: at(), kind })
        }
        ElKind::Not if doc.children.len() != 1 => Err(ParseError::NotArity {
            path: at(),
            count: doc.children.len(),
        }),
        ElKind::If if doc.children.is_empty() || doc.children.len() > 2 => {
            Err(ParseError::IfArity {
                path: at(),
                count: doc.children.len(),
            })
        }
        _ => Ok(()),
    }
}

fn apply_presentation(tree: &mut ElTree, node: NodeId, doc: &ElJsonNode) {
    if let Some(properties) = &doc.properties {
        tree.set_properties(node, properties.clone());
    }
    tree.set_collapsed(node, doc.collapsed);
}

/// Builds `doc`'s condition and children under the already-allocated `node`.
fn build_slots(
    tree: &mut ElTree,
    node: NodeId,
    doc: &ElJsonNode,
    path: &str,
) -> Result<(), ParseError> {
    if let Some(condition) = &doc.condition {
        let child_path = format!("{path}.condition");
        let child = build_node(tree, node, condition, &child_path)?;
        tree.link_condition(node, child);
    }
    for (i, child_doc) in doc.children.iter().enumerate() {
        let child_path = format!("{path}.children[{i}]");
        let child = build_node(tree, node, child_doc, &child_path)?;
        tree.link_child(node, child);
    }
    Ok(())
}

fn build_node(
    tree: &mut ElTree,
    parent: NodeId,
    doc: &ElJsonNode,
    path: &str,
) -> Result<NodeId, ParseError> {
    let kind = resolve_kind(doc, path)?;
    validate_shape(doc, kind, path)?;
    let node = tree.alloc(Some(parent), kind, doc.id.clone());
    apply_presentation(tree, node, doc);
    build_slots(tree, node, doc, path)?;
    Ok(node)
}
