//! EL expression serialization.
//!
//! A pure projection from a subtree to the textual EL syntax, e.g.
//! `THEN(a,b,c)` or `IF(AND(x,y)).then(a).else(b)`. The compact form uses no
//! whitespace; the pretty form indents one child per line the way the
//! editor's expression preview does. Output is deterministic: the property
//! suffix order is fixed and identifiers are quoted only when they contain
//! syntax-significant characters.

use crate::el::{ElKind, ElTree, NodeId, Properties};
use itertools::Itertools;
use std::borrow::Cow;

const INDENT: &str = "  ";

impl ElTree {
    /// Serializes the whole tree to the compact EL form.
    pub fn to_el(&self) -> String {
        self.el_for(self.root())
    }

    /// Serializes the whole tree to the indented multi-line EL form.
    pub fn to_el_pretty(&self) -> String {
        render(self, self.root(), Some(0))
    }

    /// Serializes the subtree rooted at `node` to the compact EL form.
    pub fn el_for(&self, node: NodeId) -> String {
        render(self, node, None)
    }
}

/// `depth` is `None` for the compact form, `Some(level)` for the pretty form.
fn render(tree: &ElTree, id: NodeId, depth: Option<usize>) -> String {
    let node = tree.node(id);
    let suffix = properties_suffix(&node.properties);
    match node.kind {
        ElKind::Leaf(_) | ElKind::Chain => {
            let raw = node.id.as_deref().unwrap_or("");
            format!("{}{}", escape_id(raw), suffix)
        }
        ElKind::Then | ElKind::When | ElKind::And | ElKind::Or | ElKind::Not => {
            let head = node.kind.type_str();
            format!(
                "{head}({}){suffix}",
                render_list(tree, node.children(), depth)
            )
        }
        ElKind::Switch => {
            let condition = render_condition(tree, id);
            format!(
                "SWITCH({condition}).to({}){suffix}",
                render_list(tree, node.children(), depth)
            )
        }
        ElKind::If => {
            let condition = render_condition(tree, id);
            let then_branch = match node.children().first() {
                Some(&branch) => render_list(tree, &[branch], depth),
                None => String::new(),
            };
            let mut out = format!("IF({condition}).then({then_branch})");
            if let Some(&alt) = node.children().get(1) {
                out.push_str(&format!(".else({})", render_list(tree, &[alt], depth)));
            }
            out.push_str(&suffix);
            out
        }
        ElKind::For | ElKind::While | ElKind::Iterator | ElKind::Catch => {
            let head = node.kind.type_str();
            let condition = render_condition(tree, id);
            format!(
                "{head}({condition}).do({}){suffix}",
                render_list(tree, node.children(), depth)
            )
        }
    }
}

// Condition subtrees stay on one line even in pretty mode; only child
// lists are broken across lines.
fn render_condition(tree: &ElTree, id: NodeId) -> String {
    match tree.node(id).condition() {
        Some(condition) => render(tree, condition, None),
        None => String::new(),
    }
}

fn render_list(tree: &ElTree, children: &[NodeId], depth: Option<usize>) -> String {
    match depth {
        None => children.iter().map(|&c| render(tree, c, None)).join(","),
        Some(level) => {
            if children.is_empty() {
                return String::new();
            }
            let inner = level + 1;
            let pad = INDENT.repeat(inner);
            let body = children
                .iter()
                .map(|&c| format!("{pad}{}", render(tree, c, Some(inner))))
                .join(",\n");
            format!("\n{body}\n{}", INDENT.repeat(level))
        }
    }
}

/// Renders the fixed-order property suffix: `.id("…")`, `.tag("…")`,
/// `.data("…")`, `.maxWaitSeconds(n)`.
fn properties_suffix(properties: &Properties) -> String {
    let mut out = String::new();
    if let Some(id) = &properties.id {
        out.push_str(&format!(".id({})", quote(id)));
    }
    if let Some(tag) = &properties.tag {
        out.push_str(&format!(".tag({})", quote(tag)));
    }
    if let Some(data) = &properties.data {
        out.push_str(&format!(".data({})", quote(data)));
    }
    if let Some(seconds) = properties.max_wait_seconds {
        out.push_str(&format!(".maxWaitSeconds({seconds})"));
    }
    out
}

fn quote(raw: &str) -> String {
    let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Identifiers pass through bare unless they contain syntax-significant
/// characters (parentheses, commas, quotes, whitespace) or are empty.
fn escape_id(raw: &str) -> Cow<'_, str> {
    let needs_quotes = raw.is_empty()
        || raw
            .chars()
            .any(|c| matches!(c, '(' | ')' | ',' | '"' | '\'' | '.') || c.is_whitespace());
    if needs_quotes {
        Cow::Owned(quote(raw))
    } else {
        Cow::Borrowed(raw)
    }
}
