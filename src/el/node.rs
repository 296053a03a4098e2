use crate::el::{ElKind, LeafKind, Properties};
use crate::error::EditError;
use crate::graph::CellId;

/// Index of a node inside its [`ElTree`] arena.
///
/// A `NodeId` is only meaningful for the tree that produced it. Ids of
/// removed nodes go stale but are never reissued for the lifetime of the
/// tree; the arena is rebuilt wholesale when a new chain is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of the chain tree: a leaf component or an operator.
///
/// Structural links (parent, children, condition) are indices into the
/// owning [`ElTree`] and can only be changed through the tree's mutation
/// methods, which uphold the tree invariants.
#[derive(Debug, Clone)]
pub struct ElNode {
    pub kind: ElKind,
    pub id: Option<String>,
    pub properties: Properties,
    pub collapsed: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) condition: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) start_cell: Option<CellId>,
    pub(crate) end_cell: Option<CellId>,
}

impl ElNode {
    fn new(kind: ElKind, id: Option<String>) -> Self {
        Self {
            kind,
            id,
            properties: Properties::default(),
            collapsed: false,
            parent: None,
            condition: None,
            children: Vec::new(),
            start_cell: None,
            end_cell: None,
        }
    }

    /// Non-owning back-reference to the enclosing node; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The decision slot; populated iff [`ElKind::requires_condition`].
    pub fn condition(&self) -> Option<NodeId> {
        self.condition
    }

    /// Ordered children; the order determines execution and branch order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Start cell id recorded by the most recent projection.
    pub fn start_cell(&self) -> Option<CellId> {
        self.start_cell
    }

    /// End cell id recorded by the most recent projection. For leaves this
    /// equals the start cell.
    pub fn end_cell(&self) -> Option<CellId> {
        self.end_cell
    }
}

/// An arena-backed chain tree: the single source of truth behind the JSON,
/// expression and cell projections.
///
/// The tree is created wholesale by the builder (`from_json`) or through the
/// [`ElTree::create`] factory, then edited through structural mutation
/// methods that preserve the tree invariants. Every mutation either succeeds
/// completely or leaves the tree untouched.
#[derive(Debug, Clone)]
pub struct ElTree {
    nodes: Vec<ElNode>,
    root: NodeId,
    placeholder_seq: u32,
}

impl ElTree {
    /// Creates a new tree whose root is the minimal default subtree for
    /// `kind` (the "add node" factory: operators come with placeholder
    /// condition leaves and children so the invariants hold from the start).
    pub fn create(kind: ElKind) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            placeholder_seq: 0,
        };
        let root = tree.build_default(None, kind, None);
        tree.root = root;
        tree
    }

    pub(crate) fn new_with(kind: ElKind, id: Option<String>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            placeholder_seq: 0,
        };
        let root = tree.alloc(None, kind, id);
        tree.root = root;
        tree
    }

    pub(crate) fn alloc(
        &mut self,
        parent: Option<NodeId>,
        kind: ElKind,
        id: Option<String>,
    ) -> NodeId {
        let slot = NodeId(self.nodes.len() as u32);
        let mut node = ElNode::new(kind, id);
        node.parent = parent;
        self.nodes.push(node);
        slot
    }

    pub(crate) fn link_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(parent).children.push(child);
    }

    pub(crate) fn link_condition(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(parent).condition = Some(child);
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrows a node. Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &ElNode {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut ElNode {
        &mut self.nodes[id.index()]
    }

    /// Flattened, order-preserving pre-order walk of the subtree rooted at
    /// `from`: the node itself, then its condition subtree, then each child
    /// subtree in order.
    pub fn enumerate_from(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(from, &mut out);
        out
    }

    /// Pre-order walk of the whole tree.
    pub fn enumerate_nodes(&self) -> Vec<NodeId> {
        self.enumerate_from(self.root)
    }

    fn walk(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        let node = self.node(id);
        if let Some(condition) = node.condition {
            self.walk(condition, out);
        }
        for &child in &node.children {
            self.walk(child, out);
        }
    }

    /// All leaf (component) nodes, in execution-namespace order.
    pub fn flatten_leaves(&self) -> Vec<NodeId> {
        self.enumerate_nodes()
            .into_iter()
            .filter(|&id| self.node(id).kind.is_leaf())
            .collect()
    }

    /// First node carrying `id`, in pre-order.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.enumerate_nodes()
            .into_iter()
            .find(|&n| self.node(n).id.as_deref() == Some(id))
    }

    fn next_placeholder(&mut self) -> String {
        self.placeholder_seq += 1;
        format!("placeholder_{}", self.placeholder_seq)
    }

    fn fill_id(&mut self, kind: ElKind, id: Option<String>) -> Option<String> {
        match id {
            Some(id) => Some(id),
            None if kind.requires_id() => Some(self.next_placeholder()),
            None => None,
        }
    }

    /// Builds the minimal default subtree for `kind` under `parent` and
    /// returns its root. Mirrors what the editor inserts on "add node".
    fn build_default(
        &mut self,
        parent: Option<NodeId>,
        kind: ElKind,
        id: Option<String>,
    ) -> NodeId {
        let id = self.fill_id(kind, id);
        let node = self.alloc(parent, kind, id);
        match kind {
            ElKind::Then | ElKind::When => {
                self.default_child(node, ElKind::Leaf(LeafKind::Common));
            }
            ElKind::Switch => {
                self.default_condition(node, ElKind::Leaf(LeafKind::Switch));
                self.default_child(node, ElKind::Leaf(LeafKind::Common));
            }
            ElKind::If => {
                self.default_condition(node, ElKind::Leaf(LeafKind::Boolean));
                self.default_child(node, ElKind::Leaf(LeafKind::Common));
            }
            ElKind::For => {
                self.default_condition(node, ElKind::Leaf(LeafKind::For));
                self.default_child(node, ElKind::Then);
            }
            ElKind::While => {
                self.default_condition(node, ElKind::Leaf(LeafKind::While));
                self.default_child(node, ElKind::Then);
            }
            ElKind::Iterator => {
                self.default_condition(node, ElKind::Leaf(LeafKind::Iterator));
                self.default_child(node, ElKind::Then);
            }
            ElKind::Catch => {
                self.default_condition(node, ElKind::Then);
                self.default_child(node, ElKind::Leaf(LeafKind::Common));
            }
            ElKind::And | ElKind::Or => {
                self.default_child(node, ElKind::Leaf(LeafKind::Boolean));
                self.default_child(node, ElKind::Leaf(LeafKind::Boolean));
            }
            ElKind::Not => {
                self.default_child(node, ElKind::Leaf(LeafKind::Boolean));
            }
            ElKind::Chain => {
                self.default_child(node, ElKind::Then);
            }
            ElKind::Leaf(_) => {}
        }
        node
    }

    fn default_child(&mut self, parent: NodeId, kind: ElKind) {
        let child = self.build_default(Some(parent), kind, None);
        self.link_child(parent, child);
    }

    fn default_condition(&mut self, parent: NodeId, kind: ElKind) {
        let condition = self.build_default(Some(parent), kind, None);
        self.link_condition(parent, condition);
    }

    fn check_can_adopt(&self, parent: NodeId, extra: usize) -> Result<(), EditError> {
        let node = self.node(parent);
        if node.kind.is_leaf() {
            return Err(EditError::LeafChildren { kind: node.kind });
        }
        let limit = match node.kind {
            ElKind::Not => Some(1),
            ElKind::If => Some(2),
            _ => None,
        };
        if let Some(limit) = limit {
            if node.children.len() + extra > limit {
                return Err(EditError::ChildLimit {
                    kind: node.kind,
                    limit,
                });
            }
        }
        Ok(())
    }

    fn min_children(kind: ElKind) -> usize {
        match kind {
            ElKind::And | ElKind::Or | ElKind::Not | ElKind::If => 1,
            _ => 0,
        }
    }

    /// Appends the default subtree for `kind` as the last child of `parent`.
    /// `id` overrides the placeholder id of the created node itself.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        kind: ElKind,
        id: Option<String>,
    ) -> Result<NodeId, EditError> {
        let index = self.node(parent).children.len();
        self.insert_child(parent, index, kind, id)
    }

    /// Inserts the default subtree for `kind` at `index` among `parent`'s
    /// children.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        kind: ElKind,
        id: Option<String>,
    ) -> Result<NodeId, EditError> {
        self.check_can_adopt(parent, 1)?;
        let len = self.node(parent).children.len();
        if index > len {
            return Err(EditError::IndexOutOfBounds { index, len });
        }
        if matches!(&id, Some(id) if id.is_empty()) {
            return Err(EditError::EmptyId);
        }
        let child = self.build_default(Some(parent), kind, id);
        self.node_mut(parent).children.insert(index, child);
        Ok(child)
    }

    /// Detaches `node` (and its subtree) from its parent's child list.
    ///
    /// Condition slots cannot be removed, only replaced, and a removal that
    /// would take a combinator or IF below its minimum arity is rejected.
    /// Detached slots stay in the arena until the chain is rebuilt.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), EditError> {
        let Some(parent) = self.node(node).parent else {
            return Err(EditError::RemoveRoot);
        };
        if self.node(parent).condition == Some(node) {
            return Err(EditError::RemoveCondition);
        }
        let parent_kind = self.node(parent).kind;
        let len = self.node(parent).children.len();
        if len <= Self::min_children(parent_kind) {
            return Err(EditError::UnderMinimumChildren { kind: parent_kind });
        }
        self.node_mut(parent).children.retain(|&c| c != node);
        self.node_mut(node).parent = None;
        Ok(())
    }

    /// Replaces `parent`'s condition subtree with the default subtree for
    /// `kind`. The old condition is detached.
    pub fn replace_condition(
        &mut self,
        parent: NodeId,
        kind: ElKind,
        id: Option<String>,
    ) -> Result<NodeId, EditError> {
        let parent_kind = self.node(parent).kind;
        if !parent_kind.requires_condition() {
            return Err(EditError::NoConditionSlot { kind: parent_kind });
        }
        if matches!(&id, Some(id) if id.is_empty()) {
            return Err(EditError::EmptyId);
        }
        let old = self.node(parent).condition;
        let condition = self.build_default(Some(parent), kind, id);
        self.link_condition(parent, condition);
        if let Some(old) = old {
            self.node_mut(old).parent = None;
        }
        Ok(condition)
    }

    pub fn rename(&mut self, node: NodeId, id: String) -> Result<(), EditError> {
        if id.is_empty() {
            return Err(EditError::EmptyId);
        }
        self.node_mut(node).id = Some(id);
        Ok(())
    }

    pub fn set_properties(&mut self, node: NodeId, properties: Properties) {
        self.node_mut(node).properties = properties;
    }

    pub fn set_collapsed(&mut self, node: NodeId, collapsed: bool) {
        self.node_mut(node).collapsed = collapsed;
    }

    pub(crate) fn reset_cells(&mut self) {
        for node in &mut self.nodes {
            node.start_cell = None;
            node.end_cell = None;
        }
    }
}
