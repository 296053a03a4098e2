//! Cell projection: tree → renderable graph.
//!
//! Strictly one-directional. The projector regenerates the full cell set on
//! every call; canvas edits never flow back through cells, only through
//! structural mutations on the tree followed by a re-projection. Cells carry
//! the originating [`NodeId`] so the shell can focus and highlight, and each
//! node records its produced start/end cell ids for the reverse lookup.

use crate::el::{ElKind, ElTree, NodeId};

/// Identifier of one produced cell, unique within a single projection.
pub type CellId = u32;

/// Shape string of every end marker cell.
pub const END_MARKER_SHAPE: &str = "el-intermediate-end";

/// Shape string of every edge.
pub const EDGE_SHAPE: &str = "el-edge";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    Start,
    End,
}

/// A renderable node cell. Leaves produce a single `Start` cell acting as
/// both their start and end; operators produce a `Start` and an `End` cell.
#[derive(Debug, Clone)]
pub struct GraphCell {
    pub id: CellId,
    pub shape: &'static str,
    pub label: String,
    pub role: MarkerRole,
    pub origin: NodeId,
    pub collapsed: bool,
}

/// A directed edge between two cells.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub id: CellId,
    pub shape: &'static str,
    pub source: CellId,
    pub target: CellId,
}

/// The full projection of one tree.
#[derive(Debug, Clone, Default)]
pub struct CellGraph {
    pub cells: Vec<GraphCell>,
    pub edges: Vec<GraphEdge>,
}

impl CellGraph {
    pub fn start_marker_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.role == MarkerRole::Start)
            .count()
    }

    pub fn end_marker_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.role == MarkerRole::End)
            .count()
    }

    /// Edges leaving `cell`, in production order.
    pub fn edges_from(&self, cell: CellId) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.source == cell)
    }
}

#[derive(Default)]
struct ProjectionSink {
    cells: Vec<GraphCell>,
    edges: Vec<GraphEdge>,
    next: CellId,
}

impl ProjectionSink {
    fn push_cell(
        &mut self,
        shape: &'static str,
        label: String,
        role: MarkerRole,
        origin: NodeId,
        collapsed: bool,
    ) -> CellId {
        let id = self.next;
        self.next += 1;
        self.cells.push(GraphCell {
            id,
            shape,
            label,
            role,
            origin,
            collapsed,
        });
        id
    }

    fn push_edge(&mut self, source: CellId, target: CellId) {
        let id = self.next;
        self.next += 1;
        self.edges.push(GraphEdge {
            id,
            shape: EDGE_SHAPE,
            source,
            target,
        });
    }
}

impl ElTree {
    /// Projects the whole tree into cells and edges, recording each node's
    /// start/end cell ids for later lookup. Previously recorded cell ids are
    /// discarded first; the projection is always regenerated in full.
    pub fn to_cells(&mut self) -> CellGraph {
        let root = self.root();
        self.reset_cells();
        let mut sink = ProjectionSink::default();
        project(self, root, &mut sink);
        CellGraph {
            cells: sink.cells,
            edges: sink.edges,
        }
    }

    /// The start/end cell ids recorded for `node` by the last projection.
    pub fn cells_of(&self, node: NodeId) -> Option<(CellId, CellId)> {
        let data = self.node(node);
        Some((data.start_cell()?, data.end_cell()?))
    }
}

/// Projects one subtree; returns its (start, end) cell ids.
fn project(tree: &mut ElTree, id: NodeId, sink: &mut ProjectionSink) -> (CellId, CellId) {
    let node = tree.node(id);
    let kind = node.kind;
    let label = node
        .id
        .clone()
        .unwrap_or_else(|| kind.type_str().to_string());
    let collapsed = node.collapsed;
    let condition = node.condition();
    let children: Vec<NodeId> = node.children().to_vec();

    if kind.is_leaf() {
        let cell = sink.push_cell(kind.shape(), label, MarkerRole::Start, id, collapsed);
        let data = tree.node_mut(id);
        data.start_cell = Some(cell);
        data.end_cell = Some(cell);
        return (cell, cell);
    }

    let start = sink.push_cell(kind.shape(), label, MarkerRole::Start, id, collapsed);
    let end = sink.push_cell(END_MARKER_SHAPE, String::new(), MarkerRole::End, id, collapsed);
    let data = tree.node_mut(id);
    data.start_cell = Some(start);
    data.end_cell = Some(end);

    // Decision-bearing operators route through their condition subtree: the
    // condition's end cell is the fan-out point for the children.
    let entry = match condition {
        Some(condition) => {
            let (cond_start, cond_end) = project(tree, condition, sink);
            sink.push_edge(start, cond_start);
            cond_end
        }
        None => start,
    };

    if children.is_empty() {
        sink.push_edge(entry, end);
    } else {
        for child in children {
            let (child_start, child_end) = project(tree, child, sink);
            sink.push_edge(entry, child_start);
            sink.push_edge(child_end, end);
        }
    }

    (start, end)
}
