use std::fmt;

/// Component kinds a leaf node can carry. Leaves are the executable units of
/// a chain; the sub-kind only records which palette entry produced them and
/// which condition slot they are intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Common,
    Boolean,
    Switch,
    If,
    For,
    While,
    Iterator,
}

/// The closed set of tree-node kinds: twelve operators plus the leaf family.
///
/// All kind-specific behavior in the crate (building, serializing,
/// projecting, inference) dispatches over this enum with exhaustive matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElKind {
    /// Sequential orchestration: `THEN(a,b,c)`.
    Then,
    /// Parallel orchestration: `WHEN(a,b,c)`.
    When,
    /// Branch selection: `SWITCH(x).to(a,b)`.
    Switch,
    /// Conditional branch: `IF(x).then(a).else(b)`.
    If,
    /// Counted loop: `FOR(x).do(body)`.
    For,
    /// Conditional loop: `WHILE(x).do(body)`.
    While,
    /// Collection loop: `ITERATOR(x).do(body)`.
    Iterator,
    /// Exception capture: `CATCH(flow).do(handler)`.
    Catch,
    And,
    Or,
    Not,
    /// Sub-chain reference; owns a nested subtree and serializes as its id.
    Chain,
    Leaf(LeafKind),
}

impl ElKind {
    /// Resolves a JSON `type` string against the fixed kind table.
    pub fn from_type(type_name: &str) -> Option<ElKind> {
        let kind = match type_name {
            "THEN" => ElKind::Then,
            "WHEN" => ElKind::When,
            "SWITCH" => ElKind::Switch,
            "IF" => ElKind::If,
            "FOR" => ElKind::For,
            "WHILE" => ElKind::While,
            "ITERATOR" => ElKind::Iterator,
            "CATCH" => ElKind::Catch,
            "AND" => ElKind::And,
            "OR" => ElKind::Or,
            "NOT" => ElKind::Not,
            "CHAIN" => ElKind::Chain,
            "NodeComponent" => ElKind::Leaf(LeafKind::Common),
            "NodeBooleanComponent" => ElKind::Leaf(LeafKind::Boolean),
            "NodeSwitchComponent" => ElKind::Leaf(LeafKind::Switch),
            "NodeIfComponent" => ElKind::Leaf(LeafKind::If),
            "NodeForComponent" => ElKind::Leaf(LeafKind::For),
            "NodeWhileComponent" => ElKind::Leaf(LeafKind::While),
            "NodeIteratorComponent" => ElKind::Leaf(LeafKind::Iterator),
            _ => return None,
        };
        Some(kind)
    }

    /// The wire string written into the JSON `type` field.
    pub fn type_str(&self) -> &'static str {
        match self {
            ElKind::Then => "THEN",
            ElKind::When => "WHEN",
            ElKind::Switch => "SWITCH",
            ElKind::If => "IF",
            ElKind::For => "FOR",
            ElKind::While => "WHILE",
            ElKind::Iterator => "ITERATOR",
            ElKind::Catch => "CATCH",
            ElKind::And => "AND",
            ElKind::Or => "OR",
            ElKind::Not => "NOT",
            ElKind::Chain => "CHAIN",
            ElKind::Leaf(LeafKind::Common) => "NodeComponent",
            ElKind::Leaf(LeafKind::Boolean) => "NodeBooleanComponent",
            ElKind::Leaf(LeafKind::Switch) => "NodeSwitchComponent",
            ElKind::Leaf(LeafKind::If) => "NodeIfComponent",
            ElKind::Leaf(LeafKind::For) => "NodeForComponent",
            ElKind::Leaf(LeafKind::While) => "NodeWhileComponent",
            ElKind::Leaf(LeafKind::Iterator) => "NodeIteratorComponent",
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ElKind::Leaf(_))
    }

    /// Kinds whose condition slot must be populated. CATCH's slot holds the
    /// protected flow rather than a decision input, but the slot is required
    /// all the same.
    pub fn requires_condition(&self) -> bool {
        matches!(
            self,
            ElKind::Switch
                | ElKind::If
                | ElKind::For
                | ElKind::While
                | ElKind::Iterator
                | ElKind::Catch
        )
    }

    /// Logical combinators: boolean-composing operators with no execution
    /// contract of their own.
    pub fn is_combinator(&self) -> bool {
        matches!(self, ElKind::And | ElKind::Or | ElKind::Not)
    }

    /// Kinds that must carry a node id (leaves reference components, CHAIN
    /// references a separately defined chain).
    pub fn requires_id(&self) -> bool {
        self.is_leaf() || matches!(self, ElKind::Chain)
    }

    /// Shape string attached to this kind's start cell.
    pub fn shape(&self) -> &'static str {
        match self {
            ElKind::Then => "el-then",
            ElKind::When => "el-when",
            ElKind::Switch => "el-switch",
            ElKind::If => "el-if",
            ElKind::For => "el-for",
            ElKind::While => "el-while",
            ElKind::Iterator => "el-iterator",
            ElKind::Catch => "el-catch",
            ElKind::And => "el-and",
            ElKind::Or => "el-or",
            ElKind::Not => "el-not",
            ElKind::Chain => "el-chain",
            ElKind::Leaf(_) => "el-node",
        }
    }
}

impl fmt::Display for ElKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_str())
    }
}
