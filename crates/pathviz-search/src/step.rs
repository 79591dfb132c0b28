//! What a search produces: [`AnimationStep`]s, then one [`PathfindingResult`].

use std::fmt;

use pathviz_core::NodeId;

/// One visual event emitted by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationStep {
    /// Nodes popped from the frontier and expanded, in order.
    Visit(Vec<NodeId>),
    /// The final path, start to end.
    Path(Vec<NodeId>),
}

impl AnimationStep {
    /// The nodes carried by the step.
    pub fn nodes(&self) -> &[NodeId] {
        match self {
            Self::Visit(n) | Self::Path(n) => n,
        }
    }

    #[inline]
    pub fn is_path(&self) -> bool {
        matches!(self, Self::Path(_))
    }
}

/// Terminal outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathfindingResult {
    pub found: bool,
    pub nodes_visited: usize,
    /// Start to end; empty when nothing was found.
    pub path: Vec<NodeId>,
}

impl PathfindingResult {
    /// A failed search after expanding `nodes_visited` nodes.
    pub fn not_found(nodes_visited: usize) -> Self {
        Self {
            found: false,
            nodes_visited,
            path: Vec::new(),
        }
    }

    /// Number of nodes on the path, endpoints included.
    #[inline]
    pub fn path_length(&self) -> usize {
        self.path.len()
    }
}

/// One pull from a [`Search`](crate::Search).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Step(AnimationStep),
    Done(PathfindingResult),
}

/// Failures of the step producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The search already returned its result.
    Finished,
    /// The graph changed size between pulls.
    GraphResized { expected: usize, found: usize },
    /// An id from the frontier or a parent link is not in the graph.
    UnknownNode(NodeId),
    /// Following parent links from the end never reached the start.
    BrokenPath(NodeId),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished => f.write_str("search already finished"),
            Self::GraphResized { expected, found } => write!(
                f,
                "graph resized during search: {expected} nodes became {found}"
            ),
            Self::UnknownNode(id) => write!(f, "node {id} is not part of the graph"),
            Self::BrokenPath(id) => write!(f, "parent chain from {id} does not reach the start"),
        }
    }
}

impl std::error::Error for SearchError {}
