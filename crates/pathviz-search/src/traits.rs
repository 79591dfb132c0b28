use pathviz_core::{GridGraph, Node, NodeId};

/// Graph interface consumed by [`Search`](crate::Search).
///
/// The graph owns the per-node bookkeeping that searches write to (costs,
/// parent links, visited and path flags).
pub trait SearchGraph {
    fn start(&self) -> Option<NodeId>;

    fn end(&self) -> Option<NodeId>;

    /// Number of nodes. Must stay constant while a search runs.
    fn node_count(&self) -> usize;

    fn node(&self, id: NodeId) -> Option<&Node>;

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node>;

    /// Append the walkable neighbours of `id` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, id: NodeId, buf: &mut Vec<NodeId>);

    /// Cost of moving between adjacent nodes. Must be >= 0.
    fn distance(&self, from: NodeId, to: NodeId) -> f64;

    /// Estimate of the remaining cost from `from` to `to`.
    /// Must never overestimate (admissible) for A* to stay optimal.
    fn heuristic(&self, from: NodeId, to: NodeId) -> f64;
}

impl SearchGraph for GridGraph {
    #[inline]
    fn start(&self) -> Option<NodeId> {
        GridGraph::start(self)
    }

    #[inline]
    fn end(&self) -> Option<NodeId> {
        GridGraph::end(self)
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn node(&self, id: NodeId) -> Option<&Node> {
        GridGraph::node(self, id)
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        GridGraph::node_mut(self, id)
    }

    #[inline]
    fn neighbors(&self, id: NodeId, buf: &mut Vec<NodeId>) {
        GridGraph::neighbors(self, id, buf)
    }

    #[inline]
    fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        GridGraph::distance(self, from, to)
    }

    #[inline]
    fn heuristic(&self, from: NodeId, to: NodeId) -> f64 {
        GridGraph::heuristic(self, from, to)
    }
}
