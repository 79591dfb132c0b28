//! The searchable grid: [`GridGraph`] and its [`Node`]s.
//!
//! Nodes are stored in a flat row-major arena and addressed by [`NodeId`].
//! Search bookkeeping (costs, parent links, visited/path flags) lives on the
//! nodes themselves and is cleared by [`GridGraph::reset`] before each run.

use std::fmt;

use crate::geom::{Point, Range};

/// Default number of rows for [`GridGraph::default`].
pub const DEFAULT_ROWS: i32 = 20;
/// Default number of columns for [`GridGraph::default`].
pub const DEFAULT_COLS: i32 = 50;

/// Index of a node in its grid's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// The raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single grid cell.
///
/// Walkability and the start/end flags are owned by the grid (see
/// [`GridGraph::set_walkable`], [`GridGraph::set_start`]); the remaining
/// fields are search bookkeeping that algorithms update freely.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    pos: Point,
    walkable: bool,
    is_start: bool,
    is_end: bool,
    pub is_visited: bool,
    pub is_path: bool,
    /// Cost of the best known path from the start. `+∞` until discovered.
    pub g_cost: f64,
    /// Heuristic estimate to the end.
    pub h_cost: f64,
    /// Search-tree edge towards the start. Assigned at discovery.
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(id: NodeId, pos: Point) -> Self {
        Self {
            id,
            pos,
            walkable: true,
            is_start: false,
            is_end: false,
            is_visited: false,
            is_path: false,
            g_cost: f64::INFINITY,
            h_cost: 0.0,
            parent: None,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn walkable(&self) -> bool {
        self.walkable
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.is_start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    /// `g + h`, the A* ordering key.
    #[inline]
    pub fn f_cost(&self) -> f64 {
        self.g_cost + self.h_cost
    }

    fn clear_search_state(&mut self) {
        self.is_visited = false;
        self.is_path = false;
        self.g_cost = f64::INFINITY;
        self.h_cost = 0.0;
        self.parent = None;
    }
}

// ---------------------------------------------------------------------------
// GridGraph
// ---------------------------------------------------------------------------

/// A 4-connected grid of [`Node`]s with one start and one end.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGraph {
    range: Range,
    nodes: Vec<Node>,
    start: Option<NodeId>,
    end: Option<NodeId>,
}

impl Default for GridGraph {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

/// Default start/end placement for a `width` × `height` grid: both on the
/// middle row, at one fifth and four fifths of the width.
pub fn default_endpoints(width: i32, height: i32) -> (Point, Point) {
    let row = height / 2;
    (Point::at(row, width / 5), Point::at(row, width * 4 / 5))
}

impl GridGraph {
    /// Create an open grid with start and end at their
    /// [default positions](default_endpoints).
    ///
    /// An empty grid (zero width or height) has neither.
    pub fn new(width: i32, height: i32) -> Self {
        let mut g = Self::open(width, height);
        if !g.range.is_empty() {
            let (s, e) = default_endpoints(g.width(), g.height());
            g.set_start(s);
            g.set_end(e);
        }
        g
    }

    /// Create an open grid without start or end.
    pub(crate) fn open(width: i32, height: i32) -> Self {
        let range = Range::sized(width, height);
        let nodes = range
            .iter()
            .enumerate()
            .map(|(i, p)| Node::new(NodeId(i), p))
            .collect();
        Self {
            range,
            nodes,
            start: None,
            end: None,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    /// The rectangle covered by the grid.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in row-major order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    #[inline]
    pub fn id_at(&self, pos: Point) -> Option<NodeId> {
        self.range.index_of(pos).map(NodeId)
    }

    #[inline]
    pub fn node_at(&self, pos: Point) -> Option<&Node> {
        self.id_at(pos).and_then(|id| self.node(id))
    }

    /// Position of `id`, if it belongs to this grid.
    #[inline]
    pub fn pos(&self, id: NodeId) -> Option<Point> {
        self.node(id).map(Node::pos)
    }

    #[inline]
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<NodeId> {
        self.end
    }

    // -----------------------------------------------------------------------
    // Search contract
    // -----------------------------------------------------------------------

    /// Append the walkable cardinal neighbours of `id` into `buf`, in the
    /// order up, down, left, right. The caller clears `buf` before calling.
    pub fn neighbors(&self, id: NodeId, buf: &mut Vec<NodeId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        for p in node.pos.cardinal() {
            if let Some(n) = self.id_at(p) {
                if self.nodes[n.0].walkable {
                    buf.push(n);
                }
            }
        }
    }

    /// Step cost between two nodes; 1 for adjacent cells.
    ///
    /// Unknown ids cost `+∞`.
    pub fn distance(&self, a: NodeId, b: NodeId) -> f64 {
        match (self.pos(a), self.pos(b)) {
            (Some(pa), Some(pb)) => f64::from(pa.manhattan(pb)),
            _ => f64::INFINITY,
        }
    }

    /// Manhattan distance between two nodes, admissible on this grid.
    pub fn heuristic(&self, a: NodeId, b: NodeId) -> f64 {
        self.distance(a, b)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Move the start flag to `pos`, making that node walkable.
    ///
    /// Returns `false` (and changes nothing) if `pos` is outside the grid.
    pub fn set_start(&mut self, pos: Point) -> bool {
        let Some(id) = self.id_at(pos) else {
            return false;
        };
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        node.is_start = true;
        node.walkable = true;
        if let Some(old) = self.start.replace(id).filter(|&old| old != id) {
            if let Some(n) = self.nodes.get_mut(old.0) {
                n.is_start = false;
            }
        }
        true
    }

    /// Move the end flag to `pos`, making that node walkable.
    ///
    /// Returns `false` (and changes nothing) if `pos` is outside the grid.
    pub fn set_end(&mut self, pos: Point) -> bool {
        let Some(id) = self.id_at(pos) else {
            return false;
        };
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        node.is_end = true;
        node.walkable = true;
        if let Some(old) = self.end.replace(id).filter(|&old| old != id) {
            if let Some(n) = self.nodes.get_mut(old.0) {
                n.is_end = false;
            }
        }
        true
    }

    /// Drag the start onto `pos`. Refused for walls and the end node.
    pub fn move_start(&mut self, pos: Point) -> bool {
        match self.node_at(pos) {
            Some(n) if n.walkable && !n.is_end => self.set_start(pos),
            _ => false,
        }
    }

    /// Drag the end onto `pos`. Refused for walls and the start node.
    pub fn move_end(&mut self, pos: Point) -> bool {
        match self.node_at(pos) {
            Some(n) if n.walkable && !n.is_start => self.set_end(pos),
            _ => false,
        }
    }

    /// Set walkability of the node at `pos`.
    ///
    /// Start and end nodes are left untouched. Returns whether the node now
    /// has the requested value.
    pub fn set_walkable(&mut self, pos: Point, walkable: bool) -> bool {
        let Some(id) = self.id_at(pos) else {
            return false;
        };
        let node = &mut self.nodes[id.0];
        if node.is_start || node.is_end {
            return node.walkable == walkable;
        }
        node.walkable = walkable;
        true
    }

    /// Flip the node at `pos` between wall and floor.
    pub fn toggle_wall(&mut self, pos: Point) -> bool {
        match self.node_at(pos) {
            Some(n) => {
                let to = !n.walkable;
                self.set_walkable(pos, to)
            }
            None => false,
        }
    }

    /// Clear all search bookkeeping. With `keep_walls == false` every
    /// non-endpoint node also becomes walkable again.
    pub fn reset(&mut self, keep_walls: bool) {
        for node in &mut self.nodes {
            node.clear_search_state();
            if !keep_walls && !node.is_start && !node.is_end {
                node.walkable = true;
            }
        }
        log::trace!(
            "grid {}x{} reset (keep_walls: {keep_walls})",
            self.width(),
            self.height()
        );
    }

    /// Positions of all non-walkable nodes, row-major.
    pub fn walls(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().filter(|n| !n.walkable).map(|n| n.pos)
    }

    /// Ids of visited nodes, row-major.
    pub fn visited(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter(|n| n.is_visited).map(|n| n.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(g: &GridGraph, pts: &[Point]) -> Vec<NodeId> {
        pts.iter().map(|&p| g.id_at(p).unwrap()).collect()
    }

    #[test]
    fn stale_endpoint_ids_are_ignored() {
        let mut g = GridGraph::new(3, 3);
        g.start = Some(NodeId(999));
        g.end = Some(NodeId(42));
        assert!(g.set_start(Point::new(0, 0)));
        assert!(g.set_end(Point::new(2, 2)));
        assert_eq!(g.start(), g.id_at(Point::new(0, 0)));
        assert_eq!(g.end(), g.id_at(Point::new(2, 2)));
        assert!(g.node_at(Point::new(0, 0)).unwrap().is_start());
        assert!(g.node_at(Point::new(2, 2)).unwrap().is_end());
    }

    #[test]
    fn default_grid_dimensions_and_endpoints() {
        let g = GridGraph::default();
        assert_eq!(g.width(), DEFAULT_COLS);
        assert_eq!(g.height(), DEFAULT_ROWS);
        assert_eq!(g.pos(g.start().unwrap()), Some(Point::at(10, 10)));
        assert_eq!(g.pos(g.end().unwrap()), Some(Point::at(10, 40)));
    }

    #[test]
    fn empty_grid_has_no_endpoints() {
        let g = GridGraph::new(0, 0);
        assert!(g.is_empty());
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }

    #[test]
    fn single_cell_grid_shares_start_and_end() {
        let g = GridGraph::new(1, 1);
        assert_eq!(g.start(), g.end());
        let n = g.node(g.start().unwrap()).unwrap();
        assert!(n.is_start() && n.is_end());
    }

    #[test]
    fn neighbors_are_ordered_and_filtered() {
        let mut g = GridGraph::new(3, 3);
        let c = g.id_at(Point::new(1, 1)).unwrap();
        let mut buf = Vec::new();
        g.neighbors(c, &mut buf);
        let expected = ids(
            &g,
            &[
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(0, 1),
                Point::new(2, 1),
            ],
        );
        assert_eq!(buf, expected);

        g.set_walkable(Point::new(1, 2), false);
        buf.clear();
        g.neighbors(c, &mut buf);
        assert_eq!(buf.len(), 3);
        assert!(!buf.contains(&g.id_at(Point::new(1, 2)).unwrap()));
    }

    #[test]
    fn neighbors_are_bounds_checked() {
        let g = GridGraph::new(3, 3);
        let corner = g.id_at(Point::new(0, 0)).unwrap();
        let mut buf = Vec::new();
        g.neighbors(corner, &mut buf);
        assert_eq!(buf, ids(&g, &[Point::new(0, 1), Point::new(1, 0)]));

        buf.clear();
        g.neighbors(NodeId(99), &mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn distance_and_heuristic() {
        let g = GridGraph::new(5, 5);
        let a = g.id_at(Point::new(0, 0)).unwrap();
        let b = g.id_at(Point::new(1, 0)).unwrap();
        let c = g.id_at(Point::new(4, 4)).unwrap();
        assert_eq!(g.distance(a, b), 1.0);
        assert_eq!(g.heuristic(a, c), 8.0);
        assert_eq!(g.distance(a, NodeId(1000)), f64::INFINITY);
    }

    #[test]
    fn set_start_moves_flag_and_forces_walkable() {
        let mut g = GridGraph::new(5, 5);
        let old = g.start().unwrap();
        g.set_walkable(Point::new(3, 3), false);
        assert!(g.set_start(Point::new(3, 3)));

        assert!(!g.node(old).unwrap().is_start());
        let n = g.node_at(Point::new(3, 3)).unwrap();
        assert!(n.is_start());
        assert!(n.walkable());
        assert_eq!(g.nodes().iter().filter(|n| n.is_start()).count(), 1);

        assert!(!g.set_start(Point::new(9, 9)));
        assert_eq!(g.pos(g.start().unwrap()), Some(Point::new(3, 3)));
    }

    #[test]
    fn set_end_moves_flag() {
        let mut g = GridGraph::new(5, 5);
        assert!(g.set_end(Point::new(0, 4)));
        assert_eq!(g.nodes().iter().filter(|n| n.is_end()).count(), 1);
        assert_eq!(g.pos(g.end().unwrap()), Some(Point::new(0, 4)));
    }

    #[test]
    fn endpoints_cannot_become_walls() {
        let mut g = GridGraph::new(5, 5);
        let s = g.pos(g.start().unwrap()).unwrap();
        let e = g.pos(g.end().unwrap()).unwrap();
        assert!(!g.set_walkable(s, false));
        assert!(!g.toggle_wall(e));
        assert!(g.node_at(s).unwrap().walkable());
        assert!(g.node_at(e).unwrap().walkable());
    }

    #[test]
    fn move_start_refuses_walls_and_end() {
        let mut g = GridGraph::new(5, 5);
        g.set_walkable(Point::new(0, 0), false);
        assert!(!g.move_start(Point::new(0, 0)));
        let e = g.pos(g.end().unwrap()).unwrap();
        assert!(!g.move_start(e));
        assert!(g.move_start(Point::new(0, 1)));
        assert!(!g.move_end(Point::new(0, 1)));
    }

    #[test]
    fn toggle_wall_flips() {
        let mut g = GridGraph::new(4, 4);
        let p = Point::new(0, 3);
        assert!(g.toggle_wall(p));
        assert!(!g.node_at(p).unwrap().walkable());
        assert!(g.toggle_wall(p));
        assert!(g.node_at(p).unwrap().walkable());
        assert!(!g.toggle_wall(Point::new(-1, 0)));
    }

    #[test]
    fn reset_clears_bookkeeping() {
        let mut g = GridGraph::new(4, 4);
        g.set_walkable(Point::new(2, 2), false);
        for n in g.nodes.iter_mut() {
            n.is_visited = true;
            n.is_path = true;
            n.g_cost = 3.0;
            n.h_cost = 4.0;
            n.parent = Some(NodeId(0));
        }

        g.reset(true);
        for n in g.nodes() {
            assert!(!n.is_visited && !n.is_path);
            assert_eq!(n.g_cost, f64::INFINITY);
            assert_eq!(n.h_cost, 0.0);
            assert_eq!(n.parent, None);
        }
        assert_eq!(g.walls().collect::<Vec<_>>(), vec![Point::new(2, 2)]);

        g.reset(false);
        assert_eq!(g.walls().count(), 0);
        assert!(g.start().is_some() && g.end().is_some());
    }

    #[test]
    fn reset_keep_walls_is_idempotent() {
        let mut g = GridGraph::new(6, 4);
        g.set_walkable(Point::new(1, 1), false);
        g.set_walkable(Point::new(4, 1), false);
        if let Some(n) = g.node_mut(NodeId(3)) {
            n.is_visited = true;
            n.parent = Some(NodeId(2));
        }

        g.reset(true);
        let once = g.clone();
        g.reset(true);
        assert_eq!(g, once);
    }
}
