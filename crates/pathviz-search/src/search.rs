use std::collections::VecDeque;

use pathviz_core::{IndexedHeap, Node, NodeId};

use crate::step::{AnimationStep, PathfindingResult, Progress, SearchError};
use crate::traits::SearchGraph;
use crate::{Algorithm, astar, bfs, dfs, dijkstra, gbfs};

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// The open set, one variant per algorithm.
#[derive(Debug)]
pub(crate) enum Frontier {
    Fifo(VecDeque<NodeId>),
    Lifo(Vec<NodeId>),
    /// Keyed by `g`.
    Cost(IndexedHeap<NodeId>),
    /// Keyed by `h`.
    Greedy(IndexedHeap<NodeId>),
    /// Keyed by `(g + h, h)`.
    Estimate(IndexedHeap<NodeId, (f64, f64)>),
}

impl Frontier {
    fn for_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Bfs => Self::Fifo(VecDeque::new()),
            Algorithm::Dfs => Self::Lifo(Vec::new()),
            Algorithm::Dijkstra => Self::Cost(IndexedHeap::new()),
            Algorithm::Gbfs => Self::Greedy(IndexedHeap::new()),
            Algorithm::Astar => Self::Estimate(IndexedHeap::new()),
        }
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self {
            Self::Fifo(q) => q.pop_front(),
            Self::Lifo(s) => s.pop(),
            Self::Cost(h) | Self::Greedy(h) => h.extract_min(),
            Self::Estimate(h) => h.extract_min(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Fifo(q) => q.len(),
            Self::Lifo(s) => s.len(),
            Self::Cost(h) | Self::Greedy(h) => h.len(),
            Self::Estimate(h) => h.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Phase {
    /// Nothing pulled yet.
    Init,
    Expanding,
    /// The end node was just visited; the path step comes next.
    Reached,
    /// The path step was emitted; the result comes next.
    Complete(PathfindingResult),
    Finished,
}

/// A lazily-evaluated, one-shot search over a [`SearchGraph`].
///
/// Each call to [`next`](Self::next) does the work for exactly one
/// [`AnimationStep`] and returns it, or returns the terminal
/// [`PathfindingResult`]. A node's parent is set when it is discovered (or
/// reached more cheaply); it is marked visited and reported when it is popped
/// from the frontier. Entries for nodes that are already visited are skipped
/// silently.
///
/// The search does not borrow the graph between pulls, but the graph must
/// not be mutated by anyone else until the search is done or dropped.
#[derive(Debug)]
pub struct Search {
    algorithm: Algorithm,
    frontier: Frontier,
    phase: Phase,
    start: NodeId,
    end: NodeId,
    node_count: usize,
    nodes_visited: usize,
    // scratch buffer for neighbour queries
    nbuf: Vec<NodeId>,
}

impl Search {
    /// Prepare a search. Nothing is read from the graph until the first
    /// [`next`](Self::next).
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            frontier: Frontier::for_algorithm(algorithm),
            phase: Phase::Init,
            start: NodeId(0),
            end: NodeId(0),
            node_count: 0,
            nodes_visited: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Nodes expanded so far.
    #[inline]
    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    /// Entries currently queued, stale duplicates included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Whether the result has been returned (or the search failed).
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Advance the search by one step.
    pub fn next<G: SearchGraph + ?Sized>(&mut self, graph: &mut G) -> Result<Progress, SearchError> {
        match std::mem::replace(&mut self.phase, Phase::Finished) {
            Phase::Init => self.seed(graph),
            Phase::Expanding => self.expand_next(graph),
            Phase::Reached => self.trace_path(graph),
            Phase::Complete(result) => {
                log::debug!(
                    "{}: path of {} nodes after {} visits",
                    self.algorithm,
                    result.path_length(),
                    result.nodes_visited
                );
                Ok(Progress::Done(result))
            }
            Phase::Finished => Err(SearchError::Finished),
        }
    }

    /// Pull every remaining step, returning them with the result.
    pub fn run_to_end<G: SearchGraph + ?Sized>(
        mut self,
        graph: &mut G,
    ) -> Result<(Vec<AnimationStep>, PathfindingResult), SearchError> {
        let mut steps = Vec::new();
        loop {
            match self.next(graph)? {
                Progress::Step(step) => steps.push(step),
                Progress::Done(result) => return Ok((steps, result)),
            }
        }
    }

    fn seed<G: SearchGraph + ?Sized>(&mut self, graph: &mut G) -> Result<Progress, SearchError> {
        let (Some(start), Some(end)) = (graph.start(), graph.end()) else {
            log::debug!("{}: start or end missing, nothing to search", self.algorithm);
            return Ok(Progress::Done(PathfindingResult::not_found(0)));
        };
        self.start = start;
        self.end = end;
        self.node_count = graph.node_count();
        log::debug!(
            "{}: searching {} nodes from {start} to {end}",
            self.algorithm,
            self.node_count
        );

        match &mut self.frontier {
            Frontier::Fifo(q) => bfs::seed(q, graph, start)?,
            Frontier::Lifo(s) => dfs::seed(s, graph, start)?,
            Frontier::Cost(h) => dijkstra::seed(h, graph, start)?,
            Frontier::Greedy(h) => gbfs::seed(h, graph, start, end)?,
            Frontier::Estimate(h) => astar::seed(h, graph, start, end)?,
        }
        self.expand_next(graph)
    }

    fn expand_next<G: SearchGraph + ?Sized>(
        &mut self,
        graph: &mut G,
    ) -> Result<Progress, SearchError> {
        let found = graph.node_count();
        if found != self.node_count {
            return Err(SearchError::GraphResized {
                expected: self.node_count,
                found,
            });
        }

        loop {
            let Some(id) = self.frontier.pop() else {
                log::debug!(
                    "{}: frontier exhausted after {} visits",
                    self.algorithm,
                    self.nodes_visited
                );
                return Ok(Progress::Done(PathfindingResult::not_found(
                    self.nodes_visited,
                )));
            };

            let node = node_mut(graph, id)?;
            if node.is_visited {
                continue;
            }
            node.is_visited = true;
            self.nodes_visited += 1;

            if id == self.end {
                self.phase = Phase::Reached;
            } else {
                self.expand(graph, id)?;
                self.phase = Phase::Expanding;
            }
            return Ok(Progress::Step(AnimationStep::Visit(vec![id])));
        }
    }

    fn expand<G: SearchGraph + ?Sized>(
        &mut self,
        graph: &mut G,
        current: NodeId,
    ) -> Result<(), SearchError> {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        graph.neighbors(current, &mut nbuf);

        let end = self.end;
        let res = match &mut self.frontier {
            Frontier::Fifo(q) => bfs::relax(q, graph, current, &nbuf),
            Frontier::Lifo(s) => dfs::relax(s, graph, current, &nbuf),
            Frontier::Cost(h) => dijkstra::relax(h, graph, current, &nbuf),
            Frontier::Greedy(h) => gbfs::relax(h, graph, current, end, &nbuf),
            Frontier::Estimate(h) => astar::relax(h, graph, current, end, &nbuf),
        };

        self.nbuf = nbuf;
        res
    }

    fn trace_path<G: SearchGraph + ?Sized>(
        &mut self,
        graph: &mut G,
    ) -> Result<Progress, SearchError> {
        let mut path = Vec::new();
        let mut cur = Some(self.end);
        while let Some(id) = cur {
            // Parent links form a tree; a longer chain means corruption.
            if path.len() >= self.node_count {
                return Err(SearchError::BrokenPath(self.end));
            }
            let node = node_mut(graph, id)?;
            node.is_path = true;
            path.push(id);
            cur = node.parent;
        }
        path.reverse();
        if path.first() != Some(&self.start) {
            return Err(SearchError::BrokenPath(self.end));
        }

        self.phase = Phase::Complete(PathfindingResult {
            found: true,
            nodes_visited: self.nodes_visited,
            path: path.clone(),
        });
        Ok(Progress::Step(AnimationStep::Path(path)))
    }
}

// ---------------------------------------------------------------------------
// Helpers shared by the algorithm modules
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn node<G: SearchGraph + ?Sized>(graph: &G, id: NodeId) -> Result<&Node, SearchError> {
    graph.node(id).ok_or(SearchError::UnknownNode(id))
}

#[inline]
pub(crate) fn node_mut<G: SearchGraph + ?Sized>(
    graph: &mut G,
    id: NodeId,
) -> Result<&mut Node, SearchError> {
    graph.node_mut(id).ok_or(SearchError::UnknownNode(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{GridGraph, Point, map};

    // S . . . .
    // . . . . .
    // . . . . .
    // . . . . .
    // . . . . E
    const OPEN: &str = "
        S....
        .....
        .....
        .....
        ....E
    ";

    // S . . . .
    // . . . . .
    // # # # # #
    // . . . . .
    // . . . . E
    const SPLIT: &str = "
        S....
        .....
        #####
        .....
        ....E
    ";

    // S . . . .
    // # # # # .
    // . . . . .
    // . . . . .
    // . . . . E
    const DETOUR: &str = "
        S....
        ####.
        .....
        .....
        ....E
    ";

    const MAZE: &str = "
        S.#.......
        .##.####..
        ....#..#.#
        ##.##.##..
        ...#...#.#
        .#...#....
        .####.###.
        ......#..E
    ";

    fn grid(s: &str) -> GridGraph {
        map::parse(s).unwrap()
    }

    fn run(algorithm: Algorithm, g: &mut GridGraph) -> (Vec<AnimationStep>, PathfindingResult) {
        g.reset(true);
        Search::new(algorithm).run_to_end(g).unwrap()
    }

    fn assert_valid_path(g: &GridGraph, path: &[NodeId]) {
        assert_eq!(path.first().copied(), g.start());
        assert_eq!(path.last().copied(), g.end());
        for w in path.windows(2) {
            let (a, b) = (g.pos(w[0]).unwrap(), g.pos(w[1]).unwrap());
            assert!(a.is_adjacent(b), "{a} -> {b} is not a step");
        }
        for &id in path {
            let n = g.node(id).unwrap();
            assert!(n.walkable());
            assert!(n.is_path);
        }
    }

    #[test]
    fn every_algorithm_finds_a_path_on_open_grid() {
        for a in Algorithm::ALL {
            let mut g = grid(OPEN);
            let (steps, result) = run(a, &mut g);
            assert!(result.found, "{a}");
            assert_valid_path(&g, &result.path);
            assert_eq!(steps.last(), Some(&AnimationStep::Path(result.path.clone())));
            let visits = steps.iter().filter(|s| !s.is_path()).count();
            assert_eq!(visits, result.nodes_visited, "{a}");
        }
    }

    #[test]
    fn bfs_open_grid_scenario() {
        let mut g = grid(OPEN);
        let (_, result) = run(Algorithm::Bfs, &mut g);
        assert!(result.found);
        assert_eq!(result.path_length(), 9);
        assert!(result.nodes_visited <= 25);
    }

    #[test]
    fn wall_across_row_blocks_every_algorithm() {
        for a in Algorithm::ALL {
            let mut g = grid(SPLIT);
            let (steps, result) = run(a, &mut g);
            assert!(!result.found, "{a}");
            assert!(result.path.is_empty());
            assert_eq!(result.path_length(), 0);
            // Exactly the two rows above the wall are reachable.
            assert_eq!(result.nodes_visited, 10, "{a}");
            assert!(steps.iter().all(|s| !s.is_path()));
            assert!(g.nodes().iter().all(|n| !n.is_path));
        }
    }

    #[test]
    fn detour_is_found_by_every_algorithm() {
        for a in Algorithm::ALL {
            let mut g = grid(DETOUR);
            let (_, result) = run(a, &mut g);
            assert!(result.found, "{a}");
            assert!(result.path_length() > 6);
            assert_valid_path(&g, &result.path);
        }
    }

    #[test]
    fn enclosed_start_or_end_is_unreachable() {
        let mut boxed_start = grid(OPEN);
        boxed_start.set_walkable(Point::new(1, 0), false);
        boxed_start.set_walkable(Point::new(0, 1), false);
        let mut boxed_end = grid(OPEN);
        boxed_end.set_walkable(Point::new(3, 4), false);
        boxed_end.set_walkable(Point::new(4, 3), false);

        for a in Algorithm::ALL {
            let (_, r) = run(a, &mut boxed_start);
            assert!(!r.found);
            assert_eq!(r.nodes_visited, 1);
            let (_, r) = run(a, &mut boxed_end);
            assert!(!r.found);
            assert_eq!(r.nodes_visited, 22);
        }
    }

    #[test]
    fn visit_steps_are_walkable_and_fresh() {
        for a in Algorithm::ALL {
            let mut g = grid(MAZE);
            g.reset(true);
            let mut search = Search::new(a);
            let mut seen = std::collections::HashSet::new();
            loop {
                // Snapshot visited flags before the pull.
                let before: Vec<bool> = g.nodes().iter().map(|n| n.is_visited).collect();
                match search.next(&mut g).unwrap() {
                    Progress::Step(AnimationStep::Visit(nodes)) => {
                        for id in nodes {
                            assert!(g.node(id).unwrap().walkable());
                            assert!(!before[id.index()], "{a} revisited {id}");
                            assert!(seen.insert(id));
                        }
                    }
                    Progress::Step(AnimationStep::Path(_)) => {}
                    Progress::Done(r) => {
                        assert!(r.found);
                        assert_eq!(r.nodes_visited, seen.len());
                        break;
                    }
                }
            }
        }
    }

    #[test]
    fn bfs_and_dijkstra_agree_on_length() {
        for m in [OPEN, DETOUR, MAZE] {
            let mut g = grid(m);
            let (_, b) = run(Algorithm::Bfs, &mut g);
            let (_, d) = run(Algorithm::Dijkstra, &mut g);
            let (_, a) = run(Algorithm::Astar, &mut g);
            assert_eq!(b.path_length(), d.path_length());
            assert_eq!(b.path_length(), a.path_length());
        }
    }

    #[test]
    fn astar_never_visits_more_than_bfs() {
        for m in [OPEN, SPLIT, DETOUR, MAZE] {
            let mut g = grid(m);
            let (_, b) = run(Algorithm::Bfs, &mut g);
            let (_, a) = run(Algorithm::Astar, &mut g);
            assert!(a.nodes_visited <= b.nodes_visited, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn start_equals_end_is_single_node_path() {
        for a in Algorithm::ALL {
            let mut g = GridGraph::new(3, 3);
            g.set_start(Point::new(1, 1));
            g.set_end(Point::new(1, 1));
            let (_, r) = run(a, &mut g);
            assert!(r.found);
            assert_eq!(r.path, vec![g.start().unwrap()]);
            assert_eq!(r.nodes_visited, 1);
        }
    }

    #[test]
    fn missing_endpoints_finish_immediately() {
        for a in Algorithm::ALL {
            let mut g = GridGraph::new(0, 0);
            let mut search = Search::new(a);
            assert_eq!(
                search.next(&mut g),
                Ok(Progress::Done(PathfindingResult::not_found(0)))
            );
            assert!(search.is_finished());
        }
    }

    #[test]
    fn pulling_after_done_is_an_error() {
        let mut g = grid(OPEN);
        let mut search = Search::new(Algorithm::Bfs);
        while let Ok(Progress::Step(_)) = search.next(&mut g) {}
        assert!(search.is_finished());
        assert_eq!(search.next(&mut g), Err(SearchError::Finished));
    }

    #[test]
    fn swapping_the_graph_mid_search_fails() {
        let mut g = grid(OPEN);
        let mut search = Search::new(Algorithm::Dijkstra);
        assert!(matches!(search.next(&mut g), Ok(Progress::Step(_))));
        let mut other = GridGraph::new(3, 3);
        assert_eq!(
            search.next(&mut other),
            Err(SearchError::GraphResized {
                expected: 25,
                found: 9
            })
        );
        assert!(search.is_finished());
    }

    #[test]
    fn reset_makes_runs_independent() {
        let mut g = grid(MAZE);
        let (steps1, r1) = run(Algorithm::Astar, &mut g);
        let (steps2, r2) = run(Algorithm::Astar, &mut g);
        assert_eq!(steps1, steps2);
        assert_eq!(r1, r2);
    }
}
