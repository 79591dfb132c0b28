//! Step-by-step search algorithms for grid graphs.
//!
//! Every algorithm runs as a [`Search`], a pull-based producer: each call to
//! [`Search::next`] performs one expansion and returns the resulting
//! [`AnimationStep`], until the terminal [`PathfindingResult`] is returned.
//! The caller decides the pace, which is what the animation controller
//! builds on.
//!
//! | Algorithm | Frontier | Shortest path |
//! |---|---|---|
//! | [`Algorithm::Bfs`] | FIFO queue | yes (unit cost) |
//! | [`Algorithm::Dfs`] | LIFO stack | no |
//! | [`Algorithm::Dijkstra`] | [`IndexedHeap`](pathviz_core::IndexedHeap) on `g` | yes |
//! | [`Algorithm::Gbfs`] | heap on `h` | no |
//! | [`Algorithm::Astar`] | heap on `(g + h, h)` | yes (admissible `h`) |

mod algorithm;
mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod gbfs;
mod search;
mod step;
mod traits;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use search::Search;
pub use step::{AnimationStep, PathfindingResult, Progress, SearchError};
pub use traits::SearchGraph;

use pathviz_core::GridGraph;

/// Reset `graph` (keeping walls) and run `algorithm` to completion.
pub fn solve(algorithm: Algorithm, graph: &mut GridGraph) -> Result<PathfindingResult, SearchError> {
    graph.reset(true);
    Search::new(algorithm)
        .run_to_end(graph)
        .map(|(_, result)| result)
}
