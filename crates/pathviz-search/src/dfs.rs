//! Depth-first search: LIFO frontier.
//!
//! Unvisited neighbours are pushed every time they are seen so the
//! traversal stays depth-first; the parent link is only set the first time.
//! Duplicate stack entries are dropped when popped.

use pathviz_core::NodeId;

use crate::search::{node, node_mut};
use crate::step::SearchError;
use crate::traits::SearchGraph;

pub(crate) fn seed<G: SearchGraph + ?Sized>(
    stack: &mut Vec<NodeId>,
    graph: &mut G,
    start: NodeId,
) -> Result<(), SearchError> {
    let n = node_mut(graph, start)?;
    n.g_cost = 0.0;
    n.parent = None;
    stack.push(start);
    Ok(())
}

pub(crate) fn relax<G: SearchGraph + ?Sized>(
    stack: &mut Vec<NodeId>,
    graph: &mut G,
    current: NodeId,
    neighbors: &[NodeId],
) -> Result<(), SearchError> {
    let current_g = node(graph, current)?.g_cost;
    for &nid in neighbors {
        let step = graph.distance(current, nid);
        let n = node_mut(graph, nid)?;
        if n.is_visited {
            continue;
        }
        if n.g_cost.is_infinite() {
            n.g_cost = current_g + step;
            n.parent = Some(current);
        }
        stack.push(nid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pathviz_core::{GridGraph, Point};

    use crate::{Algorithm, Search};

    #[test]
    fn dfs_dives_before_widening() {
        // Last pushed neighbour (right) is expanded first.
        let mut g = GridGraph::new(4, 4);
        g.set_start(Point::new(0, 0));
        g.set_end(Point::new(3, 3));
        let (steps, result) = Search::new(Algorithm::Dfs).run_to_end(&mut g).unwrap();
        assert!(result.found);
        let first: Vec<Point> = steps
            .iter()
            .take(4)
            .map(|s| g.pos(s.nodes()[0]).unwrap())
            .collect();
        assert_eq!(
            first,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0),
            ]
        );
    }

    #[test]
    fn dfs_path_need_not_be_shortest() {
        let mut g = GridGraph::new(5, 5);
        g.set_start(Point::new(0, 0));
        g.set_end(Point::new(0, 4));
        let (_, dfs) = Search::new(Algorithm::Dfs).run_to_end(&mut g).unwrap();
        g.reset(true);
        let (_, bfs) = Search::new(Algorithm::Bfs).run_to_end(&mut g).unwrap();
        assert!(dfs.found && bfs.found);
        assert_eq!(bfs.path_length(), 5);
        assert!(dfs.path_length() >= bfs.path_length());
    }
}
