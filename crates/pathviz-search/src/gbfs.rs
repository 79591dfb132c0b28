//! Greedy best-first search: frontier ordered by the heuristic alone.

use pathviz_core::{IndexedHeap, NodeId};

use crate::search::node_mut;
use crate::step::SearchError;
use crate::traits::SearchGraph;

pub(crate) fn seed<G: SearchGraph + ?Sized>(
    open: &mut IndexedHeap<NodeId>,
    graph: &mut G,
    start: NodeId,
    end: NodeId,
) -> Result<(), SearchError> {
    let h = graph.heuristic(start, end);
    let n = node_mut(graph, start)?;
    n.h_cost = h;
    n.parent = None;
    open.insert(start, h);
    Ok(())
}

/// Queue undiscovered neighbours keyed by `h`. No cost is accumulated and a
/// node's `h` never changes, so queued nodes are left alone.
pub(crate) fn relax<G: SearchGraph + ?Sized>(
    open: &mut IndexedHeap<NodeId>,
    graph: &mut G,
    current: NodeId,
    end: NodeId,
    neighbors: &[NodeId],
) -> Result<(), SearchError> {
    for &nid in neighbors {
        if open.has(&nid) {
            continue;
        }
        let h = graph.heuristic(nid, end);
        let n = node_mut(graph, nid)?;
        if n.is_visited {
            continue;
        }
        n.h_cost = h;
        n.parent = Some(current);
        open.insert(nid, h);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pathviz_core::{Point, map};

    use crate::{Algorithm, Search};

    #[test]
    fn greedy_heads_straight_for_the_goal() {
        let mut g = map::parse(
            "
            S......
            .......
            ......E
            ",
        )
        .unwrap();
        let (_, r) = Search::new(Algorithm::Gbfs).run_to_end(&mut g).unwrap();
        assert!(r.found);
        // Only the nodes on the path get expanded in an open field.
        assert_eq!(r.nodes_visited, r.path_length());
        assert_eq!(g.pos(r.path[1]), Some(Point::new(0, 1)));
    }
}
