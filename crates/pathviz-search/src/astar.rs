//! A*: frontier ordered by `g + h`, ties going to the smaller `h`.

use pathviz_core::{IndexedHeap, NodeId};

use crate::search::{node, node_mut};
use crate::step::SearchError;
use crate::traits::SearchGraph;

pub(crate) fn seed<G: SearchGraph + ?Sized>(
    open: &mut IndexedHeap<NodeId, (f64, f64)>,
    graph: &mut G,
    start: NodeId,
    end: NodeId,
) -> Result<(), SearchError> {
    let h = graph.heuristic(start, end);
    let n = node_mut(graph, start)?;
    n.g_cost = 0.0;
    n.h_cost = h;
    n.parent = None;
    open.insert(start, (h, h));
    Ok(())
}

/// Relax every edge out of `current`, updating both costs on improvement.
pub(crate) fn relax<G: SearchGraph + ?Sized>(
    open: &mut IndexedHeap<NodeId, (f64, f64)>,
    graph: &mut G,
    current: NodeId,
    end: NodeId,
    neighbors: &[NodeId],
) -> Result<(), SearchError> {
    let current_g = node(graph, current)?.g_cost;
    for &nid in neighbors {
        let tentative = current_g + graph.distance(current, nid);
        let h = graph.heuristic(nid, end);
        let n = node_mut(graph, nid)?;
        if n.is_visited || tentative >= n.g_cost {
            continue;
        }
        n.g_cost = tentative;
        n.h_cost = h;
        n.parent = Some(current);

        let key = (tentative + h, h);
        if open.has(&nid) {
            open.decrease_key(nid, key);
        } else {
            open.insert(nid, key);
        }
    }
    Ok(())
}
