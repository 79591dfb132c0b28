//! Dijkstra: frontier ordered by accumulated cost `g`.

use pathviz_core::{IndexedHeap, NodeId};

use crate::search::{node, node_mut};
use crate::step::SearchError;
use crate::traits::SearchGraph;

pub(crate) fn seed<G: SearchGraph + ?Sized>(
    open: &mut IndexedHeap<NodeId>,
    graph: &mut G,
    start: NodeId,
) -> Result<(), SearchError> {
    let n = node_mut(graph, start)?;
    n.g_cost = 0.0;
    n.parent = None;
    open.insert(start, 0.0);
    Ok(())
}

/// Relax every edge out of `current`, lowering queued keys in place.
pub(crate) fn relax<G: SearchGraph + ?Sized>(
    open: &mut IndexedHeap<NodeId>,
    graph: &mut G,
    current: NodeId,
    neighbors: &[NodeId],
) -> Result<(), SearchError> {
    let current_g = node(graph, current)?.g_cost;
    for &nid in neighbors {
        let tentative = current_g + graph.distance(current, nid);
        let n = node_mut(graph, nid)?;
        if n.is_visited || tentative >= n.g_cost {
            continue;
        }
        n.g_cost = tentative;
        n.parent = Some(current);
        if open.has(&nid) {
            open.decrease_key(nid, tentative);
        } else {
            open.insert(nid, tentative);
        }
    }
    Ok(())
}
