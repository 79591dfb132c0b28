//! Breadth-first search: FIFO frontier, first discovery wins.

use std::collections::VecDeque;

use pathviz_core::NodeId;

use crate::search::{node, node_mut};
use crate::step::SearchError;
use crate::traits::SearchGraph;

pub(crate) fn seed<G: SearchGraph + ?Sized>(
    queue: &mut VecDeque<NodeId>,
    graph: &mut G,
    start: NodeId,
) -> Result<(), SearchError> {
    let n = node_mut(graph, start)?;
    n.g_cost = 0.0;
    n.parent = None;
    queue.push_back(start);
    Ok(())
}

/// Queue every undiscovered neighbour. A finite `g` marks discovery, so
/// each node enters the queue at most once.
pub(crate) fn relax<G: SearchGraph + ?Sized>(
    queue: &mut VecDeque<NodeId>,
    graph: &mut G,
    current: NodeId,
    neighbors: &[NodeId],
) -> Result<(), SearchError> {
    let current_g = node(graph, current)?.g_cost;
    for &nid in neighbors {
        let step = graph.distance(current, nid);
        let n = node_mut(graph, nid)?;
        if n.is_visited || n.g_cost.is_finite() {
            continue;
        }
        n.g_cost = current_g + step;
        n.parent = Some(current);
        queue.push_back(nid);
    }
    Ok(())
}
