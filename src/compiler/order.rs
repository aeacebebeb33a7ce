use crate::graph::{Adjacency, GraphModel, NodeKind};
use ahash::AHashMap;

/// Action ids in the order a strictly linear, trigger-rooted chain of directed
/// edges visits them.
///
/// Returns `None` unless following edges from the first trigger walks a
/// single path (no branching, no cycles) that reaches every action. Only used
/// for diagnostics; compilation always keeps node-array order.
pub fn edge_chain_order(graph: &GraphModel) -> Option<Vec<String>> {
    let adjacency = Adjacency::undirected(graph);
    let start = graph
        .nodes
        .iter()
        .position(|n| n.kind() == NodeKind::Trigger)?;

    let mut successors: AHashMap<usize, Vec<usize>> = AHashMap::new();
    for edge in &graph.edges {
        if let (Some(s), Some(t)) = (adjacency.index_of(&edge.source), adjacency.index_of(&edge.target)) {
            successors.entry(s).or_default().push(t);
        }
    }

    let mut visited = vec![false; graph.len()];
    let mut order = Vec::new();
    let mut current = start;
    loop {
        if visited[current] {
            return None;
        }
        visited[current] = true;

        let node = &graph.nodes[current];
        if node.kind() == NodeKind::Action {
            order.push(node.id.clone());
        }

        match successors.get(&current).map(Vec::as_slice) {
            None | Some([]) => break,
            Some([next]) => current = *next,
            Some(_) => return None,
        }
    }

    let action_count = graph.nodes_of_kind(NodeKind::Action).count();
    (order.len() == action_count).then_some(order)
}
