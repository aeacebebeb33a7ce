use super::model::GraphModel;
use ahash::AHashMap;
use std::collections::VecDeque;

/// Undirected adjacency over a [`GraphModel`], indexed by node position in
/// the node array.
///
/// Edges whose source or target does not name a node are skipped.
pub struct Adjacency<'a> {
    index: AHashMap<&'a str, usize>,
    neighbours: Vec<Vec<usize>>,
    incident: Vec<bool>,
}

impl<'a> Adjacency<'a> {
    pub fn undirected(graph: &'a GraphModel) -> Self {
        let index: AHashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let mut neighbours = vec![Vec::new(); graph.nodes.len()];
        let mut incident = vec![false; graph.nodes.len()];

        for edge in &graph.edges {
            let (Some(&s), Some(&t)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            neighbours[s].push(t);
            neighbours[t].push(s);
            incident[s] = true;
            incident[t] = true;
        }

        Self {
            index,
            neighbours,
            incident,
        }
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Whether the node at `idx` touches at least one edge.
    pub fn is_incident(&self, idx: usize) -> bool {
        self.incident.get(idx).copied().unwrap_or(false)
    }

    /// Breadth-first traversal from `start`; returns the visited flags.
    pub fn reachable_from(&self, start: usize) -> Vec<bool> {
        let mut visited = vec![false; self.neighbours.len()];
        if start >= visited.len() {
            return visited;
        }

        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(current) = queue.pop_front() {
            for &next in &self.neighbours[current] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        visited
    }
}
