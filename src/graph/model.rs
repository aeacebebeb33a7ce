use super::node::{Node, NodeData, NodeKind, NodePatch, Position};
use crate::error::GraphError;
use crate::ui::{UiEdge, UiGraph};
use serde::{Deserialize, Serialize};

/// A connection between two nodes. Direction is only meaningful for display
/// and for the edge-order diagnostic; connectivity treats edges as undirected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl From<UiEdge> for Edge {
    fn from(raw: UiEdge) -> Self {
        Self {
            id: raw.id,
            source: raw.source,
            target: raw.target,
        }
    }
}

/// The editor's working set of nodes and edges.
///
/// No invariants are enforced here. Any shape can be represented, including
/// graphs with no trigger or with dangling edges, so the editor stays usable
/// while a workflow is half-built. [`GraphValidator`](crate::validator::GraphValidator)
/// decides whether a graph may be saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes of one kind, in node-array order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    /// Adds an empty node of `kind` at the origin and returns a copy of it.
    pub fn add_node(&mut self, kind: NodeKind) -> Node {
        self.add_node_at(kind, Position::default())
    }

    pub fn add_node_at(&mut self, kind: NodeKind, position: Position) -> Node {
        let id = self.next_node_id(kind);
        let node = Node::new(id, position, NodeData::empty(kind));
        self.nodes.push(node.clone());
        node
    }

    /// Appends a fully built node, keeping its id as given.
    pub fn insert_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Removes a node together with every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        let removed = self.nodes.remove(index);
        self.edges.retain(|e| e.source != id && e.target != id);
        Some(removed)
    }

    pub fn connect(&mut self, source: &str, target: &str) -> Edge {
        let base = format!("e-{}-{}", source, target);
        let mut id = base.clone();
        let mut suffix = 1;
        while self.edges.iter().any(|e| e.id == id) {
            suffix += 1;
            id = format!("{}-{}", base, suffix);
        }

        let edge = Edge {
            id,
            source: source.to_string(),
            target: target.to_string(),
        };
        self.edges.push(edge.clone());
        edge
    }

    pub fn disconnect(&mut self, edge_id: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == edge_id)?;
        Some(self.edges.remove(index))
    }

    /// Applies `patches` to a node's data as one copy-on-write update.
    ///
    /// The data is cloned, patched, then swapped in. If any patch does not
    /// fit the node's kind, the node is left untouched.
    pub fn update_node_data(
        &mut self,
        id: &str,
        patches: impl IntoIterator<Item = NodePatch>,
    ) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound {
                node_id: id.to_string(),
            })?;

        let mut data = node.data.clone();
        for patch in patches {
            patch
                .apply(&mut data)
                .map_err(|field| GraphError::PatchMismatch {
                    node_id: id.to_string(),
                    kind: node.kind(),
                    field,
                })?;
        }
        node.data = data;
        Ok(())
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound {
                node_id: id.to_string(),
            })?;
        node.position = position;
        Ok(())
    }

    fn next_node_id(&self, kind: NodeKind) -> String {
        let mut counter = self.nodes_of_kind(kind).count() + 1;
        loop {
            let id = format!("{}-{}", kind, counter);
            if self.node(&id).is_none() {
                return id;
            }
            counter += 1;
        }
    }
}

impl TryFrom<UiGraph> for GraphModel {
    type Error = GraphError;

    fn try_from(raw: UiGraph) -> Result<Self, Self::Error> {
        let nodes = raw
            .nodes
            .into_iter()
            .map(Node::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let edges = raw.edges.into_iter().map(Edge::from).collect();
        Ok(GraphModel { nodes, edges })
    }
}
