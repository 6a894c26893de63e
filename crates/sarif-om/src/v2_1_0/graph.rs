//! Graphs and graph traversals.

use indexmap::IndexMap;

use crate::{
    list::NodeList,
    property_bag::PropertyBag,
    v2_1_0::{Location, Message, MultiformatMessageString},
    wire::Sentinel,
};

sarif_node! {
    /// A network of nodes and directed edges that describes some aspect of the structure of the
    /// code (for example, a call graph).
    pub struct Graph {
        /// A description of the graph.
        pub description: Option<Message>,
        /// An array of node objects representing the nodes of the graph.
        pub nodes: Option<NodeList<Node>>,
        /// An array of edge objects representing the edges of the graph.
        pub edges: Option<NodeList<Edge>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Represents a node in a graph.
    pub struct Node {
        /// A string that uniquely identifies the node within its graph.
        pub id: String,
        /// A short description of the node.
        pub label: Option<Message>,
        /// A code location associated with the node.
        pub location: Option<Location>,
        /// Array of child nodes.
        pub children: Option<NodeList<Node>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Represents a directed edge in a graph.
    pub struct Edge {
        /// A string that uniquely identifies the edge within its graph.
        pub id: String,
        /// A short description of the edge.
        pub label: Option<Message>,
        /// Identifies the source node (the node at which the edge starts).
        pub source_node_id: String,
        /// Identifies the target node (the node at which the edge ends).
        pub target_node_id: String,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Represents a path through a graph.
    pub struct GraphTraversal {
        /// The index within the run.graphs to be associated with the result.
        pub run_graph_index: Sentinel,
        /// The index within the result.graphs to be associated with the result.
        pub result_graph_index: Sentinel,
        /// A description of this graph traversal.
        pub description: Option<Message>,
        /// Values of relevant expressions at the start of the graph traversal that may change during graph traversal.
        pub initial_state: Option<IndexMap<String, MultiformatMessageString>>,
        /// Values of relevant expressions at the start of the graph traversal that remain constant for the graph traversal.
        pub immutable_state: Option<IndexMap<String, MultiformatMessageString>>,
        /// The sequences of edges traversed by this graph traversal.
        pub edge_traversals: Option<NodeList<EdgeTraversal>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Represents the traversal of a single edge during a graph traversal.
    pub struct EdgeTraversal {
        /// Identifies the edge being traversed.
        pub edge_id: String,
        /// A message to display to the user as the edge is traversed.
        pub message: Option<Message>,
        /// The values of relevant expressions after the edge has been traversed.
        pub final_state: Option<IndexMap<String, MultiformatMessageString>>,
        /// The number of edge traversals necessary to return from a nested graph.
        pub step_over_edge_count: Option<i64>,
        pub properties: Option<PropertyBag>,
    }
}

impl Graph {
    /// Finds a node by id, searching nested children depth-first.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.as_ref()?.iter().find_map(|node| node.find(id))
    }
}

impl Node {
    /// Creates a node with the given `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }

        self.children
            .as_ref()?
            .iter()
            .find_map(|child| child.find(id))
    }
}

impl Edge {
    /// Creates an edge `id` from `source` to `target`.
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_node_id: source.into(),
            target_node_id: target.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Edge, Graph, GraphTraversal, Node};
    use crate::{hash::ValueHash, list::NodeList};

    fn graph() -> Graph {
        Graph {
            nodes: Some(NodeList::from([
                Node {
                    children: Some(NodeList::from([Node::new("inner")])),
                    ..Node::new("outer")
                },
                Node::new("other"),
            ])),
            edges: Some(NodeList::from([Edge::new("e1", "outer", "other")])),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_nested_node() {
        let graph = graph();
        assert!(graph.node("inner").is_some());
        assert!(graph.node("other").is_some());
        assert!(graph.node("missing").is_none());
    }

    #[test]
    fn test_nested_clone_is_deep() {
        let graph = graph();
        let mut cloned = graph.clone();
        assert_eq!(graph, cloned);
        assert_eq!(graph.value_hash(), cloned.value_hash());

        let inner = cloned.nodes.as_mut().unwrap()[0]
            .as_mut()
            .unwrap()
            .children
            .as_mut()
            .unwrap()
            .get_mut(0)
            .unwrap();
        inner.id = "renamed".into();

        assert!(graph.node("inner").is_some());
        assert_ne!(graph, cloned);
    }

    #[test]
    fn test_graph_traversal_defaults() {
        let traversal = GraphTraversal::default();
        assert!(traversal.run_graph_index.is_unset());
        assert!(traversal.result_graph_index.is_unset());
    }
}
