//! Device connectivity graph
//!
//! Vertices are `(component, port)` pairs, edges are channels between two of
//! them. Every vertex and edge is tagged with a [`Layer`] so later stages can
//! work one plane at a time or on the device as a whole.
//!
//! The graph trusts its caller: [`DeviceGraph::add_edge`] records whatever
//! endpoints it is given, even ones that were never added as vertices. Such
//! edges are reported by [`DeviceGraph::dangling_edges`].

use crate::component::Layer;
use serde::Serialize;
use std::collections::HashMap;
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

/// Interned `(component, port)` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct VertexKey {
    component: DefaultSymbol,
    port: u32,
}

/// A component port, as seen by graph consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Vertex<'g> {
    pub component: &'g str,
    pub port: u32,
    pub layer: Layer,
}

/// An undirected channel connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<'g> {
    pub source: (&'g str, u32),
    pub target: (&'g str, u32),
    pub layer: Layer,
}

#[derive(Debug, Clone, Copy)]
struct EdgeRecord {
    source: VertexKey,
    target: VertexKey,
    layer: Layer,
}

/// Per-layer multigraph over component ports
#[derive(Debug, Default)]
pub struct DeviceGraph {
    names: StringInterner<DefaultBackend>,
    /// Vertices in insertion order
    vertices: Vec<(VertexKey, Layer)>,
    vertex_index: HashMap<VertexKey, usize>,
    edges: Vec<EdgeRecord>,
}

impl DeviceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(&mut self, component: &str, port: u32) -> VertexKey {
        VertexKey {
            component: self.names.get_or_intern(component),
            port,
        }
    }

    fn lookup(&self, component: &str, port: u32) -> Option<VertexKey> {
        self.names
            .get(component)
            .map(|component| VertexKey { component, port })
    }

    fn name(&self, symbol: DefaultSymbol) -> &str {
        self.names
            .resolve(symbol)
            .expect("symbol was interned by this graph")
    }

    /// Add the vertex `(component, port)` on `layer`.
    ///
    /// Adding an existing vertex again is a no-op; the layer it was first
    /// added with is kept.
    pub fn add_vertex(&mut self, component: &str, port: u32, layer: Layer) {
        let key = self.key(component, port);
        if self.vertex_index.contains_key(&key) {
            return;
        }
        self.vertex_index.insert(key, self.vertices.len());
        self.vertices.push((key, layer));
    }

    /// Connect `(source, source_port)` and `(target, target_port)`.
    ///
    /// Endpoints are not checked against the vertex set.
    pub fn add_edge(
        &mut self,
        source: &str,
        source_port: u32,
        target: &str,
        target_port: u32,
        layer: Layer,
    ) {
        let source = self.key(source, source_port);
        let target = self.key(target, target_port);
        self.edges.push(EdgeRecord {
            source,
            target,
            layer,
        });
    }

    pub fn contains_vertex(&self, component: &str, port: u32) -> bool {
        self.lookup(component, port)
            .is_some_and(|key| self.vertex_index.contains_key(&key))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Layer a vertex was registered on
    pub fn vertex_layer(&self, component: &str, port: u32) -> Option<Layer> {
        let key = self.lookup(component, port)?;
        self.vertex_index.get(&key).map(|&i| self.vertices[i].1)
    }

    /// Every vertex regardless of layer, in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = Vertex<'_>> {
        self.vertices.iter().map(move |&(key, layer)| Vertex {
            component: self.name(key.component),
            port: key.port,
            layer,
        })
    }

    pub fn vertices_on(&self, layer: Layer) -> impl Iterator<Item = Vertex<'_>> {
        self.vertices().filter(move |v| v.layer == layer)
    }

    fn view(&self, edge: &EdgeRecord) -> Edge<'_> {
        Edge {
            source: (self.name(edge.source.component), edge.source.port),
            target: (self.name(edge.target.component), edge.target.port),
            layer: edge.layer,
        }
    }

    /// Every edge regardless of layer, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.edges.iter().map(move |edge| self.view(edge))
    }

    pub fn edges_on(&self, layer: Layer) -> impl Iterator<Item = Edge<'_>> {
        self.edges().filter(move |e| e.layer == layer)
    }

    /// Ports connected to `(component, port)`, one entry per edge
    pub fn neighbors(&self, component: &str, port: u32) -> Vec<(&str, u32)> {
        let Some(key) = self.lookup(component, port) else {
            return Vec::new();
        };
        self.edges
            .iter()
            .filter_map(|edge| {
                if edge.source == key {
                    Some(edge.target)
                } else if edge.target == key {
                    Some(edge.source)
                } else {
                    None
                }
            })
            .map(|other| (self.name(other.component), other.port))
            .collect()
    }

    /// Number of edge ends at `(component, port)`; a self-loop counts twice
    pub fn degree(&self, component: &str, port: u32) -> usize {
        let Some(key) = self.lookup(component, port) else {
            return 0;
        };
        self.edges
            .iter()
            .map(|edge| usize::from(edge.source == key) + usize::from(edge.target == key))
            .sum()
    }

    /// Whether either end of `edge` is missing from the vertex set
    pub fn is_dangling(&self, edge: &Edge<'_>) -> bool {
        !self.contains_vertex(edge.source.0, edge.source.1)
            || !self.contains_vertex(edge.target.0, edge.target.1)
    }

    /// Edges with at least one endpoint that is not a registered vertex
    pub fn dangling_edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.edges().filter(move |edge| self.is_dangling(edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn four_ports(graph: &mut DeviceGraph, id: &str, layer: Layer) {
        for port in 1..=4 {
            graph.add_vertex(id, port, layer);
        }
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = DeviceGraph::new();
        graph.add_vertex("a", 1, Layer::Flow);
        graph.add_vertex("a", 1, Layer::Control);
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.vertex_layer("a", 1), Some(Layer::Flow));
    }

    #[test]
    fn test_edge_between_ports() {
        let mut graph = DeviceGraph::new();
        four_ports(&mut graph, "a", Layer::Flow);
        four_ports(&mut graph, "b", Layer::Flow);
        graph.add_edge("a", 1, "b", 1, Layer::Flow);

        assert_eq!(graph.vertex_count(), 8);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors("a", 1), vec![("b", 1)]);
        assert_eq!(graph.neighbors("b", 1), vec![("a", 1)]);
        assert!(graph.neighbors("a", 2).is_empty());
        assert_eq!(graph.degree("a", 1), 1);
        assert_eq!(graph.dangling_edges().count(), 0);
    }

    #[test]
    fn test_parallel_edges_and_self_loop() {
        let mut graph = DeviceGraph::new();
        four_ports(&mut graph, "n", Layer::Flow);
        graph.add_edge("n", 1, "n", 2, Layer::Flow);
        graph.add_edge("n", 1, "n", 2, Layer::Flow);
        graph.add_edge("n", 3, "n", 3, Layer::Flow);

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree("n", 1), 2);
        assert_eq!(graph.degree("n", 3), 2);
    }

    #[test]
    fn test_layer_views() {
        let mut graph = DeviceGraph::new();
        four_ports(&mut graph, "f", Layer::Flow);
        four_ports(&mut graph, "c", Layer::Control);
        graph.add_edge("f", 1, "f", 2, Layer::Flow);
        graph.add_edge("c", 1, "c", 2, Layer::Control);

        assert_eq!(graph.vertices_on(Layer::Flow).count(), 4);
        assert_eq!(graph.vertices_on(Layer::Control).count(), 4);
        assert_eq!(graph.vertices_on(Layer::Undefined).count(), 0);
        assert_eq!(graph.vertices().count(), 8);

        let control: Vec<Edge<'_>> = graph.edges_on(Layer::Control).collect();
        assert_eq!(
            control,
            vec![Edge {
                source: ("c", 1),
                target: ("c", 2),
                layer: Layer::Control,
            }]
        );
        assert_eq!(graph.edges().count(), 2);
    }

    #[test]
    fn test_edge_to_missing_vertex_is_dangling() {
        let mut graph = DeviceGraph::new();
        four_ports(&mut graph, "a", Layer::Flow);
        graph.add_edge("a", 1, "z", 1, Layer::Flow);

        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.contains_vertex("z", 1));
        let dangling: Vec<Edge<'_>> = graph.dangling_edges().collect();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].target, ("z", 1));
        assert_eq!(graph.neighbors("z", 1), vec![("a", 1)]);
    }

    #[test]
    fn test_unknown_lookups() {
        let graph = DeviceGraph::new();
        assert!(!graph.contains_vertex("nope", 1));
        assert_eq!(graph.vertex_layer("nope", 1), None);
        assert!(graph.neighbors("nope", 1).is_empty());
        assert_eq!(graph.degree("nope", 1), 0);
    }

    proptest! {
        #[test]
        fn prop_repeated_vertices_are_stored_once(
            adds in proptest::collection::vec(("[a-d]", 1u32..=4), 0..64)
        ) {
            let mut graph = DeviceGraph::new();
            let mut distinct = std::collections::HashSet::new();
            for (id, port) in &adds {
                graph.add_vertex(id, *port, Layer::Flow);
                distinct.insert((id.clone(), *port));
            }
            prop_assert_eq!(graph.vertex_count(), distinct.len());
            for (id, port) in &distinct {
                prop_assert!(graph.contains_vertex(id, *port));
            }
        }
    }
}
