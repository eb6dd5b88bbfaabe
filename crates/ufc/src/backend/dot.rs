//! Graphviz DOT output for device graphs
//!
//! One cluster per layer holding that layer's component ports; channels are
//! undirected edges labelled with the port numbers they join. Endpoints that
//! were never declared are drawn as red placeholders outside any cluster.

use crate::sema::DeviceModel;
use std::collections::BTreeSet;
use std::fmt::Write;
use ufdevice::Layer;

/// Emit the device graph as a Graphviz DOT string.
pub fn emit_dot(model: &DeviceModel) -> String {
    let graph = &model.graph;
    let mut buf = String::new();
    let name = model.name.as_deref().unwrap_or("device");

    writeln!(buf, "graph {} {{", quote(name)).unwrap();
    writeln!(buf, "    node [shape=box, fontname=\"Helvetica\", fontsize=10];").unwrap();
    writeln!(buf, "    edge [fontname=\"Helvetica\", fontsize=9];").unwrap();

    for layer in Layer::ALL {
        // Group ports by component so each component becomes one record node
        let mut components: Vec<(&str, Vec<u32>)> = Vec::new();
        for vertex in graph.vertices_on(layer) {
            match components.iter_mut().find(|(id, _)| *id == vertex.component) {
                Some((_, ports)) => ports.push(vertex.port),
                None => components.push((vertex.component, vec![vertex.port])),
            }
        }
        if components.is_empty() {
            continue;
        }

        writeln!(buf).unwrap();
        writeln!(buf, "    subgraph cluster_{} {{", layer.as_str().to_lowercase()).unwrap();
        writeln!(buf, "        label=\"{layer}\";").unwrap();
        writeln!(buf, "        style=rounded;").unwrap();
        for (id, ports) in &components {
            let kind = model
                .symbols
                .get(id)
                .map_or("?", |component| component.kind.name());
            let fields: Vec<String> = ports.iter().map(|p| format!("<p{p}> {p}")).collect();
            writeln!(
                buf,
                "        {} [shape=record, label=\"{{{} | {}}} | {{{}}}\"];",
                quote(id),
                escape(id),
                kind,
                fields.join(" | ")
            )
            .unwrap();
        }
        writeln!(buf, "    }}").unwrap();
    }

    // Undeclared endpoints, sorted for deterministic output
    let missing: BTreeSet<&str> = graph
        .dangling_edges()
        .flat_map(|edge| [edge.source, edge.target])
        .filter(|(id, port)| !graph.contains_vertex(id, *port))
        .map(|(id, _)| id)
        .filter(|id| !model.symbols.contains_key(id))
        .collect();
    if !missing.is_empty() {
        writeln!(buf).unwrap();
        for id in &missing {
            writeln!(buf, "    {} [color=red, fontcolor=red, style=dashed];", quote(id)).unwrap();
        }
    }

    if graph.edge_count() > 0 {
        writeln!(buf).unwrap();
    }
    for edge in graph.edges() {
        let style = if graph.is_dangling(&edge) {
            ", color=red"
        } else {
            ""
        };
        writeln!(
            buf,
            "    {} -- {} [label=\"{}-{}\"{}];",
            endpoint(graph, edge.source),
            endpoint(graph, edge.target),
            edge.source.1,
            edge.target.1,
            style
        )
        .unwrap();
    }

    writeln!(buf, "}}").unwrap();
    buf
}

/// Record port reference when the vertex exists, bare node otherwise
fn endpoint(graph: &ufdevice::DeviceGraph, (id, port): (&str, u32)) -> String {
    if graph.contains_vertex(id, port) {
        format!("{}:p{}", quote(id), port)
    } else {
        quote(id)
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '{' | '}' | '|' | '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
