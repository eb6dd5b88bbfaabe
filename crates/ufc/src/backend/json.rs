//! JSON export of the device model

use crate::common::{CompileError, CompileResult};
use crate::sema::DeviceModel;
use serde::Serialize;
use ufdevice::{Component, Layer, Vertex};

#[derive(Debug, Serialize)]
struct PortExport<'m> {
    component: &'m str,
    port: u32,
}

#[derive(Debug, Serialize)]
struct EdgeExport<'m> {
    source: PortExport<'m>,
    target: PortExport<'m>,
    layer: Layer,
    /// An endpoint is not a registered vertex
    dangling: bool,
}

/// Serializable view of a [`DeviceModel`]
#[derive(Debug, Serialize)]
pub struct DeviceExport<'m> {
    name: Option<&'m str>,
    valid: bool,
    components: Vec<&'m Component>,
    vertices: Vec<Vertex<'m>>,
    edges: Vec<EdgeExport<'m>>,
}

impl<'m> DeviceExport<'m> {
    pub fn new(model: &'m DeviceModel) -> Self {
        let graph = &model.graph;
        let edges = graph
            .edges()
            .map(|edge| EdgeExport {
                source: PortExport {
                    component: edge.source.0,
                    port: edge.source.1,
                },
                target: PortExport {
                    component: edge.target.0,
                    port: edge.target.1,
                },
                layer: edge.layer,
                dangling: graph.is_dangling(&edge),
            })
            .collect();

        Self {
            name: model.name.as_deref(),
            valid: model.valid,
            components: model.symbols.iter().map(|(_, component)| component).collect(),
            vertices: graph.vertices().collect(),
            edges,
        }
    }
}

/// Pretty-printed JSON document describing `model`
pub fn emit_json(model: &DeviceModel) -> CompileResult<String> {
    serde_json::to_string_pretty(&DeviceExport::new(model)).map_err(CompileError::Export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::sample_model;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn test_export_shape() {
        let model = sample_model();
        let value: Value = serde_json::from_str(&emit_json(&model).unwrap()).unwrap();

        assert_eq!(value["name"], json!("chip"));
        assert_eq!(value["valid"], json!(true));
        assert_eq!(value["components"].as_array().unwrap().len(), 6);
        assert_eq!(value["vertices"].as_array().unwrap().len(), 14);
        assert_eq!(
            value["edges"][0],
            json!({
                "source": {"component": "in", "port": 1},
                "target": {"component": "mix", "port": 1},
                "layer": "FLOW",
                "dangling": false
            })
        );
    }

    #[test]
    fn test_component_attributes() {
        let model = sample_model();
        let value: Value = serde_json::from_str(&emit_json(&model).unwrap()).unwrap();
        let components = value["components"].as_array().unwrap();

        // Components are sorted by identifier: c1, c2, in, mix, out, v
        assert_eq!(
            components[2],
            json!({"id": "in", "layer": "FLOW", "type": "port", "radius": 2.5})
        );
        assert_eq!(
            components[3],
            json!({
                "id": "mix",
                "layer": "FLOW",
                "type": "mixer",
                "num_bends": 0,
                "bend_spacing": 0,
                "bend_length": 0,
                "channel_width": 0
            })
        );
        assert_eq!(components[5]["layer"], json!("CONTROL"));
    }
}
