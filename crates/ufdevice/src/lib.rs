//! # ufdevice - Microfluidic device model
//!
//! In-memory representation of a microfluidic device described in MINT:
//! the components it declares and how their ports are wired together.
//!
//! ## Features
//!
//! - **Components**: ports, channels, nodes, cell traps and mixers, each
//!   carrying its geometry and a fixed set of connectable ports
//! - **Symbol table**: a single device-wide namespace, first writer wins
//! - **Device graph**: per-layer multigraph over `(component, port)` vertices
//!
//! ## Quick Start
//!
//! ```
//! use ufdevice::prelude::*;
//!
//! let mut symbols = SymbolTable::new();
//! let mut graph = DeviceGraph::new();
//!
//! for id in ["in", "out"] {
//!     let port = Component::new(id, Layer::Flow, ComponentKind::Port { radius: 5.0 });
//!     for index in port.ports() {
//!         graph.add_vertex(id, index, Layer::Flow);
//!     }
//!     assert!(symbols.put(id, port));
//! }
//!
//! graph.add_edge("in", 1, "out", 1, Layer::Flow);
//! assert_eq!(graph.edge_count(), 1);
//! assert_eq!(graph.neighbors("in", 1), vec![("out", 1)]);
//! ```
//!
//! ## Modules
//!
//! - [`component`] - Component variants, layers and port capabilities
//! - [`symbol`] - Device-wide name registry
//! - [`graph`] - Port-level connectivity graph

pub mod component;
pub mod graph;
pub mod symbol;

pub use component::{Component, ComponentKind, Layer};
pub use graph::{DeviceGraph, Edge, Vertex};
pub use symbol::SymbolTable;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::component::{Component, ComponentKind, Layer};
    pub use crate::graph::{DeviceGraph, Edge, Vertex};
    pub use crate::symbol::SymbolTable;
}
