//! Symbol table
//!
//! One namespace for the whole device: a port and a mixer may not share a
//! name even when they live on different layers. The table only grows.

use crate::component::{Component, Layer};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Identifier -> component registry
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Component>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `id`.
    ///
    /// Returns `false` without touching the table when `id` is already
    /// taken; the first registration wins.
    pub fn put(&mut self, id: impl Into<String>, component: Component) -> bool {
        match self.symbols.entry(id.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(component);
                true
            }
        }
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.symbols.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.symbols.get(id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All entries sorted by identifier
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Component)> {
        let mut entries: Vec<_> = self
            .symbols
            .iter()
            .map(|(id, component)| (id.as_str(), component))
            .collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries.into_iter()
    }

    /// Components declared on `layer`, sorted by identifier
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Component> {
        self.iter()
            .map(|(_, component)| component)
            .filter(move |component| component.layer == layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentKind;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn port(id: &str, radius: f64) -> Component {
        Component::new(id, Layer::Flow, ComponentKind::Port { radius })
    }

    #[test]
    fn test_put_and_get() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        assert!(table.put("a", port("a", 5.0)));
        assert!(table.contains_key("a"));
        assert!(!table.contains_key("b"));
        assert_eq!(table.get("a"), Some(&port("a", 5.0)));
        assert_eq!(table.get("b"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_duplicate_first_writer_wins() {
        let mut table = SymbolTable::new();
        assert!(table.put("a", port("a", 5.0)));
        let node = Component::new("a", Layer::Control, ComponentKind::Node);
        assert!(!table.put("a", node));
        assert_eq!(table.get("a"), Some(&port("a", 5.0)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_namespace_spans_layers_and_kinds() {
        let mut table = SymbolTable::new();
        assert!(table.put("x", Component::new("x", Layer::Flow, ComponentKind::Node)));
        assert!(!table.put("x", Component::new("x", Layer::Control, ComponentKind::Channel)));
    }

    #[test]
    fn test_iter_sorted_and_layer_filter() {
        let mut table = SymbolTable::new();
        table.put("b", port("b", 1.0));
        table.put("a", port("a", 1.0));
        table.put("v", Component::new("v", Layer::Control, ComponentKind::Node));

        let ids: Vec<&str> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b", "v"]);

        let flow: Vec<&str> = table.on_layer(Layer::Flow).map(|c| c.id.as_str()).collect();
        assert_eq!(flow, vec!["a", "b"]);
        assert_eq!(table.on_layer(Layer::Undefined).count(), 0);
    }

    proptest! {
        #[test]
        fn prop_second_put_is_rejected(id in "[a-z][a-z0-9_]{0,8}", r1 in 0.1f64..100.0, r2 in 0.1f64..100.0) {
            let first = port(&id, r1);
            let mut table = SymbolTable::new();
            prop_assert!(table.put(id.clone(), first.clone()));
            prop_assert!(!table.put(id.clone(), port(&id, r2)));
            prop_assert_eq!(table.get(&id), Some(&first));
            prop_assert_eq!(table.len(), 1);
        }
    }
}
