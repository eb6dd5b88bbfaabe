//! Device components and their port capabilities
//!
//! Every element a MINT file can declare is a [`Component`]: a name, the
//! layer it was declared on and a [`ComponentKind`] carrying the
//! variant-specific geometry. Ports are numbered from 1.

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Logical plane of the device a component belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layer {
    /// Fluid-carrying layer
    Flow,
    /// Valve/pneumatic control layer
    Control,
    /// Declared outside any layer block
    #[default]
    Undefined,
}

impl Layer {
    /// All layers, in display order
    pub const ALL: [Layer; 3] = [Layer::Flow, Layer::Control, Layer::Undefined];

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Flow => "FLOW",
            Layer::Control => "CONTROL",
            Layer::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific attributes of a component
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentKind {
    /// Inlet/outlet punched through the chip
    Port { radius: f64 },
    /// Connection between two component ports
    Channel,
    /// Junction point
    Node,
    /// Single square trapping chamber
    SquareCellTrap {
        chamber_width: u32,
        chamber_length: u32,
        channel_width: u32,
    },
    /// Row of trapping chambers along a channel
    LongCellTrap {
        num_chambers: u32,
        chamber_width: u32,
        chamber_length: u32,
        chamber_spacing: u32,
        channel_width: u32,
    },
    /// Serpentine mixer
    Mixer {
        num_bends: u32,
        bend_spacing: u32,
        bend_length: u32,
        channel_width: u32,
    },
}

impl ComponentKind {
    /// Number of connectable ports; valid indices are `1..=port_count()`
    pub const fn port_count(&self) -> u32 {
        match self {
            ComponentKind::Channel => 0,
            ComponentKind::Port { .. }
            | ComponentKind::Node
            | ComponentKind::SquareCellTrap { .. } => 4,
            ComponentKind::LongCellTrap { .. } | ComponentKind::Mixer { .. } => 2,
        }
    }

    /// Whether `index` names a port of this variant
    pub fn has_port(&self, index: u32) -> bool {
        (1..=self.port_count()).contains(&index)
    }

    /// MINT keyword for the variant
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Port { .. } => "PORT",
            ComponentKind::Channel => "CHANNEL",
            ComponentKind::Node => "NODE",
            ComponentKind::SquareCellTrap { .. } => "SQUARE CELL TRAP",
            ComponentKind::LongCellTrap { .. } => "LONG CELL TRAP",
            ComponentKind::Mixer { .. } => "MIXER",
        }
    }
}

/// A named device element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub id: String,
    pub layer: Layer,
    #[serde(flatten)]
    pub kind: ComponentKind,
}

impl Component {
    pub fn new(id: impl Into<String>, layer: Layer, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            layer,
            kind,
        }
    }

    #[inline]
    pub fn has_port(&self, index: u32) -> bool {
        self.kind.has_port(index)
    }

    /// Valid port indices, ascending
    pub fn ports(&self) -> RangeInclusive<u32> {
        1..=self.kind.port_count()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.kind.name(), self.id, self.layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixer() -> ComponentKind {
        ComponentKind::Mixer {
            num_bends: 0,
            bend_spacing: 0,
            bend_length: 10,
            channel_width: 0,
        }
    }

    #[test]
    fn test_four_port_variants() {
        let kinds = [
            ComponentKind::Port { radius: 5.0 },
            ComponentKind::Node,
            ComponentKind::SquareCellTrap {
                chamber_width: 0,
                chamber_length: 0,
                channel_width: 0,
            },
        ];
        for kind in kinds {
            assert!(!kind.has_port(0), "{} has no port 0", kind.name());
            for index in 1..=4 {
                assert!(kind.has_port(index), "{} port {index}", kind.name());
            }
            assert!(!kind.has_port(5), "{} has no port 5", kind.name());
        }
    }

    #[test]
    fn test_two_port_variants() {
        let long_trap = ComponentKind::LongCellTrap {
            num_chambers: 3,
            chamber_width: 1,
            chamber_length: 2,
            chamber_spacing: 3,
            channel_width: 4,
        };
        for kind in [long_trap, mixer()] {
            assert!(kind.has_port(1));
            assert!(kind.has_port(2));
            assert!(!kind.has_port(3));
        }
    }

    #[test]
    fn test_channel_has_no_ports() {
        let channel = Component::new("c1", Layer::Flow, ComponentKind::Channel);
        assert!(!channel.has_port(0));
        assert!(!channel.has_port(1));
        assert_eq!(channel.ports().count(), 0);
    }

    #[test]
    fn test_ports_iterator() {
        let m = Component::new("m", Layer::Control, mixer());
        assert_eq!(m.ports().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_display() {
        let p = Component::new("inlet", Layer::Flow, ComponentKind::Port { radius: 2.5 });
        assert_eq!(p.to_string(), "PORT inlet [FLOW]");
        assert_eq!(Layer::default(), Layer::Undefined);
    }
}
