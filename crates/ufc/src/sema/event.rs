//! Declaration events
//!
//! A MINT front end walks its parse tree and hands the analyzer one
//! [`Declaration`] per statement, in source order. Events deserialize from
//! JSON objects tagged by `"event"`:
//!
//! ```json
//! {"event": "ports", "names": [{"name": "a", "span": {"start": 5, "end": 6}}], "radius": 5.0}
//! ```

use crate::common::Span;
use serde::Deserialize;
use ufdevice::Layer;

/// Type tag selecting the square cell trap variant; any other tag is a long trap
pub const SQUARE_CELL_TRAP: &str = "SQUARE CELL TRAP";

/// A name as written in the source
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ident {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// One side of a channel: a component and one of its ports
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortRef {
    pub component: Ident,
    pub port: u32,
    #[serde(default)]
    pub port_span: Span,
}

/// Layer block keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayerBlock {
    Flow,
    Control,
}

impl From<LayerBlock> for Layer {
    fn from(block: LayerBlock) -> Self {
        match block {
            LayerBlock::Flow => Layer::Flow,
            LayerBlock::Control => Layer::Control,
        }
    }
}

/// Named parameter of a cell trap statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellTrapParam {
    NumChambers(u32),
    ChamberWidth(u32),
    ChamberLength(u32),
    ChamberSpacing(u32),
    ChannelWidth(u32),
}

/// Named parameter of a mixer statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixerParam {
    NumBends(u32),
    BendSpacing(u32),
    BendLength(u32),
    ChannelWidth(u32),
}

/// Cell trap parameters after defaulting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellTrapGeometry {
    pub num_chambers: u32,
    pub chamber_width: u32,
    pub chamber_length: u32,
    pub chamber_spacing: u32,
    pub channel_width: u32,
}

impl CellTrapGeometry {
    /// Missing parameters are 0; a repeated parameter keeps its last value
    pub fn from_params(params: &[CellTrapParam]) -> Self {
        let mut geometry = Self::default();
        for param in params {
            match *param {
                CellTrapParam::NumChambers(v) => geometry.num_chambers = v,
                CellTrapParam::ChamberWidth(v) => geometry.chamber_width = v,
                CellTrapParam::ChamberLength(v) => geometry.chamber_length = v,
                CellTrapParam::ChamberSpacing(v) => geometry.chamber_spacing = v,
                CellTrapParam::ChannelWidth(v) => geometry.channel_width = v,
            }
        }
        geometry
    }
}

/// Mixer parameters after defaulting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MixerGeometry {
    pub num_bends: u32,
    pub bend_spacing: u32,
    pub bend_length: u32,
    pub channel_width: u32,
}

impl MixerGeometry {
    /// Missing parameters are 0; a repeated parameter keeps its last value
    pub fn from_params(params: &[MixerParam]) -> Self {
        let mut geometry = Self::default();
        for param in params {
            match *param {
                MixerParam::NumBends(v) => geometry.num_bends = v,
                MixerParam::BendSpacing(v) => geometry.bend_spacing = v,
                MixerParam::BendLength(v) => geometry.bend_length = v,
                MixerParam::ChannelWidth(v) => geometry.channel_width = v,
            }
        }
        geometry
    }
}

/// One statement of a MINT file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Declaration {
    /// `DEVICE <name>`
    Header { name: Ident },
    /// Start of a `LAYER FLOW` / `LAYER CONTROL` block
    EnterLayer { layer: LayerBlock },
    /// `END LAYER`
    ExitLayer { layer: LayerBlock },
    /// `PORT a, b r=<radius>;`
    Ports { names: Vec<Ident>, radius: f64 },
    /// `NODE a, b;`
    Nodes { names: Vec<Ident> },
    /// `CHANNEL c from a 1 to b 2 ...;`
    Channel { name: Ident, from: PortRef, to: PortRef },
    /// `<type> CELL TRAP t1, t2 ...;`
    CellTrap {
        cell_type: String,
        names: Vec<Ident>,
        #[serde(default)]
        params: Vec<CellTrapParam>,
    },
    /// `MIXER m ...;`
    Mixer {
        name: Ident,
        #[serde(default)]
        params: Vec<MixerParam>,
    },
    /// Statement the front end could not parse
    Malformed {
        #[serde(default)]
        span: Span,
    },
}

impl Declaration {
    /// Short name of the event kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Header { .. } => "header",
            Declaration::EnterLayer { .. } => "enter_layer",
            Declaration::ExitLayer { .. } => "exit_layer",
            Declaration::Ports { .. } => "ports",
            Declaration::Nodes { .. } => "nodes",
            Declaration::Channel { .. } => "channel",
            Declaration::CellTrap { .. } => "cell_trap",
            Declaration::Mixer { .. } => "mixer",
            Declaration::Malformed { .. } => "malformed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_trap_defaults_to_zero() {
        assert_eq!(CellTrapGeometry::from_params(&[]), CellTrapGeometry::default());
        let g = CellTrapGeometry::from_params(&[
            CellTrapParam::ChamberSpacing(4),
            CellTrapParam::NumChambers(7),
        ]);
        assert_eq!(
            g,
            CellTrapGeometry {
                num_chambers: 7,
                chamber_spacing: 4,
                ..CellTrapGeometry::default()
            }
        );
    }

    #[test]
    fn test_repeated_param_last_wins() {
        let g = MixerGeometry::from_params(&[MixerParam::NumBends(3), MixerParam::NumBends(5)]);
        assert_eq!(g.num_bends, 5);
    }

    #[test]
    fn test_decode_channel() {
        let json = r#"{
            "event": "channel",
            "name": {"name": "c1", "span": {"start": 8, "end": 10}},
            "from": {"component": {"name": "a"}, "port": 1},
            "to": {"component": {"name": "b"}, "port": 2, "port_span": {"start": 30, "end": 31}}
        }"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();
        match decl {
            Declaration::Channel { name, from, to } => {
                assert_eq!(name, Ident::new("c1", Span::new(8, 10)));
                assert_eq!(from.component.name, "a");
                assert_eq!(from.component.span, Span::dummy());
                assert_eq!(to.port, 2);
                assert_eq!(to.port_span, Span::new(30, 31));
            }
            other => panic!("expected channel, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_params_and_layers() {
        let json = r#"[
            {"event": "enter_layer", "layer": "FLOW"},
            {"event": "mixer", "name": {"name": "m"}, "params": [{"bend_length": 10}]},
            {"event": "cell_trap", "cell_type": "LONG CELL TRAP", "names": [{"name": "t"}]},
            {"event": "exit_layer", "layer": "FLOW"}
        ]"#;
        let decls: Vec<Declaration> = serde_json::from_str(json).unwrap();
        assert_eq!(
            decls.iter().map(Declaration::kind).collect::<Vec<_>>(),
            vec!["enter_layer", "mixer", "cell_trap", "exit_layer"]
        );
        assert_eq!(
            decls[1],
            Declaration::Mixer {
                name: Ident::new("m", Span::dummy()),
                params: vec![MixerParam::BendLength(10)],
            }
        );
        assert!(matches!(&decls[2], Declaration::CellTrap { params, .. } if params.is_empty()));
        assert_eq!(Layer::from(LayerBlock::Control), Layer::Control);
    }

    #[test]
    fn test_negative_port_is_rejected() {
        let json = r#"{"event": "channel", "name": {"name": "c"},
            "from": {"component": {"name": "a"}, "port": -1},
            "to": {"component": {"name": "b"}, "port": 1}}"#;
        assert!(serde_json::from_str::<Declaration>(json).is_err());
    }
}
