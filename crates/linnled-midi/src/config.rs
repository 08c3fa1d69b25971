//! Layout configuration
//!
//! Everything here is fixed at build time: `LayoutConfig::default()` is the
//! 19-EDO layout that `linnled` sends. The serde derives exist so the
//! effective configuration can be dumped as YAML in debug logs.

use crate::types::{DeviceVariant, LinnColor, SaveSlot};
use serde::{Deserialize, Serialize};

/// Substring identifying a LinnStrument MIDI port
pub const DEFAULT_PORT_MATCH: &str = "LinnStrument";

/// Scale degree placed on the bottom-left pad (0 = root)
pub const DEFAULT_START_OFFSET: i32 = 2;

/// Scale degrees between adjacent rows (6 steps of 19-EDO is a fourth)
pub const DEFAULT_ROW_OFFSET: i32 = 6;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Scale template must contain at least one color")]
    EmptyTemplate,

    #[error("MIDI channel {0} is out of range (0-15)")]
    InvalidChannel(u8),
}

/// Color for each step of one octave of the tuning
///
/// Index 0 is the step that lands under `start_offset`, not necessarily the
/// unison of the tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LinnColor>", into = "Vec<LinnColor>")]
pub struct ScaleTemplate {
    colors: Vec<LinnColor>,
}

impl ScaleTemplate {
    pub fn new(colors: Vec<LinnColor>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyTemplate);
        }
        Ok(Self { colors })
    }

    /// 19 equal divisions of the octave
    ///
    /// - Octave (index 18): blue
    /// - Fifth, 3:2 (index 10): orange
    /// - Major 2nd 9:8, major 3rd 5:4, fourth 4:3, major 6th 5:3 and
    ///   major 7th 15:8: green
    pub fn edo19() -> Self {
        use LinnColor::{Blue, Green, Off, Orange};
        Self {
            colors: vec![
                Off, Off, Green, Off, Off, Green, Off, Green, Off, Off, Orange, Off, Off, Green,
                Off, Off, Green, Off, Blue,
            ],
        }
    }

    /// Number of steps per octave (never zero)
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<LinnColor> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[LinnColor] {
        &self.colors
    }
}

impl Default for ScaleTemplate {
    fn default() -> Self {
        Self::edo19()
    }
}

impl TryFrom<Vec<LinnColor>> for ScaleTemplate {
    type Error = ConfigError;

    fn try_from(colors: Vec<LinnColor>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<ScaleTemplate> for Vec<LinnColor> {
    fn from(template: ScaleTemplate) -> Self {
        template.colors
    }
}

/// Complete description of one pad-coloring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Colors for one octave
    pub template: ScaleTemplate,

    /// Scale degree on the bottom-left pad (taken modulo the template length)
    pub start_offset: i32,

    /// Scale degrees added per row (taken modulo the template length)
    pub row_offset: i32,

    /// Hardware size, selects the column range
    pub variant: DeviceVariant,

    /// Memory slot the finished layout is saved to
    pub save_slot: SaveSlot,

    /// Port name substring to match (case-sensitive, first match wins)
    pub port_match: String,

    /// MIDI channel for the control changes (0-15)
    pub channel: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            template: ScaleTemplate::edo19(),
            start_offset: DEFAULT_START_OFFSET,
            row_offset: DEFAULT_ROW_OFFSET,
            variant: DeviceVariant::Pads200,
            save_slot: SaveSlot::ASharp,
            port_match: DEFAULT_PORT_MATCH.to_string(),
            channel: 0,
        }
    }
}

impl LayoutConfig {
    /// Check the invariants the protocol relies on
    ///
    /// The template needs no check here: `ScaleTemplate` cannot be built empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel > 15 {
            return Err(ConfigError::InvalidChannel(self.channel));
        }
        Ok(())
    }
}

/// Check whether a port name contains the match pattern
pub fn port_matches(port_name: &str, pattern: &str) -> bool {
    port_name.contains(pattern)
}

/// Pick the port to open from an enumerated list
///
/// Returns the first name that matches; later matches are ignored.
pub fn select_port<'a>(names: &'a [String], pattern: &str) -> Option<&'a str> {
    names
        .iter()
        .find(|name| port_matches(name, pattern))
        .map(String::as_str)
}
