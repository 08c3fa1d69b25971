//! LinnStrument pad colors for microtonal layouts
//!
//! This crate provides:
//! - The LinnStrument LED color, save slot and model types
//! - A pad color mapper that lays a scale template over the play surface
//! - Encoding of the LED control-change commands (CC20-CC23)
//! - MIDI output port discovery and connection via midir
//! - The painting procedure that sends a full layout and saves it
//!
//! # Architecture
//!
//! ```text
//! LayoutConfig → PadColorMapper → PadPainter → ControlChangeSink (midir) → LinnStrument
//! ```
//!
//! The transport sits behind the [`MidiTransport`] trait so the whole run can
//! be driven without hardware.

mod config;
mod connection;
mod layout;
mod messages;
mod output;
mod types;

#[cfg(test)]
mod testing;

pub use config::{
    port_matches, select_port, ConfigError, LayoutConfig, ScaleTemplate, DEFAULT_PORT_MATCH,
    DEFAULT_ROW_OFFSET, DEFAULT_START_OFFSET,
};
pub use connection::{
    find_output_port, ControlChangeSink, MidiConnectionError, MidiTransport, MidirOutput,
    MidirTransport, CLIENT_NAME,
};
pub use layout::{render_grid, PadColorMapper};
pub use messages::{
    control_change_bytes, pad_commands, LinnCommand, CC_CLEAR, CC_COLOR, CC_COLUMN, CC_ROW,
    CC_SAVE,
};
pub use output::{program_device, LinnError, PadPainter, PaintSummary, Progress};
pub use types::{DeviceVariant, LinnColor, PadCoordinate, SaveSlot, ROW_COUNT};
