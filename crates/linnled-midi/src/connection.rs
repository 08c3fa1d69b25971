//! MIDI port discovery and output connection
//!
//! Uses midir for cross-platform MIDI I/O (ALSA on Linux, CoreMIDI on macOS, WinMM on Windows).
//! The painting code only sees the [`MidiTransport`] and [`ControlChangeSink`] traits,
//! so it can run against a recording fake in tests.

use crate::config::select_port;
use crate::messages::control_change_bytes;
use midir::{MidiOutput, MidiOutputConnection};

/// Client name registered with the system MIDI layer
pub const CLIENT_NAME: &str = "linnled";

/// Error type for MIDI connection operations
///
/// Each variant names the stage that failed: enumeration, open or send.
#[derive(Debug, thiserror::Error)]
pub enum MidiConnectionError {
    #[error("Failed to initialize MIDI output: {0}")]
    OutputInitError(String),

    #[error("Failed to get port info: {0}")]
    PortInfoError(String),

    #[error("No MIDI port found matching '{pattern}' (available: [{}])", .available.join(", "))]
    PortNotFound {
        pattern: String,
        available: Vec<String>,
    },

    #[error("Failed to connect to MIDI port '{port}': {reason}")]
    ConnectionError { port: String, reason: String },

    #[error("Failed to send CC{controller}={value}: {reason}")]
    SendError {
        controller: u8,
        value: u8,
        reason: String,
    },
}

/// An open output that accepts control changes
///
/// Dropping the sink closes the underlying port.
pub trait ControlChangeSink {
    /// Send one control change; no acknowledgement is awaited
    fn send_cc(&mut self, controller: u8, value: u8) -> Result<(), MidiConnectionError>;
}

/// Source of MIDI output ports
pub trait MidiTransport {
    type Output: ControlChangeSink;

    /// Names of all output-capable ports, in system order
    fn output_port_names(&self) -> Result<Vec<String>, MidiConnectionError>;

    /// Open the output port with exactly this name, sending on `channel` (0-15)
    fn open_output(
        &self,
        port_name: &str,
        channel: u8,
    ) -> Result<Self::Output, MidiConnectionError>;
}

/// Enumerate outputs and pick the first one containing `pattern`
pub fn find_output_port<T: MidiTransport>(
    transport: &T,
    pattern: &str,
) -> Result<String, MidiConnectionError> {
    let names = transport.output_port_names()?;
    log::debug!("MIDI: {} output port(s) available", names.len());
    for name in &names {
        log::debug!("  - {}", name);
    }

    match select_port(&names, pattern) {
        Some(name) => {
            log::info!("MIDI: Found output port: {}", name);
            Ok(name.to_string())
        }
        None => Err(MidiConnectionError::PortNotFound {
            pattern: pattern.to_string(),
            available: names,
        }),
    }
}

/// System MIDI outputs via midir
#[derive(Debug, Clone)]
pub struct MidirTransport {
    client_name: String,
}

impl MidirTransport {
    pub fn new() -> Self {
        Self {
            client_name: CLIENT_NAME.to_string(),
        }
    }
}

impl Default for MidirTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiTransport for MidirTransport {
    type Output = MidirOutput;

    fn output_port_names(&self) -> Result<Vec<String>, MidiConnectionError> {
        let midi_out = MidiOutput::new(&self.client_name)
            .map_err(|e| MidiConnectionError::OutputInitError(e.to_string()))?;

        midi_out
            .ports()
            .iter()
            .map(|port| {
                midi_out
                    .port_name(port)
                    .map_err(|e| MidiConnectionError::PortInfoError(e.to_string()))
            })
            .collect()
    }

    fn open_output(&self, port_name: &str, channel: u8) -> Result<MidirOutput, MidiConnectionError> {
        // A failure here belongs to the open stage, not enumeration
        let midi_out = MidiOutput::new(&self.client_name).map_err(|e| {
            MidiConnectionError::ConnectionError {
                port: port_name.to_string(),
                reason: e.to_string(),
            }
        })?;

        // Ports may have come and gone since enumeration
        let port = midi_out
            .ports()
            .into_iter()
            .find(|port| {
                midi_out
                    .port_name(port)
                    .map(|name| name == port_name)
                    .unwrap_or(false)
            })
            .ok_or_else(|| MidiConnectionError::ConnectionError {
                port: port_name.to_string(),
                reason: "port disappeared".to_string(),
            })?;

        let connection = midi_out
            .connect(&port, "linnled-output")
            .map_err(|e| MidiConnectionError::ConnectionError {
                port: port_name.to_string(),
                reason: e.to_string(),
            })?;

        log::info!("MIDI: Connected to output port");
        Ok(MidirOutput {
            connection,
            channel,
        })
    }
}

/// Open midir output connection
pub struct MidirOutput {
    connection: MidiOutputConnection,
    channel: u8,
}

impl ControlChangeSink for MidirOutput {
    fn send_cc(&mut self, controller: u8, value: u8) -> Result<(), MidiConnectionError> {
        log::debug!(
            "[MIDI OUT] CC ch={} cc={} val={}",
            self.channel, controller, value
        );
        let message = control_change_bytes(self.channel, controller, value);
        self.connection
            .send(&message)
            .map_err(|e| MidiConnectionError::SendError {
                controller,
                value,
                reason: e.to_string(),
            })
    }
}
