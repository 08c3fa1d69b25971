//! Sending a pad layout to the device
//!
//! Every pad gets its column/row/color triple, bottom row first, and the
//! finished layout is stored with a single save command. Sends are
//! fire-and-forget: nothing is retried and the first failure ends the run.

use crate::config::{ConfigError, LayoutConfig};
use crate::connection::{find_output_port, ControlChangeSink, MidiConnectionError, MidiTransport};
use crate::layout::{render_grid, PadColorMapper};
use crate::messages::{pad_commands, LinnCommand};
use crate::types::{DeviceVariant, LinnColor, PadCoordinate, SaveSlot};

/// Error type for a full programming run
#[derive(Debug, thiserror::Error)]
pub enum LinnError {
    #[error("Invalid layout config: {0}")]
    Config(#[from] ConfigError),

    #[error("MIDI error: {0}")]
    Connection(#[from] MidiConnectionError),
}

/// Counts for a finished painting pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintSummary {
    /// Pads colored
    pub pads: usize,
    /// Control changes sent, including the save
    pub messages: usize,
}

/// Progress notifications for the caller's status output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// About to open this port
    Opening { port: String },
    /// Port is open
    Connected,
    /// All pads sent
    Painted(PaintSummary),
    /// Save command sent
    Saved(SaveSlot),
}

/// Writes LED commands to an open sink
pub struct PadPainter<'a, S: ControlChangeSink> {
    sink: &'a mut S,
    messages: usize,
}

impl<'a, S: ControlChangeSink> PadPainter<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self { sink, messages: 0 }
    }

    /// Number of control changes sent so far
    pub fn messages_sent(&self) -> usize {
        self.messages
    }

    fn send(&mut self, command: LinnCommand) -> Result<(), MidiConnectionError> {
        self.sink.send_cc(command.controller(), command.value())?;
        self.messages += 1;
        Ok(())
    }

    /// Light one pad (column, then row, then color)
    pub fn paint_pad(
        &mut self,
        pad: PadCoordinate,
        color: LinnColor,
    ) -> Result<(), MidiConnectionError> {
        for command in pad_commands(pad, color) {
            self.send(command)?;
        }
        Ok(())
    }

    /// Light every play pad of `variant` from the mapper
    pub fn paint_layout(
        &mut self,
        mapper: &PadColorMapper,
        variant: DeviceVariant,
    ) -> Result<PaintSummary, MidiConnectionError> {
        let mut pads = 0;
        for (pad, color) in mapper.pads(variant) {
            self.paint_pad(pad, color)?;
            pads += 1;
        }
        log::debug!("Painted {} pads ({} messages)", pads, self.messages);
        Ok(PaintSummary {
            pads,
            messages: self.messages,
        })
    }

    /// Store the current layout in `slot`
    pub fn save(&mut self, slot: SaveSlot) -> Result<(), MidiConnectionError> {
        log::info!("Saving layout to slot {}", slot);
        self.send(LinnCommand::Save(slot))
    }
}

/// Run the whole programming sequence against `transport`
///
/// Finds the first port matching `config.port_match`, opens it, paints
/// every pad and saves to `config.save_slot`. The port is closed when this
/// returns, on success or error.
pub fn program_device<T, F>(
    transport: &T,
    config: &LayoutConfig,
    mut progress: F,
) -> Result<PaintSummary, LinnError>
where
    T: MidiTransport,
    F: FnMut(Progress),
{
    config.validate()?;

    let mapper = PadColorMapper::from_config(config);
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("Layout (top row first):");
        for line in render_grid(&mapper, config.variant) {
            log::debug!("  {}", line);
        }
    }

    let port = find_output_port(transport, &config.port_match)?;
    progress(Progress::Opening { port: port.clone() });
    let mut output = transport.open_output(&port, config.channel)?;
    progress(Progress::Connected);

    let mut painter = PadPainter::new(&mut output);
    let painted = painter.paint_layout(&mapper, config.variant)?;
    progress(Progress::Painted(painted));

    painter.save(config.save_slot)?;
    progress(Progress::Saved(config.save_slot));

    let summary = PaintSummary {
        pads: painted.pads,
        messages: painter.messages_sent(),
    };
    log::info!(
        "Sent {} pads in {} messages to '{}'",
        summary.pads,
        summary.messages,
        port
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{CC_COLOR, CC_COLUMN, CC_ROW, CC_SAVE};
    use crate::testing::{FakeTransport, RecordingSink};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_paint_pad_sends_triple() {
        let mut sink = RecordingSink::default();
        let mut painter = PadPainter::new(&mut sink);
        painter
            .paint_pad(PadCoordinate::new(25, 7), LinnColor::Blue)
            .unwrap();
        assert_eq!(painter.messages_sent(), 3);
        assert_eq!(sink.sent, vec![(20, 25), (21, 7), (22, 5)]);
    }

    #[test]
    fn test_paint_layout_message_shape() {
        let mut sink = RecordingSink::default();
        let mapper = PadColorMapper::from_config(&LayoutConfig::default());
        let summary = PadPainter::new(&mut sink)
            .paint_layout(&mapper, DeviceVariant::Pads200)
            .unwrap();

        assert_eq!(summary, PaintSummary { pads: 200, messages: 600 });
        assert_eq!(sink.sent.len(), 600);
        for (i, chunk) in sink.sent.chunks(3).enumerate() {
            let row = (i / 25) as u8;
            let column = (i % 25) as u8 + 1;
            assert_eq!(chunk[0], (CC_COLUMN, column));
            assert_eq!(chunk[1], (CC_ROW, row));
            assert_eq!(chunk[2].0, CC_COLOR);
            assert!(chunk[2].1 <= 11);
        }
        assert!(sink.sent.iter().all(|(_, v)| *v <= 127));
        assert!(!sink.sent.iter().any(|(cc, _)| *cc == CC_SAVE));
    }

    #[test]
    fn test_paint_failure_stops_immediately() {
        let mut sink = RecordingSink::failing_at(4);
        let mapper = PadColorMapper::from_config(&LayoutConfig::default());
        let err = PadPainter::new(&mut sink)
            .paint_layout(&mapper, DeviceVariant::Pads200)
            .unwrap_err();
        assert!(matches!(
            err,
            MidiConnectionError::SendError { controller: CC_ROW, .. }
        ));
        assert_eq!(sink.sent.len(), 4);
    }

    #[test]
    fn test_program_device_default_run() {
        init_logger();
        let transport = FakeTransport::with_ports(&["Midi Through Port-0", "LinnStrument MIDI 1"]);
        let mut events = Vec::new();
        let summary =
            program_device(&transport, &LayoutConfig::default(), |p| events.push(p)).unwrap();

        assert_eq!(summary, PaintSummary { pads: 200, messages: 601 });

        let sent = transport.log.sent.borrow();
        assert_eq!(sent.len(), 601);
        assert_eq!(&sent[..3], &[(20, 1), (21, 0), (22, 3)]);
        // Second row starts at template index 8
        assert_eq!(&sent[75..78], &[(20, 1), (21, 1), (22, 7)]);
        assert_eq!(sent[600], (23, 1));
        assert_eq!(sent.iter().filter(|(cc, _)| *cc == CC_SAVE).count(), 1);

        assert_eq!(
            *transport.log.opened.borrow(),
            vec![("LinnStrument MIDI 1".to_string(), 0)]
        );
        assert_eq!(transport.log.closed.get(), 1);

        assert_eq!(
            events,
            vec![
                Progress::Opening { port: "LinnStrument MIDI 1".to_string() },
                Progress::Connected,
                Progress::Painted(PaintSummary { pads: 200, messages: 600 }),
                Progress::Saved(SaveSlot::ASharp),
            ]
        );
    }

    #[test]
    fn test_program_device_small_variant() {
        let transport = FakeTransport::with_ports(&["LinnStrument MIDI 1"]);
        let config = LayoutConfig {
            variant: DeviceVariant::Pads128,
            save_slot: SaveSlot::B,
            ..LayoutConfig::default()
        };
        let summary = program_device(&transport, &config, |_| {}).unwrap();
        assert_eq!(summary.pads, 128);
        assert_eq!(summary.messages, 385);

        let sent = transport.log.sent.borrow();
        assert!(sent.iter().all(|(cc, v)| *cc != CC_COLUMN || (1..=16).contains(v)));
        assert_eq!(sent.last(), Some(&(23, 2)));
    }

    #[test]
    fn test_program_device_no_matching_port() {
        let transport = FakeTransport::with_ports(&["Midi Through Port-0"]);
        let err = program_device(&transport, &LayoutConfig::default(), |_| {}).unwrap_err();
        assert!(matches!(
            err,
            LinnError::Connection(MidiConnectionError::PortNotFound { .. })
        ));
        assert!(transport.log.opened.borrow().is_empty());
        assert!(transport.log.sent.borrow().is_empty());
    }

    #[test]
    fn test_program_device_open_failure() {
        let mut transport = FakeTransport::with_ports(&["LinnStrument MIDI 1"]);
        transport.fail_open = true;
        let mut events = Vec::new();
        let err =
            program_device(&transport, &LayoutConfig::default(), |p| events.push(p)).unwrap_err();
        assert!(matches!(
            err,
            LinnError::Connection(MidiConnectionError::ConnectionError { .. })
        ));
        assert_eq!(events.len(), 1);
        assert!(transport.log.sent.borrow().is_empty());
    }

    #[test]
    fn test_program_device_send_failure_skips_save_and_closes() {
        let mut transport = FakeTransport::with_ports(&["LinnStrument MIDI 1"]);
        transport.fail_send_at = Some(300);
        let err = program_device(&transport, &LayoutConfig::default(), |_| {}).unwrap_err();
        assert!(matches!(
            err,
            LinnError::Connection(MidiConnectionError::SendError { controller: CC_COLUMN, .. })
        ));
        let sent = transport.log.sent.borrow();
        assert_eq!(sent.len(), 300);
        assert!(!sent.iter().any(|(cc, _)| *cc == CC_SAVE));
        assert_eq!(transport.log.closed.get(), 1);
    }

    #[test]
    fn test_program_device_opens_on_config_channel() {
        let transport = FakeTransport::with_ports(&["LinnStrument MIDI 1"]);
        let config = LayoutConfig {
            channel: 5,
            ..LayoutConfig::default()
        };
        program_device(&transport, &config, |_| {}).unwrap();
        assert_eq!(
            *transport.log.opened.borrow(),
            vec![("LinnStrument MIDI 1".to_string(), 5)]
        );
    }

    #[test]
    fn test_program_device_rejects_bad_config() {
        let transport = FakeTransport::with_ports(&["LinnStrument MIDI 1"]);
        let config = LayoutConfig {
            channel: 20,
            ..LayoutConfig::default()
        };
        let err = program_device(&transport, &config, |_| {}).unwrap_err();
        assert!(matches!(err, LinnError::Config(ConfigError::InvalidChannel(20))));
        assert!(transport.log.opened.borrow().is_empty());
    }
}
