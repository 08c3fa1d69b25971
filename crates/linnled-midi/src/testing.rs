//! Recording fakes for the MIDI transport

use crate::connection::{ControlChangeSink, MidiConnectionError, MidiTransport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Sink that records every control change it is given
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<(u8, u8)>,
    /// Fail the send with this zero-based index
    pub fail_at: Option<usize>,
    attempts: usize,
}

impl RecordingSink {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }
}

impl ControlChangeSink for RecordingSink {
    fn send_cc(&mut self, controller: u8, value: u8) -> Result<(), MidiConnectionError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(MidiConnectionError::SendError {
                controller,
                value,
                reason: "device unplugged".to_string(),
            });
        }
        self.sent.push((controller, value));
        Ok(())
    }
}

/// What a [`FakeTransport`] observed, shared with the sinks it hands out
#[derive(Debug, Default)]
pub struct TransportLog {
    /// Port name and channel of every open
    pub opened: RefCell<Vec<(String, u8)>>,
    pub sent: RefCell<Vec<(u8, u8)>>,
    pub closed: Cell<usize>,
}

/// Transport with a fixed port list
pub struct FakeTransport {
    ports: Vec<String>,
    pub log: Rc<TransportLog>,
    pub fail_open: bool,
    pub fail_send_at: Option<usize>,
}

impl FakeTransport {
    pub fn with_ports(names: &[&str]) -> Self {
        Self {
            ports: names.iter().map(|n| n.to_string()).collect(),
            log: Rc::new(TransportLog::default()),
            fail_open: false,
            fail_send_at: None,
        }
    }
}

impl MidiTransport for FakeTransport {
    type Output = FakeOutput;

    fn output_port_names(&self) -> Result<Vec<String>, MidiConnectionError> {
        Ok(self.ports.clone())
    }

    fn open_output(&self, port_name: &str, channel: u8) -> Result<FakeOutput, MidiConnectionError> {
        if self.fail_open {
            return Err(MidiConnectionError::ConnectionError {
                port: port_name.to_string(),
                reason: "port busy".to_string(),
            });
        }
        self.log
            .opened
            .borrow_mut()
            .push((port_name.to_string(), channel));
        Ok(FakeOutput {
            log: Rc::clone(&self.log),
            fail_at: self.fail_send_at,
        })
    }
}

/// Sink handed out by [`FakeTransport`]
pub struct FakeOutput {
    log: Rc<TransportLog>,
    fail_at: Option<usize>,
}

impl ControlChangeSink for FakeOutput {
    fn send_cc(&mut self, controller: u8, value: u8) -> Result<(), MidiConnectionError> {
        let mut sent = self.log.sent.borrow_mut();
        if self.fail_at == Some(sent.len()) {
            return Err(MidiConnectionError::SendError {
                controller,
                value,
                reason: "device unplugged".to_string(),
            });
        }
        sent.push((controller, value));
        Ok(())
    }
}

impl Drop for FakeOutput {
    fn drop(&mut self) {
        self.log.closed.set(self.log.closed.get() + 1);
    }
}
