//! Recording test doubles for the transport and delay

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::display::Display;
use crate::interface::DisplayInterface;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Reset,
    Acquire,
    Release,
    CommandMode,
    DataMode,
    Write(Vec<u8>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Default)]
pub struct MockInterface {
    pub events: Vec<Event>,
    pub fail_writes: bool,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written while DC was low
    pub fn command_bytes(&self) -> Vec<u8> {
        self.bytes_in_mode(true)
    }

    /// Bytes written while DC was high
    pub fn data_bytes(&self) -> Vec<u8> {
        self.bytes_in_mode(false)
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }

    fn bytes_in_mode(&self, command: bool) -> Vec<u8> {
        let mut in_command = false;
        let mut bytes = Vec::new();
        for event in &self.events {
            match event {
                Event::CommandMode => in_command = true,
                Event::DataMode => in_command = false,
                Event::Write(data) if in_command == command => bytes.extend_from_slice(data),
                _ => {}
            }
        }
        bytes
    }
}

impl DisplayInterface for MockInterface {
    type Error = MockError;

    fn acquire(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Acquire);
        Ok(())
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Release);
        Ok(())
    }

    fn command_mode(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::CommandMode);
        Ok(())
    }

    fn data_mode(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::DataMode);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockError);
        }
        self.events.push(Event::Write(bytes.to_vec()));
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) {
        self.events.push(Event::Reset);
    }
}

#[derive(Debug, Default)]
pub struct MockDelay {
    pub delays_us: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_us.push(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.delays_us.push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_us.push(ms * 1_000);
    }
}

pub type MockDisplay = Display<MockInterface, MockDelay>;

/// Uninitialized 96x64 display with an empty event log
pub fn display() -> MockDisplay {
    Display::new(MockInterface::new(), MockDelay::default(), Config::default())
}

/// Forget everything recorded so far
pub fn clear(display: &mut MockDisplay) {
    display.interface_mut().events.clear();
    display.delay_mut().delays_us.clear();
}
