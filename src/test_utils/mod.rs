//! Shared test utilities for bus-level and transcript-level checks.
//!
//! - `RecordingPins` logs every line change so tests can assert exact bit
//!   order and pulse ordering without a device model.
//! - `parse_dump` turns a hex dump back into bytes so a run's output can be
//!   compared against an independently synthesized `DeviceImage`.
//! - `split_transcript` separates the progress header from the dump.

#![allow(dead_code)]

use crate::bus::DataDirection;
use crate::bus::pins::{Level, Pins};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinEvent {
    ShiftData(Level),
    ShiftClock(Level),
    Direction(DataDirection),
    DataLine(u8, Level),
    WriteEnable(Level),
    OutputEnable(Level),
}

/// `Pins` that records every call. Reads return bits of `read_value`.
#[derive(Default)]
pub struct RecordingPins {
    pub events: Vec<PinEvent>,
    pub read_value: u8,
    pub lines_read: Vec<u8>,
}

impl RecordingPins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits latched on rising shift-clock edges, in the order sent.
    pub fn shifted_bits(&self) -> Vec<u8> {
        let mut data = Level::Low;
        let mut bits = Vec::new();
        for e in &self.events {
            match *e {
                PinEvent::ShiftData(l) => data = l,
                PinEvent::ShiftClock(Level::High) => bits.push(u8::from(data.is_high())),
                _ => {}
            }
        }
        bits
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.lines_read.clear();
    }
}

impl Pins for RecordingPins {
    fn set_shift_data(&mut self, level: Level) {
        self.events.push(PinEvent::ShiftData(level));
    }

    fn set_shift_clock(&mut self, level: Level) {
        self.events.push(PinEvent::ShiftClock(level));
    }

    fn set_data_direction(&mut self, direction: DataDirection) {
        self.events.push(PinEvent::Direction(direction));
    }

    fn write_data_line(&mut self, line: u8, level: Level) {
        self.events.push(PinEvent::DataLine(line, level));
    }

    fn read_data_line(&mut self, line: u8) -> Level {
        self.lines_read.push(line);
        Level::from_bit((self.read_value >> line) & 1 != 0)
    }

    fn set_write_enable(&mut self, level: Level) {
        self.events.push(PinEvent::WriteEnable(level));
    }

    fn set_output_enable(&mut self, level: Level) {
        self.events.push(PinEvent::OutputEnable(level));
    }
}

/// Parse a dump (`"xx xx ...\n"`) back into bytes.
pub fn parse_dump(text: &str) -> Vec<u8> {
    text.split_whitespace()
        .map(|tok| u8::from_str_radix(tok, 16).expect("dump token is not hex"))
        .collect()
}

/// Split a run transcript into `(progress header, dump)`.
pub fn split_transcript(text: &str) -> (&str, &str) {
    const FINISHED: &str = "\nFinished\n";
    let at = text.find(FINISHED).expect("transcript has no Finished marker");
    (&text[..at], &text[at + FINISHED.len()..])
}
