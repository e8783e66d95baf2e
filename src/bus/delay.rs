/*!
delay: blocking waits for the open-loop bus protocol.

The bus is generic over `embedded_hal::delay::DelayNs`, so a hardware port
passes its HAL's delay provider straight in. Two host-side providers live
here:
- `ThreadDelay` sleeps for real.
- `RecordingDelay` only adds up what was asked for, which keeps host-side
  simulation fast and lets tests check that every required wait was issued.
*/

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

#[derive(Copy, Clone, Debug, Default)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        if ns > 0 {
            thread::sleep(Duration::from_nanos(u64::from(ns)));
        }
    }

    fn delay_us(&mut self, us: u32) {
        if us > 0 {
            thread::sleep(Duration::from_micros(u64::from(us)));
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        if ms > 0 {
            thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }
}

/// Accumulates requested delays without waiting.
#[derive(Clone, Debug, Default)]
pub struct RecordingDelay {
    total_ns: u64,
    calls: u64,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Sum of every delay requested so far, in whole microseconds.
    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }

    fn record(&mut self, ns: u64) {
        self.total_ns += ns;
        self.calls += 1;
    }
}

// One call per request; the provided methods would split long waits into chunks.
impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.record(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(u64::from(ms) * 1_000_000);
    }
}
