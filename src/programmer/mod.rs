/*!
programmer: the Idle -> Programming -> Verifying -> Finished driver.

Purpose
- Program a whole device from a `RomEncoder`, then read back a range and
  emit the hex dump, writing the transcript to any `io::Write`.

Passes
- Programming: `[0, logical_size)` from `encode`, then a fill pass over
  `[logical_size, device_size)` with `fill_byte`, so bytes left on the part
  by an earlier image never survive. One `.` per completed page, counted
  across both passes.
- Switch to input (output-enable asserted) and enter Verifying.
- Verifying: read the dump range and stream it through `HexDump`.

Notes
- The write protocol has no acknowledge. A bad image is only caught by the
  dump disagreeing with an independently synthesized `DeviceImage`.
- There is no retry or resume. Calling a pass out of order is an
  `Error::InvalidState`; a failed pass leaves the state where it stopped.
*/

use std::fmt;
use std::io::Write;
use std::ops::Range;

use log::{debug, info};

use crate::bus::{DataDirection, ProgrammerBus};
use crate::config::{ProgrammerConfig, check_range};
use crate::dump::{FINISHED_MARKER, HexDump, PROGRAMMING_MARKER, PROGRESS_MARK};
use crate::encoder::RomEncoder;
use crate::error::{Error, Result};
use crate::sequencer::AddressSequencer;

#[cfg(test)]
mod tests;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgrammerState {
    Idle,
    Programming,
    Verifying,
    Finished,
}

impl fmt::Display for ProgrammerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProgrammerState::Idle => "idle",
            ProgrammerState::Programming => "programming",
            ProgrammerState::Verifying => "verifying",
            ProgrammerState::Finished => "finished",
        })
    }
}

pub struct Programmer<'e, B: ProgrammerBus> {
    bus: B,
    encoder: &'e dyn RomEncoder,
    state: ProgrammerState,
}

impl<'e, B: ProgrammerBus> Programmer<'e, B> {
    pub fn new(bus: B, encoder: &'e dyn RomEncoder) -> Self {
        Self {
            bus,
            encoder,
            state: ProgrammerState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> ProgrammerState {
        self.state
    }

    pub fn encoder(&self) -> &'e dyn RomEncoder {
        self.encoder
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }

    fn expect(&self, expected: ProgrammerState) -> Result<()> {
        if self.state != expected {
            return Err(Error::InvalidState {
                expected,
                found: self.state,
            });
        }
        Ok(())
    }

    fn enter(&mut self, next: ProgrammerState) {
        info!("{}: {} -> {}", self.encoder.name(), self.state, next);
        self.state = next;
    }

    /// Program the whole device and leave the bus ready to read.
    pub fn program<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.expect(ProgrammerState::Idle)?;
        self.enter(ProgrammerState::Programming);

        let encoder = self.encoder;
        let logical = encoder.logical_size();
        let device = encoder.device_size();
        let page = encoder.page_size();
        let fill = encoder.fill_byte();

        out.write_all(PROGRAMMING_MARKER.as_bytes())?;

        let mut progress = |address: u32| -> Result<()> {
            if (address + 1) % page == 0 {
                debug!("page {:#06x} done", address + 1 - page);
                write!(out, "{PROGRESS_MARK}")?;
                out.flush()?;
            }
            Ok(())
        };

        let mut sequencer = AddressSequencer::new(&mut self.bus);
        info!("{}: writing {:#06x} bytes", encoder.name(), logical);
        sequencer.write_range(0..logical, |a| encoder.encode(a as u16), &mut progress)?;
        if logical < device {
            info!(
                "{}: filling {:#06x}..{:#06x} with {:02x}",
                encoder.name(),
                logical,
                device,
                fill
            );
            sequencer.write_range(logical..device, |_| fill, &mut progress)?;
        }

        out.write_all(FINISHED_MARKER.as_bytes())?;
        self.bus.set_data_direction(DataDirection::Input);
        self.enter(ProgrammerState::Verifying);
        Ok(())
    }

    /// Read `range` back and write it as a hex dump.
    pub fn verify<W: Write>(&mut self, range: Range<u32>, out: &mut W) -> Result<()> {
        self.expect(ProgrammerState::Verifying)?;
        check_range(&range, self.encoder.device_size())?;
        info!(
            "{}: dumping {:#06x}..{:#06x}",
            self.encoder.name(),
            range.start,
            range.end
        );

        let mut dump = HexDump::new(&mut *out);
        AddressSequencer::new(&mut self.bus).read_range(range, |a, b| dump.push(a, b))?;
        out.flush()?;

        self.enter(ProgrammerState::Finished);
        Ok(())
    }

    /// Program, then dump `config.dump_range`, returning the bus.
    ///
    /// The range is validated before the first write, so a bad range never
    /// costs a programming pass.
    pub fn run<W: Write>(mut self, config: &ProgrammerConfig, out: &mut W) -> Result<B> {
        let range = config.dump_range_for(self.encoder)?;
        self.program(out)?;
        self.verify(range, out)?;
        Ok(self.bus)
    }
}
