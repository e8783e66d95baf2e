#![doc = r#"
Bus module: the narrow interface the programmer drives, and its backends.

Overview
- `ProgrammerBus` is the only thing the sequencer, driver and dump talk to:
  present an address, move one byte in the current direction.
- `BitBangBus` implements it on raw lines (`Pins`) with explicit delays
  (`embedded_hal::delay::DelayNs`): 16 address bits shifted MSB first into a serial-in/parallel-out
  latch, 8 parallel data lines, active-low write-enable and output-enable.
- `MemoryBus` implements it on a plain byte array for tests of the sweep
  logic that do not care about line-level behavior.
- `SimulatedEeprom` implements `Pins` and models the latch and the EEPROM
  behind it, so the full bit-banged path runs on the host.

Modules and responsibilities
- pins: line-level trait (`Pins`, `Level`).
- delay: `embedded_hal` delay providers (`ThreadDelay`, `RecordingDelay`).
- bitbang: `BitBangBus`, the line protocol and its timing.
- shift_register: 16-bit serial-in/parallel-out address latch model.
- memory: `MemoryBus` byte-array double.
- simulated: `SimulatedEeprom`, latch + EEPROM array behind `Pins`.
"#]

pub mod bitbang;
pub mod delay;
pub mod memory;
pub mod pins;
pub mod shift_register;
pub mod simulated;

#[cfg(test)]
mod tests;

pub use bitbang::BitBangBus;
pub use delay::{RecordingDelay, ThreadDelay};
pub use memory::MemoryBus;
pub use pins::{Level, Pins};
pub use shift_register::ShiftRegister;
pub use simulated::SimulatedEeprom;

/// Direction of the 8 data lines as seen from the programmer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DataDirection {
    /// Programmer drives the lines; device output is disabled.
    Output,
    /// Programmer samples the lines; device output is enabled.
    Input,
}

/// Byte-wide device access through a latched address.
///
/// Timing contract (see `config::Timing`):
/// - `present_address` returns only after the address has settled on the
///   device pins.
/// - `write_byte` returns only after the device's write cycle has completed,
///   so the next `present_address` cannot disturb the byte being written.
/// - `read_byte` samples after the read settle time.
pub trait ProgrammerBus {
    fn present_address(&mut self, address: u16);

    /// Switch the data lines. Switching to `Input` also enables the device
    /// output; switching to `Output` disables it first.
    fn set_data_direction(&mut self, direction: DataDirection);

    fn data_direction(&self) -> DataDirection;

    /// Write one byte at the presented address. Lines must be `Output`.
    fn write_byte(&mut self, value: u8);

    /// Read one byte at the presented address. Lines must be `Input`.
    fn read_byte(&mut self) -> u8;
}

impl<B: ProgrammerBus + ?Sized> ProgrammerBus for &mut B {
    #[inline]
    fn present_address(&mut self, address: u16) {
        (**self).present_address(address)
    }

    #[inline]
    fn set_data_direction(&mut self, direction: DataDirection) {
        (**self).set_data_direction(direction)
    }

    #[inline]
    fn data_direction(&self) -> DataDirection {
        (**self).data_direction()
    }

    #[inline]
    fn write_byte(&mut self, value: u8) {
        (**self).write_byte(value)
    }

    #[inline]
    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }
}
