/*!
SimulatedEeprom: the address latch and a 28C-series EEPROM behind `Pins`.

Behavior:
- Shift data/clock feed a `ShiftRegister`; its outputs are the device's
  address pins, masked to the device size.
- Write: the byte on the data lines is stored on the rising edge of WE,
  provided OE is high. The 28C parts inhibit writes while OE is low.
- Read: when the programmer's lines are inputs and OE is low, line `i`
  reads bit `i` of the addressed cell. With nobody driving, lines float
  high.
- A fresh device is erased (`0xFF`).
*/

use log::trace;

use crate::bus::DataDirection;
use crate::bus::pins::{Level, Pins};
use crate::bus::shift_register::ShiftRegister;

pub struct SimulatedEeprom {
    cells: Vec<u8>,
    latch: ShiftRegister,
    direction: DataDirection,
    driven: u8,
    write_enable: Level,
    output_enable: Level,
    writes: u32,
    inhibited_writes: u32,
}

impl SimulatedEeprom {
    /// An erased device of `size` bytes. `size` must be a power of two.
    pub fn new(size: usize) -> Self {
        Self::with_contents(vec![0xFF; size])
    }

    pub fn with_contents(cells: Vec<u8>) -> Self {
        assert!(
            cells.len().is_power_of_two(),
            "device size must be a power of two"
        );
        Self {
            cells,
            latch: ShiftRegister::new(),
            direction: DataDirection::Output,
            driven: 0,
            write_enable: Level::High,
            output_enable: Level::High,
            writes: 0,
            inhibited_writes: 0,
        }
    }

    /// Address currently on the device pins.
    #[inline]
    pub fn address(&self) -> usize {
        usize::from(self.latch.outputs()) & (self.cells.len() - 1)
    }

    pub fn contents(&self) -> &[u8] {
        &self.cells
    }

    pub fn into_contents(self) -> Vec<u8> {
        self.cells
    }

    pub fn latch(&self) -> &ShiftRegister {
        &self.latch
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }

    /// WE pulses ignored because OE was asserted.
    pub fn inhibited_writes(&self) -> u32 {
        self.inhibited_writes
    }

    pub fn output_enabled(&self) -> bool {
        self.output_enable == Level::Low
    }
}

impl Pins for SimulatedEeprom {
    fn set_shift_data(&mut self, level: Level) {
        self.latch.set_data(level);
    }

    fn set_shift_clock(&mut self, level: Level) {
        self.latch.set_clock(level);
    }

    fn set_data_direction(&mut self, direction: DataDirection) {
        self.direction = direction;
    }

    fn write_data_line(&mut self, line: u8, level: Level) {
        let mask = 1u8 << (line & 7);
        if level.is_high() {
            self.driven |= mask;
        } else {
            self.driven &= !mask;
        }
    }

    fn read_data_line(&mut self, line: u8) -> Level {
        let byte = match self.direction {
            DataDirection::Output => self.driven,
            DataDirection::Input if self.output_enabled() => self.cells[self.address()],
            DataDirection::Input => 0xFF,
        };
        Level::from_bit((byte >> (line & 7)) & 1 != 0)
    }

    fn set_write_enable(&mut self, level: Level) {
        let rising = self.write_enable == Level::Low && level == Level::High;
        self.write_enable = level;
        if !rising {
            return;
        }
        if self.output_enabled() || self.direction == DataDirection::Input {
            self.inhibited_writes += 1;
            return;
        }
        let address = self.address();
        trace!("eeprom[{:#06x}] <- {:02x}", address, self.driven);
        self.cells[address] = self.driven;
        self.writes += 1;
    }

    fn set_output_enable(&mut self, level: Level) {
        self.output_enable = level;
    }
}
