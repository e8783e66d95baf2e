/*!
bitbang: `ProgrammerBus` on raw lines.

Purpose
- Turn the three bus operations into line sequences with the documented
  bit orders and waits. This is the only place the wire contract lives.

Line protocol
- Address: for bit 15 down to bit 0, set shift data, raise shift clock,
  lower shift clock. Then wait `address_settle_us`.
- Write: data line `i` carries bit `i` of the byte (LSB on line 0). WE goes
  low for `write_pulse_us`, back high, then the bus waits `write_hold_ms`
  for the device's internal write cycle.
- Read: wait `read_settle_us`, then sample line 7 down to line 0, shifting
  each into the low end of the result. Line `i` lands in bit `i`, the exact
  inverse of the write order.
- Direction: to read, release the lines first and then assert OE; to write,
  deassert OE first and then drive the lines. The two sides never drive the
  data lines at the same time.

Idle state after `new`: WE high, OE high, data lines driven by the
programmer.
*/

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::bus::pins::{Level, Pins};
use crate::bus::{DataDirection, ProgrammerBus};
use crate::config::Timing;

pub struct BitBangBus<P, D> {
    pins: P,
    delay: D,
    timing: Timing,
    direction: DataDirection,
}

impl<P: Pins, D: DelayNs> BitBangBus<P, D> {
    pub fn new(mut pins: P, delay: D, timing: Timing) -> Self {
        pins.set_write_enable(Level::High);
        pins.set_output_enable(Level::High);
        pins.set_shift_clock(Level::Low);
        pins.set_data_direction(DataDirection::Output);
        Self {
            pins,
            delay,
            timing,
            direction: DataDirection::Output,
        }
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn into_parts(self) -> (P, D) {
        (self.pins, self.delay)
    }
}

impl<P: Pins, D: DelayNs> ProgrammerBus for BitBangBus<P, D> {
    fn present_address(&mut self, address: u16) {
        for bit in (0..16).rev() {
            self.pins
                .set_shift_data(Level::from_bit((address >> bit) & 1 != 0));
            self.pins.set_shift_clock(Level::High);
            self.pins.set_shift_clock(Level::Low);
        }
        self.delay.delay_us(self.timing.address_settle_us);
    }

    fn set_data_direction(&mut self, direction: DataDirection) {
        if direction == self.direction {
            return;
        }
        trace!("data lines -> {:?}", direction);
        match direction {
            DataDirection::Input => {
                self.pins.set_data_direction(DataDirection::Input);
                self.pins.set_output_enable(Level::Low);
            }
            DataDirection::Output => {
                self.pins.set_output_enable(Level::High);
                self.pins.set_data_direction(DataDirection::Output);
            }
        }
        self.direction = direction;
    }

    fn data_direction(&self) -> DataDirection {
        self.direction
    }

    fn write_byte(&mut self, value: u8) {
        debug_assert_eq!(self.direction, DataDirection::Output);
        for line in 0..8 {
            self.pins
                .write_data_line(line, Level::from_bit((value >> line) & 1 != 0));
        }
        self.pins.set_write_enable(Level::Low);
        self.delay.delay_us(self.timing.write_pulse_us);
        self.pins.set_write_enable(Level::High);
        self.delay.delay_ms(self.timing.write_hold_ms);
    }

    fn read_byte(&mut self) -> u8 {
        debug_assert_eq!(self.direction, DataDirection::Input);
        self.delay.delay_us(self.timing.read_settle_us);
        let mut value = 0u8;
        for line in (0..8).rev() {
            value = (value << 1) | u8::from(self.pins.read_data_line(line).is_high());
        }
        value
    }
}
