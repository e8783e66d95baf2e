/*!
pins: the raw lines between the programmer and the device.

Lines
- shift data / shift clock: 2-wire feed into the address latch. A rising
  clock edge shifts the data line in. No framing and no acknowledge.
- data lines 0-7: bidirectional, direction set by the programmer.
- write-enable (WE) and output-enable (OE): active low.

Implementors are the hardware port of a real programmer, or a model of
the device for host-side runs (`SimulatedEeprom`).
*/

use crate::bus::DataDirection;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    #[inline]
    pub fn from_bit(bit: bool) -> Level {
        if bit { Level::High } else { Level::Low }
    }

    #[inline]
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

pub trait Pins {
    fn set_shift_data(&mut self, level: Level);
    fn set_shift_clock(&mut self, level: Level);

    /// Direction of the programmer's side of the 8 data lines.
    fn set_data_direction(&mut self, direction: DataDirection);
    fn write_data_line(&mut self, line: u8, level: Level);
    fn read_data_line(&mut self, line: u8) -> Level;

    fn set_write_enable(&mut self, level: Level);
    fn set_output_enable(&mut self, level: Level);
}
