/*!
Serial-in/parallel-out address latch (two cascaded 8-bit shift registers).

Behavior:
- The data line is sampled on each rising edge of the clock and shifted in
  at bit 0; every earlier bit moves one place up. After 16 clocks the first
  bit sent sits at bit 15, so the programmer sends the address MSB first.
- Outputs follow the register directly (no separate storage latch), which
  is why the programmer waits for the address to settle before pulsing WE.
- Levels written while the clock is already high do not shift.
*/

use crate::bus::pins::Level;

#[derive(Clone, Debug)]
pub struct ShiftRegister {
    bits: u16,
    data: Level,
    clock: Level,
    edges: u32,
}

impl Default for ShiftRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftRegister {
    pub fn new() -> Self {
        Self {
            bits: 0,
            data: Level::Low,
            clock: Level::Low,
            edges: 0,
        }
    }

    #[inline]
    pub fn set_data(&mut self, level: Level) {
        self.data = level;
    }

    #[inline]
    pub fn set_clock(&mut self, level: Level) {
        if self.clock == Level::Low && level == Level::High {
            self.bits = (self.bits << 1) | u16::from(self.data.is_high());
            self.edges = self.edges.wrapping_add(1);
        }
        self.clock = level;
    }

    /// Parallel outputs Q0..Q15.
    #[inline]
    pub fn outputs(&self) -> u16 {
        self.bits
    }

    /// Rising edges seen so far.
    pub fn edges(&self) -> u32 {
        self.edges
    }
}
