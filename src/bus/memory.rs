/*!
MemoryBus: a byte array standing in for the whole bus and device.

Addresses wrap at the array length. Reads and writes are counted so sweep
tests can check that every address was visited exactly once per pass.
*/

use crate::bus::{DataDirection, ProgrammerBus};

pub struct MemoryBus {
    cells: Vec<u8>,
    address: u16,
    direction: DataDirection,
    writes: u32,
    reads: u32,
}

impl MemoryBus {
    /// A bus over `size` bytes, erased to `0xFF` like a fresh EEPROM.
    pub fn new(size: usize) -> Self {
        Self::with_contents(vec![0xFF; size])
    }

    pub fn with_contents(cells: Vec<u8>) -> Self {
        assert!(!cells.is_empty(), "MemoryBus needs at least one cell");
        Self {
            cells,
            address: 0,
            direction: DataDirection::Output,
            writes: 0,
            reads: 0,
        }
    }

    #[inline]
    fn index(&self) -> usize {
        usize::from(self.address) % self.cells.len()
    }

    pub fn contents(&self) -> &[u8] {
        &self.cells
    }

    pub fn into_contents(self) -> Vec<u8> {
        self.cells
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }
}

impl ProgrammerBus for MemoryBus {
    #[inline]
    fn present_address(&mut self, address: u16) {
        self.address = address;
    }

    fn set_data_direction(&mut self, direction: DataDirection) {
        self.direction = direction;
    }

    fn data_direction(&self) -> DataDirection {
        self.direction
    }

    fn write_byte(&mut self, value: u8) {
        debug_assert_eq!(self.direction, DataDirection::Output);
        let idx = self.index();
        self.cells[idx] = value;
        self.writes += 1;
    }

    fn read_byte(&mut self) -> u8 {
        debug_assert_eq!(self.direction, DataDirection::Input);
        self.reads += 1;
        self.cells[self.index()]
    }
}
