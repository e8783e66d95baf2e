/*!
Address sequencer: the one loop both passes share.

Purpose
- Walk `[start, end)` in ascending order, presenting every address on the
  bus and moving exactly one byte per address.

Ordering (per address)
- Write pass: present address, take the byte from `source`, write it, then
  call `after`. The bus guarantees the write cycle is complete before
  `write_byte` returns, so the next address never overlaps a write pulse.
- Read pass: present address, read, hand `(address, byte)` to `sink`.

The data direction is set once, before the first address, so a pass never
switches drivers mid-sweep.
*/

use std::ops::Range;

use log::trace;

use crate::bus::{DataDirection, ProgrammerBus};
use crate::error::Result;

pub struct AddressSequencer<'b, B: ProgrammerBus> {
    bus: &'b mut B,
}

impl<'b, B: ProgrammerBus> AddressSequencer<'b, B> {
    pub fn new(bus: &'b mut B) -> Self {
        Self { bus }
    }

    fn walk<F>(&mut self, range: Range<u32>, direction: DataDirection, mut step: F) -> Result<()>
    where
        F: FnMut(&mut B, u32) -> Result<()>,
    {
        self.bus.set_data_direction(direction);
        for address in range {
            self.bus.present_address(address as u16);
            step(&mut *self.bus, address)?;
        }
        Ok(())
    }

    /// Program every address in `range` with `source(address)`.
    ///
    /// `after` runs once each byte is committed; the driver uses it for
    /// progress output. An error from `after` stops the pass.
    pub fn write_range<S, A>(&mut self, range: Range<u32>, mut source: S, mut after: A) -> Result<()>
    where
        S: FnMut(u32) -> u8,
        A: FnMut(u32) -> Result<()>,
    {
        self.walk(range, DataDirection::Output, |bus, address| {
            let value = source(address);
            trace!("write {:#06x} = {:02x}", address, value);
            bus.write_byte(value);
            after(address)
        })
    }

    /// Read every address in `range`, handing each byte to `sink`.
    pub fn read_range<K>(&mut self, range: Range<u32>, mut sink: K) -> Result<()>
    where
        K: FnMut(u32, u8) -> Result<()>,
    {
        self.walk(range, DataDirection::Input, |bus, address| {
            let value = bus.read_byte();
            trace!("read {:#06x} = {:02x}", address, value);
            sink(address, value)
        })
    }
}
