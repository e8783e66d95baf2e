/*!
Control-store ROM for the hardwired 12-bit CPU.

Modules:
    signals - Bit-exact control line definitions (`Signals`).
    isa     - Opcode layout: instruction and addressing-mode decode.
    table   - Compile-time micro-step sequences (`CONTROL_STORE`).

Address layout (13 bits, three identical 8 KiB EEPROMs side by side or one
part programmed per bank):

  12 11 10  9 | 8 7 6 | 5 4 3 2 1 0
     bank     | cycle |   opcode

Bank 0-2 select one byte of the 24-bit word. Everything from address 2048
upward (bank 4 and beyond, the unused top of the device) reads as zero so an
unused ROM location never asserts a signal.
*/

pub mod isa;
pub mod signals;
pub mod table;

pub use isa::{AddressingMode, Instruction, Opcode};
pub use signals::Signals;
pub use table::{CONTROL_STORE, ControlStore, MAX_CYCLES, Sequence};

use crate::encoder::RomEncoder;

/// Physical size of the control-store EEPROM (28C64).
pub const DEVICE_SIZE: u32 = 0x2000;

/// Addresses covered by the instruction table; the rest is zero-filled.
pub const LOGICAL_SIZE: u32 = 2048;

/// Addresses per bank; one progress dot per bank.
pub const BANK_SIZE: u32 = 512;

/// A control-store address split into its fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlAddress {
    pub bank: u8,
    pub cycle: u8,
    pub opcode: u8,
}

impl ControlAddress {
    #[inline]
    pub fn decode(address: u16) -> Self {
        Self {
            bank: (address >> 9) as u8,
            cycle: ((address >> 6) & 7) as u8,
            opcode: (address & 63) as u8,
        }
    }

    #[inline]
    pub fn encode(self) -> u16 {
        (u16::from(self.bank) << 9) | (u16::from(self.cycle & 7) << 6) | u16::from(self.opcode & 63)
    }
}

/// Encoder for the control-store ROM.
#[derive(Copy, Clone, Debug, Default)]
pub struct ControlStoreEncoder;

impl RomEncoder for ControlStoreEncoder {
    fn name(&self) -> &'static str {
        "control-store"
    }

    fn device_size(&self) -> u32 {
        DEVICE_SIZE
    }

    fn logical_size(&self) -> u32 {
        LOGICAL_SIZE
    }

    fn fill_byte(&self) -> u8 {
        0
    }

    fn page_size(&self) -> u32 {
        BANK_SIZE
    }

    fn encode(&self, address: u16) -> u8 {
        if u32::from(address) >= LOGICAL_SIZE {
            return 0;
        }
        let a = ControlAddress::decode(address);
        CONTROL_STORE.word(a.opcode, a.cycle).bank_byte(a.bank)
    }
}
