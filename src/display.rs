/*!
Seven-segment display ROM: four digit slots driven from one 32 KiB EEPROM.

Address layout (15 bits)
- bits 0-11 : the 12-bit value to show
- bits 12-13: digit slot (0 = least significant digit)
- bit 14    : mode (0 = unsigned octal, 1 = signed decimal)
- bit 15    : outside the 15-bit space, always blank

Octal mode shows all four digits, leading zeros included. Signed decimal
treats the 12-bit value as two's complement (-2048..=2047), shows the
magnitude without leading zeros and marks a negative value with the decimal
point of slot 0. Slot 0 always shows a digit, so zero reads as "0".

Segment wiring (common anode, a cleared bit lights the segment):
  bit: 7 6 5 4 3 2 1 0
  seg: d c g e b f a DP
*/

use crate::encoder::RomEncoder;

pub const SEG_DP: u8 = 1 << 0;
pub const SEG_A: u8 = 1 << 1;
pub const SEG_F: u8 = 1 << 2;
pub const SEG_B: u8 = 1 << 3;
pub const SEG_E: u8 = 1 << 4;
pub const SEG_G: u8 = 1 << 5;
pub const SEG_C: u8 = 1 << 6;
pub const SEG_D: u8 = 1 << 7;

/// All segments off.
pub const BLANK: u8 = 0xFF;

/// XOR mask marking a negative value on slot 0 (lights the decimal point).
pub const SIGN: u8 = SEG_DP;

/// Physical size of the display EEPROM (28C256).
pub const DEVICE_SIZE: u32 = 0x8000;

/// Addresses from here up select signed decimal mode.
pub const DECIMAL_MODE: u16 = 0o40000;

/// Dots in the progress transcript are emitted once per digit-slot block.
pub const PAGE_SIZE: u32 = 0x1000;

const fn lit(segments: u8) -> u8 {
    !segments
}

/// Digit patterns 0-F, indexed by digit value.
pub const SEGMENTS: [u8; 16] = [
    lit(SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F),         // 0
    lit(SEG_B | SEG_C),                                         // 1
    lit(SEG_A | SEG_B | SEG_G | SEG_E | SEG_D),                 // 2
    lit(SEG_A | SEG_B | SEG_G | SEG_C | SEG_D),                 // 3
    lit(SEG_F | SEG_G | SEG_B | SEG_C),                         // 4
    lit(SEG_A | SEG_F | SEG_G | SEG_C | SEG_D),                 // 5
    lit(SEG_A | SEG_F | SEG_G | SEG_E | SEG_D | SEG_C),         // 6
    lit(SEG_A | SEG_B | SEG_C),                                 // 7
    lit(SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G), // 8
    lit(SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G),         // 9
    lit(SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G),         // A
    lit(SEG_C | SEG_D | SEG_E | SEG_F | SEG_G),                 // b
    lit(SEG_A | SEG_D | SEG_E | SEG_F),                         // C
    lit(SEG_B | SEG_C | SEG_D | SEG_E | SEG_G),                 // d
    lit(SEG_A | SEG_D | SEG_E | SEG_F | SEG_G),                 // E
    lit(SEG_A | SEG_E | SEG_F | SEG_G),                         // F
];

const POWERS_OF_TEN: [u16; 4] = [1, 10, 100, 1000];

/// How the 12-bit value of an address is interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    Octal,
    SignedDecimal,
}

/// A display address split into its fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplayAddress {
    pub mode: DisplayMode,
    pub slot: u8,
    pub value: u16,
}

impl DisplayAddress {
    /// Split an address; `None` for addresses outside the 15-bit space.
    #[inline]
    pub fn decode(address: u16) -> Option<Self> {
        if address > 0x7FFF {
            return None;
        }
        let mode = if address >= DECIMAL_MODE {
            DisplayMode::SignedDecimal
        } else {
            DisplayMode::Octal
        };
        Some(Self {
            mode,
            slot: ((address >> 12) & 3) as u8,
            value: address & 0o7777,
        })
    }

    #[inline]
    pub fn encode(self) -> u16 {
        let mode = match self.mode {
            DisplayMode::Octal => 0,
            DisplayMode::SignedDecimal => DECIMAL_MODE,
        };
        mode | (u16::from(self.slot & 3) << 12) | (self.value & 0o7777)
    }
}

/// Pattern for one digit slot of `value` in unsigned octal.
#[inline]
pub fn octal_digit(value: u16, slot: u8) -> u8 {
    let digit = (value >> (3 * u16::from(slot & 3))) & 7;
    SEGMENTS[digit as usize]
}

/// Pattern for one digit slot of the 12-bit two's complement `value` in decimal.
pub fn signed_decimal_digit(value: u16, slot: u8) -> u8 {
    let raw = value & 0o7777;
    let negative = raw & 0o4000 != 0;
    let magnitude = if negative { 0o10000 - raw } else { raw };

    let slot = usize::from(slot & 3);
    let place = POWERS_OF_TEN[slot];
    if slot > 0 && magnitude < place {
        return BLANK;
    }

    let pattern = SEGMENTS[usize::from((magnitude / place) % 10)];
    if slot == 0 && negative {
        pattern ^ SIGN
    } else {
        pattern
    }
}

/// Encoder for the display ROM.
#[derive(Copy, Clone, Debug, Default)]
pub struct DisplayEncoder;

impl RomEncoder for DisplayEncoder {
    fn name(&self) -> &'static str {
        "display"
    }

    fn device_size(&self) -> u32 {
        DEVICE_SIZE
    }

    fn logical_size(&self) -> u32 {
        DEVICE_SIZE
    }

    fn fill_byte(&self) -> u8 {
        BLANK
    }

    fn page_size(&self) -> u32 {
        PAGE_SIZE
    }

    fn encode(&self, address: u16) -> u8 {
        match DisplayAddress::decode(address) {
            None => BLANK,
            Some(DisplayAddress {
                mode: DisplayMode::Octal,
                slot,
                value,
            }) => octal_digit(value, slot),
            Some(DisplayAddress {
                mode: DisplayMode::SignedDecimal,
                slot,
                value,
            }) => signed_decimal_digit(value, slot),
        }
    }
}
