/*!
encoder: the address -> byte function every ROM variant provides.

The driver, the dump, image synthesis and the CLI only ever see a
`&dyn RomEncoder`, so adding a ROM variant means adding one implementor.

Contract
- `encode` is pure, deterministic and total over `u16`. Addresses outside a
  variant's meaningful space return that variant's safe default instead of
  failing, because a full sweep always presents every address.
- `logical_size` <= `device_size`. The driver programs `[0, logical_size)`
  from `encode` and fills `[logical_size, device_size)` with `fill_byte`.
*/

use crate::control::ControlStoreEncoder;
use crate::display::DisplayEncoder;

pub trait RomEncoder {
    /// Short name used in logs and the CLI.
    fn name(&self) -> &'static str;

    /// Bytes in the physical device.
    fn device_size(&self) -> u32;

    /// Bytes covered by the encoding table.
    fn logical_size(&self) -> u32;

    /// Byte written over the part of the device the table does not cover.
    fn fill_byte(&self) -> u8;

    /// Addresses per progress dot.
    fn page_size(&self) -> u32;

    fn encode(&self, address: u16) -> u8;

    /// The byte the device must hold at `address` after a full run.
    fn expected(&self, address: u32) -> u8 {
        if address < self.logical_size() {
            self.encode(address as u16)
        } else {
            self.fill_byte()
        }
    }
}

/// The ROM variants this crate knows how to build.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Seven-segment display decoder (octal / signed decimal).
    Display,
    /// 24-bit control store of the hardwired CPU.
    ControlStore,
}

impl Variant {
    pub fn encoder(self) -> &'static dyn RomEncoder {
        match self {
            Variant::Display => &DisplayEncoder,
            Variant::ControlStore => &ControlStoreEncoder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_table_fits_device() {
        for variant in [Variant::Display, Variant::ControlStore] {
            let e = variant.encoder();
            assert!(e.logical_size() <= e.device_size(), "{}", e.name());
            assert_eq!(e.device_size() % e.page_size(), 0, "{}", e.name());
            assert!(e.device_size() <= 0x1_0000);
        }
    }

    #[test]
    fn expected_uses_fill_past_logical_table() {
        let e = Variant::ControlStore.encoder();
        assert_eq!(e.expected(0), 0x82);
        assert_eq!(e.expected(2048), 0);
        assert_eq!(e.expected(0x1FFF), 0);

        let d = Variant::Display.encoder();
        assert_eq!(d.expected(5), 0x19);
        assert_eq!(d.expected(0x7FFF), d.encode(0x7FFF));
    }
}
