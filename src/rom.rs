use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::config::check_range;
use crate::dump::format_dump;
use crate::encoder::RomEncoder;
use crate::error::Result;

/// The full expected contents of a device, computed on the host.
///
/// This is the reference a programmed part is checked against: it comes
/// straight from the encoder and never touches a bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceImage {
    name: &'static str,
    bytes: Vec<u8>,
}

impl DeviceImage {
    pub fn synthesize(encoder: &dyn RomEncoder) -> Self {
        let bytes = (0..encoder.device_size())
            .map(|address| encoder.expected(address))
            .collect();
        Self {
            name: encoder.name(),
            bytes,
        }
    }

    pub fn load_from_file(name: &'static str, path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn get(&self, address: u32) -> Option<u8> {
        self.bytes.get(address as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The dump a correct device produces for `range`.
    pub fn dump(&self, range: Range<u32>) -> Result<String> {
        check_range(&range, self.bytes.len() as u32)?;
        let slice = &self.bytes[range.start as usize..range.end as usize];
        Ok(format_dump(range, slice))
    }

    /// First address where `contents` differs from the image.
    pub fn first_mismatch(&self, contents: &[u8]) -> Option<u32> {
        if let Some(i) = self.bytes.iter().zip(contents).position(|(a, b)| a != b) {
            return Some(i as u32);
        }
        (contents.len() != self.bytes.len()).then(|| self.bytes.len().min(contents.len()) as u32)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, &self.bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlStoreEncoder;
    use crate::display::DisplayEncoder;
    use crate::error::Error;

    #[test]
    fn control_store_image_is_zero_filled_past_the_table() {
        let image = DeviceImage::synthesize(&ControlStoreEncoder);
        assert_eq!(image.len(), 0x2000);
        assert_eq!(image.get(0), Some(0x82));
        assert!(image.bytes()[2048..].iter().all(|&b| b == 0));
        assert_eq!(image.get(0x2000), None);
    }

    #[test]
    fn display_image_matches_known_digits() {
        let image = DeviceImage::synthesize(&DisplayEncoder);
        assert_eq!(image.len(), 0x8000);
        assert_eq!(image.get(0o0005), Some(0x19));
        assert_eq!(image.get(0o0000), Some(0x21));
    }

    #[test]
    fn dump_rejects_ranges_past_the_end() {
        let image = DeviceImage::synthesize(&ControlStoreEncoder);
        assert!(matches!(image.dump(0..0x2001), Err(Error::InvalidRange { .. })));
        assert_eq!(image.dump(0..2).unwrap(), "82 82 ");
        assert_eq!(image.dump(0x40..0x41).unwrap(), "18 ");
    }

    #[test]
    fn mismatch_reports_first_differing_address() {
        let image = DeviceImage::synthesize(&ControlStoreEncoder);
        let mut contents = image.bytes().to_vec();
        assert_eq!(image.first_mismatch(&contents), None);
        contents[0x123] ^= 1;
        contents[0x456] ^= 1;
        assert_eq!(image.first_mismatch(&contents), Some(0x123));
        assert_eq!(image.first_mismatch(&image.bytes()[..16]), Some(16));
    }

    #[test]
    fn image_file_round_trips() {
        let path = std::env::temp_dir().join(format!("romburn-image-{}.bin", std::process::id()));
        let image = DeviceImage::synthesize(&ControlStoreEncoder);
        image.write_to(&path).unwrap();
        let loaded = DeviceImage::load_from_file(image.name(), &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, image);
    }
}
