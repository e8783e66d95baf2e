/*!
Transcript output: progress markers and the verification hex dump.

Format (bit-exact)
- `Programming`, one `.` per completed page, then `\nFinished\n`.
- Dump: each byte as two lowercase hex digits. A byte whose address is the
  last of a 16-byte row (`(address + 1) % 16 == 0`) is followed by `\n`,
  every other byte by a single space. Rows are aligned to absolute
  addresses, so a range starting mid-row gives a short first line.
*/

use std::io::Write;
use std::ops::Range;

use crate::error::Result;

pub const PROGRAMMING_MARKER: &str = "Programming";
pub const PROGRESS_MARK: char = '.';
pub const FINISHED_MARKER: &str = "\nFinished\n";

/// Bytes per dump row.
pub const ROW_WIDTH: u32 = 16;

/// Streams dump bytes into a writer.
pub struct HexDump<W: Write> {
    out: W,
}

impl<W: Write> HexDump<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn push(&mut self, address: u32, byte: u8) -> Result<()> {
        let sep = if (address + 1) % ROW_WIDTH == 0 { '\n' } else { ' ' };
        write!(self.out, "{byte:02x}{sep}")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format `bytes`, which hold the device contents starting at `range.start`.
pub fn format_dump(range: Range<u32>, bytes: &[u8]) -> String {
    let mut text = String::with_capacity(range.len() * 3);
    for (address, &byte) in range.zip(bytes) {
        let sep = if (address + 1) % ROW_WIDTH == 0 { '\n' } else { ' ' };
        text.push_str(&format!("{byte:02x}{sep}"));
    }
    text
}
