/*!
Run configuration: line timing and the verification range.

Timing
- The protocol is open loop. Nothing on the bus acknowledges a transfer, so
  the delays below are the only thing standing between a run and a silently
  corrupted device. They are minimums; a slower bus is always correct.
- `write_hold_ms` covers the device's internal write cycle and is the value
  most worth tuning per part (28C-series parts need single-digit ms).

Address literals
- The CLI accepts `0x`/`$` hexadecimal, `0o`/`@` octal and plain decimal, the
  last two prefixes matching the target CPU's assembler syntax.
*/

use std::ops::Range;

use crate::encoder::RomEncoder;
use crate::error::{Error, Result};

/// Minimum hold/settle times used by the bit-banged bus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Wait after the last address bit is clocked into the latch.
    pub address_settle_us: u32,
    /// Width of the active-low write-enable pulse.
    pub write_pulse_us: u32,
    /// Wait after write-enable returns high, before the next address.
    pub write_hold_ms: u32,
    /// Wait after the address settles before sampling the data lines.
    pub read_settle_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            address_settle_us: 1,
            write_pulse_us: 1,
            write_hold_ms: 5,
            read_settle_us: 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgrammerConfig {
    pub timing: Timing,
    /// Addresses to dump after programming; `None` dumps the whole device.
    pub dump_range: Option<Range<u32>>,
}

impl ProgrammerConfig {
    /// Resolve the dump range for `encoder`, rejecting reversed ranges and
    /// ranges that run past the end of the device.
    pub fn dump_range_for(&self, encoder: &dyn RomEncoder) -> Result<Range<u32>> {
        let device_size = encoder.device_size();
        let range = self.dump_range.clone().unwrap_or(0..device_size);
        check_range(&range, device_size)?;
        Ok(range)
    }
}

pub(crate) fn check_range(range: &Range<u32>, device_size: u32) -> Result<()> {
    if range.start > range.end {
        return Err(Error::ReversedRange(range.clone()));
    }
    if range.end > device_size {
        return Err(Error::InvalidRange {
            range: range.clone(),
            device_size,
        });
    }
    Ok(())
}

/// Build a dump range from optional CLI bounds. A missing start means 0,
/// a missing end means the end of the device; neither means the default.
pub fn dump_range_from_bounds(
    start: Option<u32>,
    end: Option<u32>,
    device_size: u32,
) -> Option<Range<u32>> {
    match (start, end) {
        (None, None) => None,
        (start, end) => Some(start.unwrap_or(0)..end.unwrap_or(device_size)),
    }
}

/// Parse an address literal (`0x1f`, `$1f`, `0o37`, `@37` or `31`).
pub fn parse_address(text: &str) -> Result<u32> {
    let t = text.trim();
    let (digits, radix) = if let Some(rest) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        (rest, 16)
    } else if let Some(rest) = t.strip_prefix('$') {
        (rest, 16)
    } else if let Some(rest) = t.strip_prefix("0o").or_else(|| t.strip_prefix("0O")) {
        (rest, 8)
    } else if let Some(rest) = t.strip_prefix('@') {
        (rest, 8)
    } else {
        (t, 10)
    };

    let digits = digits.replace('_', "");
    if digits.is_empty() {
        return Err(Error::InvalidAddress(text.to_string()));
    }
    match u32::from_str_radix(&digits, radix) {
        Ok(v) if v <= 0x1_0000 => Ok(v),
        _ => Err(Error::InvalidAddress(text.to_string())),
    }
}
