/*!
Error type shared by the driver, configuration and image helpers.

The encoders never fail: every address has a defined byte. The errors here
cover the parts of a run that can go wrong on the host side (calling the
driver out of order, asking for a range the device does not have, and the
I/O of the transcript sink or image files).
*/

use std::ops::Range;

use thiserror::Error;

use crate::programmer::ProgrammerState;

#[derive(Debug, Error)]
pub enum Error {
    #[error("programmer is {found}, expected {expected}")]
    InvalidState {
        expected: ProgrammerState,
        found: ProgrammerState,
    },

    #[error("range {:#06x}..{:#06x} does not fit a {device_size}-byte device", .range.start, .range.end)]
    InvalidRange { range: Range<u32>, device_size: u32 },

    #[error("range {:#06x}..{:#06x} ends before it starts", .0.start, .0.end)]
    ReversedRange(Range<u32>),

    #[error("invalid address literal '{0}'")]
    InvalidAddress(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "screenshot")]
    #[error("preview rendering failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
