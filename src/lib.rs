#![doc = r#"
romburn library crate.

Synthesizes EEPROM images for a hardwired 12-bit CPU build (the control
store and the seven-segment display decoder) and programs them through a
bit-banged shift-register/EEPROM interface, followed by a read-back hex
dump.

Modules:
- bus: `ProgrammerBus` trait, the bit-banged line protocol, and host-side
  doubles (`MemoryBus`, `SimulatedEeprom`)
- config: line timing, dump range, address literal parsing
- control: control signals, opcode layout, `CONTROL_STORE` and its encoder
- display: seven-segment patterns and the display encoder
- dump: transcript markers and the hex dump format
- encoder: `RomEncoder` trait and the `Variant` selector
- error: crate error type
- programmer: the program/verify state machine
- rom: `DeviceImage`, the host-computed expected contents
- sequencer: the ascending address walk shared by both passes
- preview (feature `screenshot`): PNG rendering of the display

In tests, pin recorders and transcript helpers are available under
`crate::test_utils`.
"#]

pub mod bus;
pub mod config;
pub mod control;
pub mod display;
pub mod dump;
pub mod encoder;
pub mod error;
#[cfg(feature = "screenshot")]
pub mod preview;
pub mod programmer;
pub mod rom;
pub mod sequencer;

// Re-export commonly used types at the crate root for convenience.
pub use bus::{BitBangBus, MemoryBus, ProgrammerBus, SimulatedEeprom};
pub use config::{ProgrammerConfig, Timing};
pub use control::{CONTROL_STORE, ControlStoreEncoder};
pub use display::DisplayEncoder;
pub use encoder::{RomEncoder, Variant};
pub use error::{Error, Result};
pub use programmer::{Programmer, ProgrammerState};
pub use rom::DeviceImage;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
