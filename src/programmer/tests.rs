use crate::bus::{
    BitBangBus, DataDirection, MemoryBus, ProgrammerBus, RecordingDelay, SimulatedEeprom,
};
use crate::config::{ProgrammerConfig, Timing};
use crate::control::ControlStoreEncoder;
use crate::display::DisplayEncoder;
use crate::encoder::RomEncoder;
use crate::error::Error;
use crate::programmer::{Programmer, ProgrammerState};
use crate::rom::DeviceImage;
use crate::test_utils::{parse_dump, split_transcript};

type SimBus = BitBangBus<SimulatedEeprom, RecordingDelay>;

fn simulated(cells: Vec<u8>) -> SimBus {
    BitBangBus::new(
        SimulatedEeprom::with_contents(cells),
        RecordingDelay::new(),
        Timing::default(),
    )
}

fn run_to_string<B: ProgrammerBus>(
    bus: B,
    encoder: &dyn RomEncoder,
    config: &ProgrammerConfig,
) -> (String, B) {
    let mut out = Vec::new();
    let bus = Programmer::new(bus, encoder).run(config, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), bus)
}

#[test]
fn display_round_trip_matches_synthesized_image() {
    let image = DeviceImage::synthesize(&DisplayEncoder);
    let (text, bus) = run_to_string(
        simulated(vec![0xFF; 0x8000]),
        &DisplayEncoder,
        &ProgrammerConfig::default(),
    );

    let (header, dump) = split_transcript(&text);
    assert_eq!(header, format!("Programming{}", ".".repeat(8)));
    assert_eq!(dump, image.dump(0..0x8000).unwrap());

    let (device, _) = bus.into_parts();
    assert_eq!(device.inhibited_writes(), 0);
    assert_eq!(device.writes(), 0x8000);
    assert_eq!(image.first_mismatch(device.contents()), None);
}

#[test]
fn control_store_fill_pass_clears_stale_bytes() {
    let image = DeviceImage::synthesize(&ControlStoreEncoder);
    let (text, bus) = run_to_string(
        simulated(vec![0x5A; 0x2000]),
        &ControlStoreEncoder,
        &ProgrammerConfig::default(),
    );

    let (header, dump) = split_transcript(&text);
    assert_eq!(header, format!("Programming{}", ".".repeat(16)));
    assert_eq!(parse_dump(dump), image.bytes());

    let (device, _) = bus.into_parts();
    assert!(device.contents()[2048..].iter().all(|&b| b == 0));
    assert_eq!(image.first_mismatch(device.contents()), None);
}

#[test]
fn every_required_wait_is_issued() {
    let config = ProgrammerConfig {
        dump_range: Some(0..0x100),
        ..Default::default()
    };
    let (_, bus) = run_to_string(simulated(vec![0xFF; 0x2000]), &ControlStoreEncoder, &config);
    let t = Timing::default();
    let per_write = u64::from(t.address_settle_us + t.write_pulse_us + t.write_hold_ms * 1000);
    let per_read = u64::from(t.address_settle_us + t.read_settle_us);
    assert_eq!(bus.delay().total_us(), 0x2000 * per_write + 0x100 * per_read);
}

#[test]
fn partial_dump_range_is_row_aligned() {
    let config = ProgrammerConfig {
        dump_range: Some(0x3E..0x42),
        ..Default::default()
    };
    let (text, _) = run_to_string(MemoryBus::new(0x2000), &ControlStoreEncoder, &config);
    let (_, dump) = split_transcript(&text);
    // 0x3E, 0x3F end the row holding opcodes 62 and 63 in cycle 0.
    assert_eq!(dump, "82 82\n18 18 ");
}

#[test]
fn bad_dump_range_is_rejected_before_any_write() {
    let mut bus = MemoryBus::new(0x2000);
    let config = ProgrammerConfig {
        dump_range: Some(0..0x2001),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = Programmer::new(&mut bus, &ControlStoreEncoder).run(&config, &mut out);
    assert!(matches!(err, Err(Error::InvalidRange { .. })));
    assert_eq!(bus.writes(), 0);
    assert!(out.is_empty());
}

#[test]
fn passes_must_run_in_order() {
    let mut out = Vec::new();
    let mut p = Programmer::new(MemoryBus::new(0x2000), &ControlStoreEncoder);
    assert_eq!(p.state(), ProgrammerState::Idle);

    assert!(matches!(
        p.verify(0..16, &mut out),
        Err(Error::InvalidState {
            expected: ProgrammerState::Verifying,
            found: ProgrammerState::Idle
        })
    ));

    p.program(&mut out).unwrap();
    assert_eq!(p.state(), ProgrammerState::Verifying);
    assert_eq!(p.bus().writes(), 0x2000);
    assert_eq!(p.bus().data_direction(), DataDirection::Input);
    assert!(matches!(
        p.program(&mut out),
        Err(Error::InvalidState {
            expected: ProgrammerState::Idle,
            found: ProgrammerState::Verifying
        })
    ));

    p.verify(0..16, &mut out).unwrap();
    assert_eq!(p.state(), ProgrammerState::Finished);
    assert!(p.verify(0..16, &mut out).is_err());
}

#[test]
fn memory_bus_sees_each_address_once_per_pass() {
    let (_, bus) = run_to_string(
        MemoryBus::new(0x2000),
        &ControlStoreEncoder,
        &ProgrammerConfig::default(),
    );
    assert_eq!(bus.writes(), 0x2000);
    assert_eq!(bus.reads(), 0x2000);
}
