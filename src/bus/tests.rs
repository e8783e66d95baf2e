use crate::bus::pins::Level;
use crate::bus::{
    BitBangBus, DataDirection, Pins, ProgrammerBus, RecordingDelay, SimulatedEeprom,
};
use crate::config::Timing;
use crate::test_utils::{PinEvent, RecordingPins};

fn timing() -> Timing {
    Timing {
        address_settle_us: 2,
        write_pulse_us: 1,
        write_hold_ms: 5,
        read_settle_us: 3,
    }
}

fn recording_bus() -> BitBangBus<RecordingPins, RecordingDelay> {
    let mut bus = BitBangBus::new(RecordingPins::new(), RecordingDelay::new(), timing());
    // Drop the idle-state setup so tests see only their own traffic.
    bus.pins_mut().clear();
    bus
}

#[test]
fn address_is_shifted_msb_first() {
    let mut bus = recording_bus();
    bus.present_address(0b1010_0000_0000_0011);
    assert_eq!(
        bus.pins().shifted_bits(),
        vec![1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1]
    );
    // Each bit: data, clock high, clock low.
    assert_eq!(bus.pins().events.len(), 48);
    assert_eq!(bus.delay().total_us(), 2);
}

#[test]
fn data_is_set_before_clock_rises() {
    let mut bus = recording_bus();
    bus.present_address(0x8001);
    let events = &bus.pins().events;
    for chunk in events.chunks(3) {
        assert!(matches!(chunk[0], PinEvent::ShiftData(_)));
        assert_eq!(chunk[1], PinEvent::ShiftClock(Level::High));
        assert_eq!(chunk[2], PinEvent::ShiftClock(Level::Low));
    }
}

#[test]
fn write_puts_lsb_on_line_zero_then_pulses_we() {
    let mut bus = recording_bus();
    bus.write_byte(0b0000_0101);
    let events = &bus.pins().events;
    let expected_lines: Vec<PinEvent> = (0..8)
        .map(|line| PinEvent::DataLine(line, Level::from_bit(line == 0 || line == 2)))
        .collect();
    assert_eq!(&events[..8], expected_lines.as_slice());
    assert_eq!(
        &events[8..],
        &[
            PinEvent::WriteEnable(Level::Low),
            PinEvent::WriteEnable(Level::High)
        ]
    );
    // Pulse width plus write-cycle hold.
    assert_eq!(bus.delay().total_us(), 1 + 5_000);
}

#[test]
fn read_assembles_line_i_into_bit_i() {
    let mut bus = recording_bus();
    bus.set_data_direction(DataDirection::Input);
    bus.pins_mut().read_value = 0b1100_0001;
    assert_eq!(bus.read_byte(), 0b1100_0001);
    assert_eq!(bus.pins().lines_read, vec![7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn direction_changes_never_overlap_drivers() {
    let mut bus = recording_bus();
    bus.set_data_direction(DataDirection::Input);
    bus.set_data_direction(DataDirection::Output);
    assert_eq!(
        bus.pins().events,
        vec![
            PinEvent::Direction(DataDirection::Input),
            PinEvent::OutputEnable(Level::Low),
            PinEvent::OutputEnable(Level::High),
            PinEvent::Direction(DataDirection::Output),
        ]
    );

    // Re-selecting the current direction touches no lines.
    bus.set_data_direction(DataDirection::Output);
    assert_eq!(bus.pins().events.len(), 4);
}

#[test]
fn simulated_device_stores_and_returns_bytes() {
    let mut bus = BitBangBus::new(SimulatedEeprom::new(0x2000), RecordingDelay::new(), timing());
    for (address, value) in [(0x0000u16, 0x82u8), (0x0201, 0x01), (0x1FFF, 0x5A)] {
        bus.present_address(address);
        bus.write_byte(value);
    }
    bus.set_data_direction(DataDirection::Input);
    for (address, value) in [(0x0000u16, 0x82u8), (0x0201, 0x01), (0x1FFF, 0x5A), (0x0002, 0xFF)] {
        bus.present_address(address);
        assert_eq!(bus.read_byte(), value, "address {address:#06x}");
    }
    assert_eq!(bus.pins().writes(), 3);
    assert_eq!(bus.timing(), timing());
}

#[test]
fn latch_holds_the_last_presented_address() {
    let mut bus = BitBangBus::new(SimulatedEeprom::new(0x8000), RecordingDelay::new(), timing());
    bus.present_address(0x1234);
    bus.present_address(0xC005);
    let latch = bus.pins().latch();
    assert_eq!(latch.outputs(), 0xC005);
    assert_eq!(latch.edges(), 32);
    // Bit 15 is not wired to the device.
    assert_eq!(bus.pins().address(), 0x4005);
}

#[test]
fn simulated_device_ignores_writes_while_output_enabled() {
    let mut bus = BitBangBus::new(SimulatedEeprom::new(16), RecordingDelay::new(), timing());
    bus.set_data_direction(DataDirection::Input);
    bus.present_address(4);
    // Force a pulse with OE low; the device must not latch it.
    let (mut pins, _) = bus.into_parts();
    Pins::set_write_enable(&mut pins, Level::Low);
    Pins::set_write_enable(&mut pins, Level::High);
    assert_eq!(pins.inhibited_writes(), 1);
    assert_eq!(pins.contents()[4], 0xFF);
}

#[test]
fn simulated_device_floats_high_without_output_enable() {
    let mut pins = SimulatedEeprom::with_contents(vec![0x00; 8]);
    Pins::set_data_direction(&mut pins, DataDirection::Input);
    assert_eq!(Pins::read_data_line(&mut pins, 0), Level::High);
    Pins::set_output_enable(&mut pins, Level::Low);
    assert_eq!(Pins::read_data_line(&mut pins, 0), Level::Low);
}
