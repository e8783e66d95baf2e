/*!
signals.rs - Control lines of the hardwired CPU, one bit each.

Bit positions are the wiring order of the three control-store EEPROMs and
must not move: bank 0 (bits 0-7) drives the memory/instruction side, bank 1
(bits 8-15) the program counter, accumulator and ALU, bank 2 (bits 16-23)
the output register, ALU function selects, conditional loads and the
sequence-end line.

  Bank 0: 7 6 5 4 3 2 1 0       Bank 1: 15 14 13 12 11 10 9 8
          CO PO IO II RO RI MI HLT       FI SU EO BI AO AI J CE

  Bank 2: 23 22 21 20 19 18 17 16
          SR -- BO JN JC SL RV OI
*/

use std::fmt;

bitflags::bitflags! {
    /// One control word: the set of lines asserted during one micro-step.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Signals: u32 {
        /// Halt the clock.
        const HLT = 1 << 0;
        /// Memory-address register in.
        const MI = 1 << 1;
        /// RAM in (write the bus into memory).
        const RI = 1 << 2;
        /// RAM out.
        const RO = 1 << 3;
        /// Instruction register in.
        const II = 1 << 4;
        /// Instruction register operand (low 6 bits) out.
        const IO = 1 << 5;
        /// Page out: the high 6 bits of the program counter.
        const PO = 1 << 6;
        /// Program counter out.
        const CO = 1 << 7;

        /// Program counter increment.
        const CE = 1 << 8;
        /// Program counter in (jump).
        const J = 1 << 9;
        /// Accumulator in.
        const AI = 1 << 10;
        /// Accumulator out.
        const AO = 1 << 11;
        /// B register in.
        const BI = 1 << 12;
        /// ALU result out.
        const EO = 1 << 13;
        /// ALU subtract (A - B).
        const SU = 1 << 14;
        /// Flags register in.
        const FI = 1 << 15;

        /// Output register in.
        const OI = 1 << 16;
        /// ALU reverse subtract (B - A).
        const RV = 1 << 17;
        /// ALU shift left.
        const SL = 1 << 18;
        /// Program counter in when carry is set.
        const JC = 1 << 19;
        /// Program counter in when negative is set.
        const JN = 1 << 20;
        /// B register out.
        const BO = 1 << 21;
        /// Sequence end: reset the step counter and fetch the next instruction.
        const SR = 1 << 23;
    }
}

/// Number of EEPROMs (8-bit banks) the 24-bit word is split across.
pub const BANKS: u8 = 3;

macro_rules! signal_accessors {
    ($($name:ident => $flag:ident;)*) => {
        impl Signals {
            $(
                #[inline]
                pub const fn $name(self) -> bool {
                    self.bits() & Signals::$flag.bits() != 0
                }
            )*
        }
    };
}

signal_accessors! {
    halt => HLT;
    mar_in => MI;
    ram_in => RI;
    ram_out => RO;
    ir_in => II;
    ir_out => IO;
    page_out => PO;
    pc_out => CO;
    pc_increment => CE;
    jump => J;
    a_in => AI;
    a_out => AO;
    b_in => BI;
    alu_out => EO;
    subtract => SU;
    flags_in => FI;
    output_in => OI;
    reverse_subtract => RV;
    shift_left => SL;
    jump_if_carry => JC;
    jump_if_negative => JN;
    b_out => BO;
    sequence_end => SR;
}

impl Signals {
    /// The byte presented by control-store bank `bank`. Banks past the
    /// third carry no signals.
    #[inline]
    pub const fn bank_byte(self, bank: u8) -> u8 {
        if bank >= BANKS {
            0
        } else {
            (self.bits() >> (8 * bank as u32)) as u8
        }
    }

    /// Number of sources driving the shared bus. A correct word has at most one.
    pub fn bus_driver_count(self) -> u32 {
        let drivers = Signals::RO | Signals::CO | Signals::AO | Signals::EO | Signals::BO;
        // IO and PO drive disjoint halves of the bus and form one address together.
        (self & drivers).bits().count_ones() + u32::from(self.intersects(Signals::IO | Signals::PO))
    }
}

impl fmt::Display for Signals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_split_matches_wiring() {
        let word = Signals::CO | Signals::MI;
        assert_eq!(word.bank_byte(0), 0x82);
        assert_eq!(word.bank_byte(1), 0);
        assert_eq!(word.bank_byte(2), 0);

        let word = Signals::CE | Signals::FI | Signals::OI | Signals::SR;
        assert_eq!(word.bank_byte(0), 0);
        assert_eq!(word.bank_byte(1), 0x81);
        assert_eq!(word.bank_byte(2), 0x81);
        assert_eq!(word.bank_byte(3), 0);
        assert_eq!(word.bank_byte(7), 0);
    }

    #[test]
    fn reserved_bit_is_never_named() {
        assert_eq!(Signals::all().bits() & (1 << 22), 0);
        assert_eq!(Signals::all().bits() >> 24, 0);
        assert_eq!(Signals::all().iter().count(), 23);
    }

    #[test]
    fn accessors_follow_flags() {
        let word = Signals::RO | Signals::II | Signals::CE;
        assert!(word.ram_out() && word.ir_in() && word.pc_increment());
        assert!(!word.ram_in() && !word.sequence_end() && !word.halt());
    }

    #[test]
    fn display_lists_names_in_bit_order() {
        let word = Signals::SR | Signals::CO | Signals::MI;
        assert_eq!(word.to_string(), "MI|CO|SR");
        assert_eq!(Signals::empty().to_string(), "-");
    }

    #[test]
    fn page_and_operand_count_as_one_driver() {
        assert_eq!((Signals::IO | Signals::PO | Signals::MI).bus_driver_count(), 1);
        assert_eq!((Signals::RO | Signals::MI).bus_driver_count(), 1);
        assert_eq!((Signals::RO | Signals::AO).bus_driver_count(), 2);
        assert_eq!(Signals::SR.bus_driver_count(), 0);
    }
}
