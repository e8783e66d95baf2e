/*!
table.rs - The control store: one micro-step sequence per opcode.

Layout
======
`CONTROL_STORE` holds 64 sequences of up to 8 control words each. It is
built by `const fn` so the whole dataset is fixed at compile time and an
over-long sequence fails the build instead of a run.

Every sequence has the same shape:

  1. fetch      CO|MI            PC into the memory-address register
  2. fetch      RO|II|CE         instruction into IR, advance PC
  3. resolve    0-2 steps        form the operand address (mode specific)
  4. execute    1-6 steps        instruction specific
     the last step also asserts SR; nothing earlier does

Operand resolution for data instructions:
  current page  IO|PO|MI
  zero page     IO|MI
  immediate     (none, the operand is IO)
  indirect      IO|PO|MI, RO|MI

Slots past a sequence's end read as zero. Opcodes that have no meaningful
action (STA/SWP immediate, the reserved slot) run the NOP shape.
*/

use std::fmt;

use crate::control::isa::{AddressingMode, Instruction, Opcode};
use crate::control::signals::Signals;

/// Longest sequence the 3-bit step counter can address.
pub const MAX_CYCLES: usize = 8;

const HLT: u32 = Signals::HLT.bits();
const MI: u32 = Signals::MI.bits();
const RI: u32 = Signals::RI.bits();
const RO: u32 = Signals::RO.bits();
const II: u32 = Signals::II.bits();
const IO: u32 = Signals::IO.bits();
const PO: u32 = Signals::PO.bits();
const CO: u32 = Signals::CO.bits();
const CE: u32 = Signals::CE.bits();
const J: u32 = Signals::J.bits();
const AI: u32 = Signals::AI.bits();
const AO: u32 = Signals::AO.bits();
const BI: u32 = Signals::BI.bits();
const EO: u32 = Signals::EO.bits();
const SU: u32 = Signals::SU.bits();
const FI: u32 = Signals::FI.bits();
const OI: u32 = Signals::OI.bits();
const RV: u32 = Signals::RV.bits();
const SL: u32 = Signals::SL.bits();
const JC: u32 = Signals::JC.bits();
const JN: u32 = Signals::JN.bits();
const BO: u32 = Signals::BO.bits();
const SR: u32 = Signals::SR.bits();

/// Fetch steps shared by every opcode.
pub const FETCH: [Signals; 2] = [
    Signals::from_bits_retain(CO | MI),
    Signals::from_bits_retain(RO | II | CE),
];

/// The micro-steps of one opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    steps: [u32; MAX_CYCLES],
    len: u8,
}

impl Sequence {
    const EMPTY: Sequence = Sequence {
        steps: [0; MAX_CYCLES],
        len: 0,
    };

    const fn fetch() -> Sequence {
        Self::EMPTY.then(CO | MI).then(RO | II | CE)
    }

    const fn then(mut self, word: u32) -> Sequence {
        self.steps[self.len as usize] = word;
        self.len += 1;
        self
    }

    const fn end(self, word: u32) -> Sequence {
        self.then(word | SR)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Control word for `cycle`; zero past the end of the sequence.
    #[inline]
    pub fn step(&self, cycle: u8) -> Signals {
        self.steps
            .get(cycle as usize)
            .map_or(Signals::empty(), |&bits| Signals::from_bits_retain(bits))
    }

    pub fn steps(&self) -> impl Iterator<Item = Signals> + '_ {
        self.steps[..self.len()]
            .iter()
            .map(|&bits| Signals::from_bits_retain(bits))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

const fn nop() -> Sequence {
    Sequence::fetch().end(0)
}

const fn data_sequence(instruction: Instruction, mode: AddressingMode) -> Sequence {
    let immediate = matches!(mode, AddressingMode::Immediate);
    if immediate && matches!(instruction, Instruction::Sta | Instruction::Swp) {
        return nop();
    }

    let s = Sequence::fetch();
    let s = match mode {
        AddressingMode::CurrentPage => s.then(IO | PO | MI),
        AddressingMode::ZeroPage => s.then(IO | MI),
        AddressingMode::Indirect => s.then(IO | PO | MI).then(RO | MI),
        _ => s,
    };
    let x = if immediate { IO } else { RO };

    match instruction {
        Instruction::Add => s.then(x | BI).end(EO | AI | FI),
        Instruction::Sub => s.then(x | BI).end(EO | SU | AI | FI),
        Instruction::Rsb => s.then(x | BI).end(EO | RV | AI | FI),
        Instruction::Shl => s.then(x | BI).end(EO | SL | AI | FI),
        Instruction::Cmp => s.then(x | BI).end(SU | FI),
        Instruction::Lda => s.end(x | AI),
        Instruction::Sta => s.end(AO | RI),
        Instruction::Out => s.end(x | OI),
        Instruction::Swp => s.then(x | BI).then(AO | RI).end(BO | AI),
        Instruction::Hlt => Sequence::fetch().end(HLT),
        _ => nop(),
    }
}

const fn jump_sequence(instruction: Instruction, mode: AddressingMode) -> Sequence {
    if matches!(instruction, Instruction::Jms) {
        return subroutine_sequence(mode);
    }

    let load = match instruction {
        Instruction::Jpc => JC,
        Instruction::Jpn => JN,
        _ => J,
    };
    let s = Sequence::fetch();
    match mode {
        AddressingMode::IndirectCurrentPage => s.then(IO | PO | MI).end(RO | load),
        AddressingMode::IndirectZeroPage => s.then(IO | MI).end(RO | load),
        AddressingMode::Direct => s.end(IO | PO | load),
        AddressingMode::Accumulator => s.then(IO | BI).then(EO | MI).end(RO | load),
        _ => nop(),
    }
}

// JMS stores the return address at the target and resumes at target + 1.
const fn subroutine_sequence(mode: AddressingMode) -> Sequence {
    let s = Sequence::fetch();
    match mode {
        AddressingMode::Direct => s
            .then(IO | PO | MI)
            .then(CO | RI)
            .then(IO | PO | J)
            .end(CE),
        AddressingMode::IndirectCurrentPage => s
            .then(IO | PO | MI)
            .then(RO | MI | BI)
            .then(CO | RI)
            .then(BO | J)
            .end(CE),
        AddressingMode::IndirectZeroPage => s
            .then(IO | MI)
            .then(RO | MI | BI)
            .then(CO | RI)
            .then(BO | J)
            .end(CE),
        AddressingMode::Accumulator => s
            .then(IO | BI)
            .then(EO | MI)
            .then(RO | MI | BI)
            .then(CO | RI)
            .then(BO | J)
            .end(CE),
        _ => nop(),
    }
}

const fn sequence_for(opcode: Opcode) -> Sequence {
    if opcode.instruction.is_jump() {
        jump_sequence(opcode.instruction, opcode.mode)
    } else {
        data_sequence(opcode.instruction, opcode.mode)
    }
}

/// All 64 opcode sequences.
pub struct ControlStore {
    sequences: [Sequence; Opcode::COUNT],
}

impl ControlStore {
    const fn build() -> ControlStore {
        let mut sequences = [Sequence::EMPTY; Opcode::COUNT];
        let mut bits = 0;
        while bits < Opcode::COUNT {
            sequences[bits] = sequence_for(Opcode::from_bits(bits as u8));
            bits += 1;
        }
        ControlStore { sequences }
    }

    #[inline]
    pub fn sequence(&self, opcode: u8) -> &Sequence {
        &self.sequences[(opcode & 63) as usize]
    }

    /// Control word asserted by `opcode` during `cycle`.
    #[inline]
    pub fn word(&self, opcode: u8, cycle: u8) -> Signals {
        self.sequence(opcode).step(cycle)
    }

    /// Iterate `(opcode, sequence)` in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = (Opcode, &Sequence)> + '_ {
        self.sequences
            .iter()
            .enumerate()
            .map(|(bits, seq)| (Opcode::from_bits(bits as u8), seq))
    }

    /// Human-readable listing, one opcode per line.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (opcode, seq) in self.iter() {
            out.push_str(&format!(
                "{:02o}  {:<10} {}  {}\n",
                opcode.bits(),
                opcode.to_string(),
                seq.len(),
                seq
            ));
        }
        out
    }
}

pub static CONTROL_STORE: ControlStore = ControlStore::build();
