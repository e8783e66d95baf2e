/*!
isa.rs - Opcode layout of the 12-bit target CPU.

An instruction word is 12 bits: the top 6 bits are the opcode, the low 6
bits the operand. The opcode is `instruction * 4 + mode`, so every
instruction owns four consecutive opcode slots, one per addressing mode.

Data instructions (ADD..OUT, NOP, SWP, HLT) use:
  0 current page  (operand | page of PC)
  1 zero page     (operand)
  2 immediate     (operand is the value)
  3 indirect      (pointer in the current page)

Jump instructions (JMP, JPC, JPN, JMS) reinterpret the same two bits:
  0 indirect current page
  1 indirect zero page
  2 direct        (target in the current page)
  3 accumulator relative (jump table at A + operand)

Slot 14 (opcodes 56-59) is reserved and decodes as `Reserved`.
*/

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    Add,
    Sub,
    Rsb,
    Shl,
    Cmp,
    Lda,
    Sta,
    Out,
    Jmp,
    Jpc,
    Jpn,
    Jms,
    Nop,
    Swp,
    Reserved,
    Hlt,
}

impl Instruction {
    pub const ALL: [Instruction; 16] = [
        Instruction::Add,
        Instruction::Sub,
        Instruction::Rsb,
        Instruction::Shl,
        Instruction::Cmp,
        Instruction::Lda,
        Instruction::Sta,
        Instruction::Out,
        Instruction::Jmp,
        Instruction::Jpc,
        Instruction::Jpn,
        Instruction::Jms,
        Instruction::Nop,
        Instruction::Swp,
        Instruction::Reserved,
        Instruction::Hlt,
    ];

    #[inline]
    pub const fn from_index(index: u8) -> Instruction {
        Self::ALL[(index & 15) as usize]
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Add => "ADD",
            Instruction::Sub => "SUB",
            Instruction::Rsb => "RSB",
            Instruction::Shl => "SHL",
            Instruction::Cmp => "CMP",
            Instruction::Lda => "LDA",
            Instruction::Sta => "STA",
            Instruction::Out => "OUT",
            Instruction::Jmp => "JMP",
            Instruction::Jpc => "JPC",
            Instruction::Jpn => "JPN",
            Instruction::Jms => "JMS",
            Instruction::Nop => "NOP",
            Instruction::Swp => "SWP",
            Instruction::Reserved => "ILL",
            Instruction::Hlt => "HLT",
        }
    }

    #[inline]
    pub const fn is_jump(self) -> bool {
        matches!(
            self,
            Instruction::Jmp | Instruction::Jpc | Instruction::Jpn | Instruction::Jms
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    CurrentPage,
    ZeroPage,
    Immediate,
    Indirect,
    IndirectCurrentPage,
    IndirectZeroPage,
    Direct,
    Accumulator,
}

impl AddressingMode {
    /// Decode the two mode bits in the context of `instruction`.
    pub const fn decode(instruction: Instruction, bits: u8) -> AddressingMode {
        match (instruction.is_jump(), bits & 3) {
            (false, 0) => AddressingMode::CurrentPage,
            (false, 1) => AddressingMode::ZeroPage,
            (false, 2) => AddressingMode::Immediate,
            (false, _) => AddressingMode::Indirect,
            (true, 0) => AddressingMode::IndirectCurrentPage,
            (true, 1) => AddressingMode::IndirectZeroPage,
            (true, 2) => AddressingMode::Direct,
            (true, _) => AddressingMode::Accumulator,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            AddressingMode::CurrentPage | AddressingMode::IndirectCurrentPage => 0,
            AddressingMode::ZeroPage | AddressingMode::IndirectZeroPage => 1,
            AddressingMode::Immediate | AddressingMode::Direct => 2,
            AddressingMode::Indirect | AddressingMode::Accumulator => 3,
        }
    }

    /// Operand syntax as the assembler writes it.
    pub const fn syntax(self) -> &'static str {
        match self {
            AddressingMode::CurrentPage | AddressingMode::Direct => "addr",
            AddressingMode::ZeroPage => "@zp",
            AddressingMode::Immediate => "#imm",
            AddressingMode::Indirect | AddressingMode::IndirectCurrentPage => "[addr]",
            AddressingMode::IndirectZeroPage => "[@zp]",
            AddressingMode::Accumulator => "A+off",
        }
    }
}

/// A decoded 6-bit opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub instruction: Instruction,
    pub mode: AddressingMode,
}

impl Opcode {
    pub const COUNT: usize = 64;

    #[inline]
    pub const fn from_bits(bits: u8) -> Opcode {
        let instruction = Instruction::from_index((bits >> 2) & 15);
        Opcode {
            instruction,
            mode: AddressingMode::decode(instruction, bits),
        }
    }

    /// Opcode of a full 12-bit instruction word.
    #[inline]
    pub const fn from_word(word: u16) -> Opcode {
        Self::from_bits(((word >> 6) & 63) as u8)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        (self.instruction.index() << 2) | self.mode.bits()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.instruction.mnemonic(), self.mode.syntax())
    }
}
