//! Instruction word layout.
//!
//! Every RV32I instruction is one 32-bit word. The register and function
//! fields sit at the same bit positions in all six formats; only the
//! immediate is scattered differently, which [`Format`] captures.

use crate::isa::rv32i::opcodes;

/// Extracts `width` bits of `word` starting at bit `lo`.
#[inline(always)]
pub(crate) const fn field(word: u32, lo: u32, width: u32) -> u32 {
    (word >> lo) & ((1 << width) - 1)
}

/// Encoding format of an instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Register-register; no immediate.
    #[default]
    R,
    /// 12-bit immediate in bits 31:20.
    I,
    /// 12-bit immediate split around `rs2`.
    S,
    /// 13-bit even branch offset.
    B,
    /// Upper 20 bits.
    U,
    /// 21-bit even jump offset.
    J,
}

impl Format {
    /// Format implied by a major opcode.
    ///
    /// Opcodes outside RV32I map to [`Format::R`] so they carry no immediate.
    pub const fn of(opcode: u32) -> Self {
        match opcode {
            opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR | opcodes::OP_MISC_MEM => {
                Self::I
            }
            opcodes::OP_STORE => Self::S,
            opcodes::OP_BRANCH => Self::B,
            opcodes::OP_LUI | opcodes::OP_AUIPC => Self::U,
            opcodes::OP_JAL => Self::J,
            _ => Self::R,
        }
    }
}

/// Field accessors on a raw instruction word.
pub trait InstructionBits {
    /// Major opcode, bits 6:0.
    fn opcode(&self) -> u32;
    /// Destination register, bits 11:7.
    fn rd(&self) -> usize;
    /// First source register, bits 19:15.
    fn rs1(&self) -> usize;
    /// Second source register, bits 24:20.
    fn rs2(&self) -> usize;
    /// Minor opcode, bits 14:12.
    fn funct3(&self) -> u32;
    /// Bits 31:25 of R-type and shift-immediate encodings.
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        field(*self, 0, 7)
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        field(*self, 7, 5) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        field(*self, 15, 5) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        field(*self, 20, 5) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        field(*self, 12, 3)
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        field(*self, 25, 7)
    }
}

/// An instruction split into its fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// The original word.
    pub raw: u32,
    /// Encoding format.
    pub format: Format,
    /// Major opcode.
    pub opcode: u32,
    /// Destination register.
    pub rd: usize,
    /// First source register.
    pub rs1: usize,
    /// Second source register.
    pub rs2: usize,
    /// Minor opcode.
    pub funct3: u32,
    /// R-type function bits.
    pub funct7: u32,
    /// Sign-extended immediate; zero for R-type.
    pub imm: i32,
}
