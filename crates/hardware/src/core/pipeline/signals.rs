//! Pipeline control signals and operation types.
//!
//! This module defines the signals that steer a single-cycle instruction
//! through execute. It performs:
//! 1. **Operation Classification:** Names the integer ALU operations.
//! 2. **Operand Selection:** Defines sources for ALU inputs (registers, PC, or immediates).
//! 3. **Memory Control:** Specifies access widths and sign-extension requirements.
//! 4. **Control Flow:** Describes branch conditions, jumps and writeback sources.

/// Integer ALU operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Default value (addition).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,
}

/// Memory access width for loads and stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory access.
    #[default]
    Nop,

    /// Byte access (8 bits).
    Byte,

    /// Half-word access (16 bits).
    Half,

    /// Word access (32 bits).
    Word,
}

impl MemWidth {
    /// Width in bytes; zero for [`MemWidth::Nop`].
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Nop => 0,
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}

/// Source selection for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use value from register rs1.
    #[default]
    Reg1,

    /// Use program counter value.
    Pc,

    /// Use zero constant.
    Zero,
}

/// Source selection for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use immediate value from instruction.
    #[default]
    Imm,

    /// Use value from register rs2.
    Reg2,
}

/// Value written back to `rd`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WritebackSrc {
    /// ALU result.
    #[default]
    Alu,

    /// Data loaded from memory.
    Memory,

    /// Return address (`pc + 4`).
    PcPlus4,
}

/// Conditional branch comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCond {
    /// Equal.
    Eq,

    /// Not equal.
    Ne,

    /// Less than (signed).
    Lt,

    /// Greater or equal (signed).
    Ge,

    /// Less than (unsigned).
    Ltu,

    /// Greater or equal (unsigned).
    Geu,
}

impl BranchCond {
    /// Evaluates the comparison on two register values.
    pub const fn taken(self, a: u32, b: u32) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => (a as i32) < (b as i32),
            Self::Ge => (a as i32) >= (b as i32),
            Self::Ltu => a < b,
            Self::Geu => a >= b,
        }
    }
}

/// Unconditional control transfer kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpKind {
    /// `pc + imm` (JAL).
    Direct,

    /// `(rs1 + imm) & !1` (JALR).
    Indirect,
}

/// Complete set of control signals for an instruction.
///
/// The all-false default is what an inert instruction (the NOP substituted
/// for a squashed fetch, or an unknown opcode) must never deviate from in
/// its side-effect fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Register write enable.
    pub reg_write: bool,

    /// Memory read enable (load).
    pub mem_read: bool,

    /// Memory write enable (store).
    pub mem_write: bool,

    /// Memory access width.
    pub width: MemWidth,

    /// Sign-extend loaded data.
    pub signed_load: bool,

    /// ALU operation to perform.
    pub alu: AluOp,

    /// Source for ALU operand A.
    pub a_src: OpASrc,

    /// Source for ALU operand B.
    pub b_src: OpBSrc,

    /// Source of the writeback value.
    pub wb_src: WritebackSrc,

    /// Conditional branch, if any.
    pub branch: Option<BranchCond>,

    /// Unconditional jump, if any.
    pub jump: Option<JumpKind>,
}

impl ControlSignals {
    /// Returns true if the instruction touches data memory.
    pub const fn accesses_memory(&self) -> bool {
        self.mem_read || self.mem_write
    }

    /// Returns true if the instruction may redirect the PC.
    pub const fn is_control_flow(&self) -> bool {
        self.branch.is_some() || self.jump.is_some()
    }
}
