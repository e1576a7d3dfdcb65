//! ALU shift operations.
//!
//! The shift amount is taken from the low five bits of operand B.

use crate::common::Word;
use crate::core::pipeline::signals::AluOp;

const SHAMT_MASK: Word = 0x1F;

/// Executes a shift operation. Returns `0` for non-shift opcodes.
pub const fn execute(op: AluOp, a: Word, b: Word) -> Word {
    let shamt = b & SHAMT_MASK;
    match op {
        AluOp::Sll => a << shamt,
        AluOp::Srl => a >> shamt,
        AluOp::Sra => ((a as i32) >> shamt) as Word,
        _ => 0,
    }
}
