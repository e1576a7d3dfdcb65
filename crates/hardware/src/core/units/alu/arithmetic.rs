//! ALU arithmetic operations.
//!
//! Addition and subtraction wrap modulo 2^32.

use crate::common::Word;
use crate::core::pipeline::signals::AluOp;

/// Executes an arithmetic operation. Returns `0` for non-arithmetic opcodes.
pub const fn execute(op: AluOp, a: Word, b: Word) -> Word {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        _ => 0,
    }
}
