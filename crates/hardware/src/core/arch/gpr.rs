//! Integer register file storage.
//!
//! Thirty-two 32-bit registers with `x0` reading as zero. Indices outside
//! `0..32` read as zero and drop writes, so a malformed index can never
//! panic inside a tick.

use std::fmt;

use crate::common::addr::Word;
use crate::common::constants::NUM_REGS;
use crate::isa::abi;

/// Backing array of the integer registers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [Word; NUM_REGS],
}

impl Gpr {
    /// All registers zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Value of register `idx`.
    #[inline]
    pub fn read(&self, idx: usize) -> Word {
        match idx {
            abi::REG_ZERO => 0,
            _ => self.regs.get(idx).copied().unwrap_or(0),
        }
    }

    /// Sets register `idx`; writes to `x0` are discarded.
    #[inline]
    pub fn write(&mut self, idx: usize, val: Word) {
        if idx == abi::REG_ZERO {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Copy of all 32 values, `x0` first.
    pub const fn values(&self) -> [Word; NUM_REGS] {
        self.regs
    }
}

/// Four registers per line, `xN(abi)=value`.
impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.regs.chunks(4).enumerate() {
            for (j, val) in row.iter().enumerate() {
                let idx = i * 4 + j;
                let name = format!("x{idx}({})", abi::reg_name(idx));
                write!(f, "{name:<10}={val:#010x}  ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
