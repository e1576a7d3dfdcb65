//! Register File.
//!
//! This module provides the `RegisterFile` struct, the architectural integer
//! register state of the core. It provides:
//! 1. **Storage:** The 32 general-purpose registers via [`Gpr`].
//! 2. **Snapshots:** Cloning for the per-tick pre-state read.
//! 3. **Reporting:** A [`Display`](std::fmt::Display) table for end-of-run output.

use std::fmt;

use crate::common::addr::Word;
use crate::core::arch::gpr::Gpr;

/// Architectural integer registers of the core.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
}

impl RegisterFile {
    /// A register file with every register zero.
    pub const fn new() -> Self {
        Self { gpr: Gpr::new() }
    }

    /// Reads register `idx`. `x0` and out-of-range indices read zero.
    pub fn read(&self, idx: usize) -> Word {
        self.gpr.read(idx)
    }

    /// Writes register `idx`. Writes to `x0` are ignored.
    pub fn write(&mut self, idx: usize, val: Word) {
        self.gpr.write(idx, val);
    }

    /// Returns all register values.
    pub const fn values(&self) -> [Word; 32] {
        self.gpr.values()
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.gpr, f)
    }
}
