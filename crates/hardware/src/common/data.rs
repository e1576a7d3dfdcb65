//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout the simulator.
//! These types are used for the following:
//! 1. **Violation Accounting:** Each PMP denial is counted under one category.
//! 2. **Diagnostics:** Violation records name the kind of access that was refused.

use serde::Serialize;

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches, data loads, and data stores
/// when a permission check fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    /// Instruction fetch access (also used for control-transfer targets).
    ///
    /// Requires Read and Execute permission.
    Fetch,

    /// Data read access.
    ///
    /// Occurs during load instructions. Requires Read (R) permission.
    Read,

    /// Data write access.
    ///
    /// Occurs during store instructions. Requires Write (W) permission.
    Write,
}

impl AccessType {
    /// Short label used in logs and reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fetch => "instruction-execute",
            Self::Read => "data-read",
            Self::Write => "data-write",
        }
    }
}
