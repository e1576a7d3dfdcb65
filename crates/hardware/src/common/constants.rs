//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Instruction Constants:** Width and the canonical no-op used to squash fetches.
//! 2. **Register Constants:** Size of the architectural register file.
//! 3. **Diagnostic Constants:** Bounds on retained violation records.

/// Size of an RV32I instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// `ADDI x0, x0, 0` (canonical NOP).
///
/// Substituted for the fetched word whenever the fetch is denied. It writes
/// `x0`, requests no memory access and does not redirect the PC, so it is
/// inert under decode and execute.
pub const INSTRUCTION_NOP: u32 = 0x0000_0013;

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// Maximum number of violation records kept by the core for inspection.
pub const VIOLATION_LOG_MAX: usize = 64;
