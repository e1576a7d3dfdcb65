//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks shared across all components:
//! 1. **Address Types:** Address and word aliases for the 32-bit datapath.
//! 2. **Constants:** Instruction width, the squash sentinel, register counts.
//! 3. **Memory Access:** Categories of memory operations (Fetch/Read/Write).
//! 4. **Error Handling:** Configuration and program-loading errors.
//! 5. **Register Management:** The architectural integer register file.

/// Address and word type definitions.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration and loading.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use addr::{Addr, Word};
pub use constants::{INSTRUCTION_NOP, INSTRUCTION_SIZE};
pub use data::AccessType;
pub use error::{ConfigError, LoadError};
pub use reg::RegisterFile;
