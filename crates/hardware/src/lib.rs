//! PMP-gated RV32I core simulator library.
//!
//! This crate implements a cycle-level model of a single-cycle RISC-V RV32I
//! core with static Physical Memory Protection:
//! 1. **Core:** Fetch, decode and execute in one cycle, with a Running/Halted
//!    state machine and snapshot/commit ticks.
//! 2. **Protection:** A priority-ordered PMP table; denied fetches freeze the
//!    core, denied data accesses are suppressed.
//! 3. **ISA:** Decoding and disassembly for RV32I.
//! 4. **SoC:** Separate instruction and data memories behind a device trait.
//! 5. **Simulation:** Loader, configuration, and statistics collection.

/// Common types and constants (addresses, registers, errors, access types).
pub mod common;
/// Simulator configuration (defaults, memory sizes, PMP table).
pub mod config;
/// CPU core (stages, units, execution).
pub mod core;
/// Instruction set (decode, instruction fields, ABI, RV32I, disassembly).
pub mod isa;
/// Image loader and run driver.
pub mod sim;
/// System-on-chip (builder, memory, traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or parse JSON.
pub use crate::config::Config;
/// Main CPU type; holds architectural state, PMP, memories and stats.
pub use crate::core::Cpu;
/// Top-level system (instruction and data memories); construct with `System::new`.
pub use crate::soc::System;
