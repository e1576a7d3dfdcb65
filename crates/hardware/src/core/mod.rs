//! Core processor implementation.
//!
//! This module contains the single-cycle CPU: the datapath stages, the
//! execution units (ALU and PMP), the architectural register file and the
//! orchestrator that runs one instruction per clock.

/// Architectural components (integer register file).
pub mod arch;

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Instruction datapath (stages, signals).
pub mod pipeline;

/// Execution units (ALU, PMP).
pub mod units;

pub use self::cpu::{CoreState, Cpu, ProcessorState, ViolationCounters, ViolationRecord};
