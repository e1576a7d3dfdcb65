//! Single-cycle stage implementations.
//!
//! This module contains the stages every instruction passes through within
//! one clock cycle. It includes:
//! 1. **Fetch:** Checks execute permission at the PC and reads or squashes the instruction.
//! 2. **Decode:** Maps the instruction word onto control signals.
//! 3. **Execute:** Performs ALU work, gates the data access and prepares the writeback.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Decode stage entry point (ID stage).
pub use decode::decode_control;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::{fetch_stage, next_pc};
