//! Execution units and functional components.
//!
//! This module contains the integer ALU and the Physical Memory Protection
//! unit that gates every fetch and data access.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Physical Memory Protection (static permission table and checker).
pub mod pmp;
