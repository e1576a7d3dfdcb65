//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains opcodes, function codes, field extraction, immediate decoding and
//! a small disassembler for the RV32I base integer set executed by the core.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding logic for all RV32I instruction formats.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;
