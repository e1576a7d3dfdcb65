//! Address and word types.
//!
//! The core has a 32-bit datapath: program counter, register values, memory
//! addresses and PMP bounds all share the same width.

/// A physical byte address. There is no address translation on this core.
pub type Addr = u32;

/// A 32-bit machine word (register value, instruction encoding, memory word).
pub type Word = u32;

/// Highest representable address; the catch-all PMP entry must reach it.
pub const ADDR_MAX: Addr = Addr::MAX;
