//! System-on-Chip (SoC) Components.
//!
//! This module organizes the memories attached to the core's instruction
//! and data ports and the builder that assembles them.

/// System builder for assembling the memories.
pub mod builder;

/// Flat byte-addressed memory.
pub mod memory;

/// Device trait definitions for the memory ports.
pub mod traits;

pub use builder::System;
pub use memory::Memory;
pub use traits::Device;
