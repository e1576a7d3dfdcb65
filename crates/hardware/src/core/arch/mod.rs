//! Architectural state definitions.
//!
//! Holds the programmer-visible register storage of the core.

/// General-purpose integer registers (x0–x31).
pub mod gpr;
