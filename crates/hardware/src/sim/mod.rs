//! Simulation utilities and program loading.
//!
//! Provides the image loader and the clock/reset driver that runs the core.

/// Program and data image loading.
pub mod loader;

/// Cycle-bounded run driver.
pub mod simulator;

pub use simulator::{RunSummary, Simulator, StopReason};
