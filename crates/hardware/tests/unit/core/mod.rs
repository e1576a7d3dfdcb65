
/// Cycle-level behaviour of the core.
pub mod cpu;
