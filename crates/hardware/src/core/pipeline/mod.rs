//! Instruction datapath.
//!
//! This module contains the datapath of the single-cycle core. It includes
//! the following components:
//! 1. **Signals:** Control signals generated during instruction decoding.
//! 2. **Stages:** Implementation of the Fetch, Decode and Execute stages.

/// Control signals generated during instruction decode.
pub mod signals;

/// Stage implementations (fetch, decode, execute).
pub mod stages;
