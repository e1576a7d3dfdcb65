//! Error definitions.
//!
//! Runtime permission violations are policy outcomes and never surface as
//! errors. The only faults in this crate are detected before the first
//! cycle runs:
//! 1. **Configuration faults:** A malformed PMP table or memory layout.
//! 2. **Load faults:** A program or data image that cannot be read or placed.

use std::path::PathBuf;

use thiserror::Error;

use super::addr::Addr;

/// Configuration fault reported at start-up.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The PMP table has no entries at all.
    #[error("PMP table is empty")]
    EmptyTable,

    /// An entry's start address lies above its end address.
    #[error("PMP entry {index} has an inverted range [{start:#010x}, {end:#010x}]")]
    InvalidRange {
        /// Index of the offending entry.
        index: usize,
        /// Configured start address.
        start: Addr,
        /// Configured end address.
        end: Addr,
    },

    /// The lowest-priority entry does not cover the whole address space.
    #[error("PMP table has no enabled catch-all entry covering [0x00000000, 0xffffffff] at the lowest priority")]
    MissingCatchAll,

    /// The catch-all entry grants a permission, breaking default-deny.
    #[error("PMP catch-all entry {index} grants permissions; it must deny everything")]
    PermissiveCatchAll {
        /// Index of the catch-all entry.
        index: usize,
    },

    /// A memory was configured with zero bytes.
    #[error("{name} size must be non-zero")]
    ZeroSizedMemory {
        /// Which memory (`"imem"` or `"dmem"`).
        name: &'static str,
    },

    /// The configuration text is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("could not read configuration {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Fault while reading or placing a memory image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("could not read image {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line in a hex image is not a valid word or address marker.
    #[error("{path}:{line}: invalid hex token `{token}`")]
    ParseHex {
        /// Path of the hex file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The image does not fit in the target memory.
    #[error("image of {len} bytes does not fit in {capacity}-byte {target}")]
    TooLarge {
        /// Image length in bytes.
        len: usize,
        /// Memory capacity in bytes.
        capacity: usize,
        /// Target memory name.
        target: &'static str,
    },
}
