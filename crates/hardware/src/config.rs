//! Configuration system for the PMP-gated core.
//!
//! This module defines all configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline memory sizes, start PC, cycle limit and the
//!    reference PMP layout.
//! 2. **Structures:** Hierarchical config for general, memory and PMP settings.
//! 3. **Validation:** Conversion into a checked [`PermissionTable`].
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or taken from
//! `Config::default()`. Every field is optional; missing sections fall back
//! to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::addr::Addr;
use crate::common::error::ConfigError;
use crate::core::units::pmp::{PermissionEntry, PermissionTable};

/// Default configuration constants for the simulator.
mod defaults {
    /// Reset value of the program counter.
    pub const START_PC: u32 = 0x0000_0000;

    /// Instruction memory size in bytes (4 KiB).
    pub const IMEM_SIZE: usize = 4096;

    /// Data memory size in bytes (4 KiB).
    pub const DMEM_SIZE: usize = 4096;

    /// Cycle limit used by the CLI when none is given.
    pub const MAX_CYCLES: u64 = 1_000;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use pmpsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "pmp": {
///         "entries": [
///             { "start": 0, "end": 255, "read": true, "execute": true },
///             { "start": 0, "end": 4294967295 }
///         ]
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.memory.imem_size, 4096);
/// assert_eq!(config.pmp.table().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Instruction and data memory sizes
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Static PMP table
    #[serde(default)]
    pub pmp: PmpConfig,
}

impl Config {
    /// Parses a JSON configuration and validates it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, or any validation error from
    /// [`Config::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks memory sizes and the PMP table.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroSizedMemory`] for an empty memory, or any error from
    /// [`PermissionTable::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.imem_size == 0 {
            return Err(ConfigError::ZeroSizedMemory { name: "imem" });
        }
        if self.memory.dmem_size == 0 {
            return Err(ConfigError::ZeroSizedMemory { name: "dmem" });
        }
        let _ = self.pmp.table()?;
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace`-level record with the disassembly of every executed instruction
    #[serde(default)]
    pub trace_instructions: bool,

    /// PC value after reset
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: Addr,

    /// Cycle limit for a simulation run
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    fn default_start_pc() -> Addr {
        defaults::START_PC
    }

    /// Returns the default cycle limit.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::START_PC,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Instruction and data memory sizes.
///
/// The two memories are separate (Harvard) and both start at address zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Instruction memory size in bytes
    #[serde(default = "MemoryConfig::default_imem_size")]
    pub imem_size: usize,

    /// Data memory size in bytes
    #[serde(default = "MemoryConfig::default_dmem_size")]
    pub dmem_size: usize,
}

impl MemoryConfig {
    /// Returns the default instruction memory size in bytes.
    fn default_imem_size() -> usize {
        defaults::IMEM_SIZE
    }

    /// Returns the default data memory size in bytes.
    fn default_dmem_size() -> usize {
        defaults::DMEM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            imem_size: defaults::IMEM_SIZE,
            dmem_size: defaults::DMEM_SIZE,
        }
    }
}

/// Static PMP configuration.
///
/// Entries are listed in priority order; the last must be the deny-all
/// catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PmpConfig {
    /// Ordered PMP entries
    #[serde(default = "PmpConfig::default_entries")]
    pub entries: Vec<PermissionEntry>,
}

impl PmpConfig {
    /// Returns the reference entries.
    fn default_entries() -> Vec<PermissionEntry> {
        PermissionTable::reference().entries().to_vec()
    }

    /// Builds the validated permission table.
    ///
    /// # Errors
    ///
    /// Any error from [`PermissionTable::new`].
    pub fn table(&self) -> Result<PermissionTable, ConfigError> {
        PermissionTable::new(self.entries.clone())
    }
}

impl Default for PmpConfig {
    fn default() -> Self {
        Self {
            entries: Self::default_entries(),
        }
    }
}
