//! System construction and the top-level `System` type.
//!
//! This module builds the memory system from configuration. It performs:
//! 1. **Memory setup:** Creates separate instruction and data memories
//!    (Harvard layout, both addressed from zero).
//! 2. **Image loading:** Places program and data images, rejecting images
//!    that do not fit.

use crate::common::error::LoadError;
use crate::config::Config;
use crate::soc::memory::Memory;
use crate::soc::traits::Device;

/// Instruction and data memories seen by the core.
pub struct System {
    /// Instruction memory (fetch port).
    pub imem: Box<dyn Device>,
    /// Data memory (load/store port).
    pub dmem: Box<dyn Device>,
}

impl std::fmt::Debug for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("imem", &format_args!("{} ({} bytes)", self.imem.name(), self.imem.size()))
            .field("dmem", &format_args!("{} ({} bytes)", self.dmem.name(), self.dmem.size()))
            .finish()
    }
}

impl System {
    /// Builds zero-filled memories sized by `config.memory`.
    pub fn new(config: &Config) -> Self {
        Self {
            imem: Box::new(Memory::new("IMEM", config.memory.imem_size)),
            dmem: Box::new(Memory::new("DMEM", config.memory.dmem_size)),
        }
    }

    /// Builds a system from arbitrary devices (used with mock memories).
    pub fn with_devices(imem: Box<dyn Device>, dmem: Box<dyn Device>) -> Self {
        Self { imem, dmem }
    }

    /// Places a program image at offset 0 of instruction memory.
    ///
    /// # Errors
    ///
    /// [`LoadError::TooLarge`] if the image exceeds the memory size.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), LoadError> {
        load_into(self.imem.as_mut(), image, "instruction memory")
    }

    /// Places a data image at offset 0 of data memory.
    ///
    /// # Errors
    ///
    /// [`LoadError::TooLarge`] if the image exceeds the memory size.
    pub fn load_data(&mut self, image: &[u8]) -> Result<(), LoadError> {
        load_into(self.dmem.as_mut(), image, "data memory")
    }
}

fn load_into(dev: &mut dyn Device, image: &[u8], target: &'static str) -> Result<(), LoadError> {
    if image.len() > dev.size() {
        return Err(LoadError::TooLarge {
            len: image.len(),
            capacity: dev.size(),
            target,
        });
    }
    dev.write_bytes(0, image);
    tracing::debug!(target_memory = target, bytes = image.len(), "loaded image");
    Ok(())
}
