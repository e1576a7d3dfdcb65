//! Device trait for the core's memory ports.
//!
//! This module defines the `Device` trait implemented by everything that can
//! sit behind the instruction or data port. It provides:
//! 1. **Identification:** `name` and `size` for diagnostics and bounds.
//! 2. **Access:** Byte, half and word read/write at device-relative offsets.
//! 3. **Bulk load:** `write_bytes` for placing program and data images.
//!
//! Reads take `&self`: within a tick the core only ever observes the memory
//! contents committed by the previous tick.

/// Byte-addressed little-endian storage attached to a core port.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"IMEM"`, `"DMEM"`).
    fn name(&self) -> &str;
    /// Returns the device size in bytes.
    fn size(&self) -> usize;
    /// Reads one byte at the given offset.
    fn read_u8(&self, offset: u32) -> u8;
    /// Reads two bytes (little-endian) at the given offset.
    fn read_u16(&self, offset: u32) -> u16;
    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&self, offset: u32) -> u32;
    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u32, val: u8);
    /// Writes two bytes (little-endian) at the given offset.
    fn write_u16(&mut self, offset: u32, val: u16);
    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u32, val: u32);

    /// Writes a contiguous byte slice at the given offset (default: byte-by-byte).
    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(offset.wrapping_add(i as u32), *byte);
        }
    }
}
