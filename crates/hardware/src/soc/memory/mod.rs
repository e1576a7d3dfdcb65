//! Instruction and data memory.
//!
//! This module implements the flat memories behind the core's two ports. It
//! provides:
//! 1. **Storage:** A zero-initialized byte vector of fixed size.
//! 2. **Access:** Little-endian reads and writes through [`Device`].
//! 3. **Bounds:** Bytes outside the array read as zero and accesses that do
//!    not fit are dropped as a whole.

use crate::soc::traits::Device;

/// Fixed-size byte-addressed memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    name: &'static str,
    bytes: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    pub fn new(name: &'static str, size: usize) -> Self {
        Self {
            name,
            bytes: vec![0; size],
        }
    }

    /// Raw contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copies `data` to `offset`. Returns false, leaving memory untouched, if
    /// the slice does not fit.
    pub fn load(&mut self, data: &[u8], offset: usize) -> bool {
        let Some(end) = offset.checked_add(data.len()) else {
            return false;
        };
        match self.bytes.get_mut(offset..end) {
            Some(dst) => {
                dst.copy_from_slice(data);
                true
            }
            None => false,
        }
    }

    /// Zeroes the whole memory.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    fn read_array<const N: usize>(&self, offset: u32) -> [u8; N] {
        let mut out = [0u8; N];
        let start = offset as usize;
        for (i, b) in out.iter_mut().enumerate() {
            *b = start
                .checked_add(i)
                .and_then(|at| self.bytes.get(at))
                .copied()
                .unwrap_or(0);
        }
        out
    }

    fn write_array(&mut self, offset: u32, data: &[u8]) {
        let _ = self.load(data, offset as usize);
    }
}

impl Device for Memory {
    fn name(&self) -> &str {
        self.name
    }

    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn read_u8(&self, offset: u32) -> u8 {
        self.bytes.get(offset as usize).copied().unwrap_or(0)
    }

    fn read_u16(&self, offset: u32) -> u16 {
        u16::from_le_bytes(self.read_array(offset))
    }

    fn read_u32(&self, offset: u32) -> u32 {
        u32::from_le_bytes(self.read_array(offset))
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        if let Some(b) = self.bytes.get_mut(offset as usize) {
            *b = val;
        }
    }

    fn write_u16(&mut self, offset: u32, val: u16) {
        self.write_array(offset, &val.to_le_bytes());
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        self.write_array(offset, &val.to_le_bytes());
    }

    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        self.write_array(offset, data);
    }
}
