use pmpsim_core::soc::traits::Device;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One recorded write: `(offset, value, width_in_bytes)`.
pub type WriteRecord = (u32, u32, u8);

/// Shared view of a `MockMemory`'s access history.
///
/// The handle stays with the test after the memory is boxed into the system.
#[derive(Clone, Debug, Default)]
pub struct AccessLog {
    reads: Arc<AtomicUsize>,
    writes: Arc<Mutex<Vec<WriteRecord>>>,
}

impl AccessLog {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

pub struct MockMemory {
    data: Vec<u8>,
    log: AccessLog,
}

impl MockMemory {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
            log: AccessLog::default(),
        }
    }

    /// Pre-loads little-endian words starting at offset 0 without recording them.
    pub fn with_words(mut self, words: &[u32]) -> Self {
        for (i, w) in words.iter().enumerate() {
            let at = i * 4;
            self.data[at..at + 4].copy_from_slice(&w.to_le_bytes());
        }
        self
    }

    pub fn log(&self) -> AccessLog {
        self.log.clone()
    }

    fn read_bytes<const N: usize>(&self, offset: u32) -> [u8; N] {
        let _ = self.log.reads.fetch_add(1, Ordering::SeqCst);
        let mut out = [0u8; N];
        for (i, b) in out.iter_mut().enumerate() {
            *b = self.data.get(offset as usize + i).copied().unwrap_or(0);
        }
        out
    }

    fn record(&mut self, offset: u32, val: u32, bytes: &[u8]) {
        self.log
            .writes
            .lock()
            .unwrap()
            .push((offset, val, bytes.len() as u8));
        for (i, b) in bytes.iter().enumerate() {
            if let Some(slot) = self.data.get_mut(offset as usize + i) {
                *slot = *b;
            }
        }
    }
}

impl Device for MockMemory {
    fn name(&self) -> &str {
        "MockMemory"
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn read_u8(&self, offset: u32) -> u8 {
        self.read_bytes::<1>(offset)[0]
    }

    fn read_u16(&self, offset: u32) -> u16 {
        u16::from_le_bytes(self.read_bytes(offset))
    }

    fn read_u32(&self, offset: u32) -> u32 {
        u32::from_le_bytes(self.read_bytes(offset))
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        self.record(offset, val as u32, &[val]);
    }

    fn write_u16(&mut self, offset: u32, val: u16) {
        self.record(offset, val as u32, &val.to_le_bytes());
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        self.record(offset, val, &val.to_le_bytes());
    }
}
