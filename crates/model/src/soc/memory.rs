//! Flat RAM regions.
//!
//! The target has separate instruction and data memories; each is a plain
//! byte array mapped at a physical base address. Out-of-range accesses read as
//! zero and drop writes, matching how the bus never routes them here.

use crate::soc::traits::Device;

/// Byte-addressable memory region.
#[derive(Clone, Debug)]
pub struct Memory {
    name: String,
    data: Vec<u8>,
    base_addr: u64,
}

impl Memory {
    /// Creates a zero-filled region of `size` bytes at `base_addr`.
    pub fn new(name: impl Into<String>, base_addr: u64, size: usize) -> Self {
        Self {
            name: name.into(),
            data: vec![0; size],
            base_addr,
        }
    }

    /// Loads a byte slice at a region-relative offset; bytes past the end are dropped.
    pub fn load(&mut self, data: &[u8], offset: usize) {
        if offset >= self.data.len() {
            return;
        }
        let len = data.len().min(self.data.len() - offset);
        self.data[offset..offset + len].copy_from_slice(&data[..len]);
    }

    fn read_array<const N: usize>(&self, offset: u64) -> [u8; N] {
        let mut out = [0; N];
        let start = offset as usize;
        if let Some(src) = self.data.get(start..start + N) {
            out.copy_from_slice(src);
        }
        out
    }
}

impl Device for Memory {
    fn name(&self) -> &str {
        &self.name
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, self.data.len() as u64)
    }

    fn read_u16(&mut self, offset: u64) -> u16 {
        u16::from_le_bytes(self.read_array(offset))
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        u32::from_le_bytes(self.read_array(offset))
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        self.load(&val.to_le_bytes(), offset as usize);
    }

    fn write_u8(&mut self, offset: u64, val: u8) {
        if let Some(byte) = self.data.get_mut(offset as usize) {
            *byte = val;
        }
    }

    fn write_bytes(&mut self, offset: u64, data: &[u8]) {
        self.load(data, offset as usize);
    }
}
