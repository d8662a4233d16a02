//! System interconnect (bus) for memory and MMIO access.
//!
//! This module implements the bus that routes physical addresses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range and sorted for lookup.
//! 2. **Access routing:** Aligned reads and writes with a last-device hint.
//! 3. **Image loading:** Byte-wise placement of ELF segments into RAM.

use std::fmt;

use super::traits::{Device, DeviceBus, check_alignment};
use crate::common::BusError;

/// System bus connecting the hart to RAM and the control-page devices.
pub struct Bus {
    devices: Vec<Box<dyn Device>>,
    last_device_idx: usize,
}

impl Bus {
    /// Creates an empty bus; add devices with `add_device`.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            last_device_idx: 0,
        }
    }

    /// Registers a device; devices are kept sorted by base address.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        let (base, size) = dev.address_range();
        tracing::debug!(
            device = dev.name(),
            base = format_args!("{base:#x}"),
            size = format_args!("{size:#x}"),
            "device attached"
        );
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
    }

    /// Names of the attached devices in address order.
    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name()).collect()
    }

    /// Returns whether any device claims `paddr`.
    pub fn is_valid_address(&self, paddr: u64) -> bool {
        self.devices.iter().any(|dev| contains(dev.as_ref(), paddr))
    }

    /// Writes a binary blob starting at `addr`.
    ///
    /// If one device claims the whole range it receives a single `write_bytes`;
    /// otherwise bytes are routed one at a time.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Unmapped`] for the first byte no device claims.
    pub fn load_binary_at(&mut self, data: &[u8], addr: u64) -> Result<(), BusError> {
        if let Some((dev, offset)) = self.find_device(addr) {
            let (_, size) = dev.address_range();
            if offset + data.len() as u64 <= size {
                dev.write_bytes(offset, data);
                return Ok(());
            }
        }
        for (i, byte) in data.iter().enumerate() {
            let paddr = addr + i as u64;
            let (dev, offset) = self.find_device(paddr).ok_or(BusError::Unmapped(paddr))?;
            dev.write_u8(offset, *byte);
        }
        Ok(())
    }

    fn find_device(&mut self, paddr: u64) -> Option<(&mut Box<dyn Device>, u64)> {
        if self.last_device_idx < self.devices.len()
            && contains(self.devices[self.last_device_idx].as_ref(), paddr)
        {
            let idx = self.last_device_idx;
            let base = self.devices[idx].address_range().0;
            return Some((&mut self.devices[idx], paddr - base));
        }

        let idx = self
            .devices
            .iter()
            .position(|dev| contains(dev.as_ref(), paddr))?;
        self.last_device_idx = idx;
        let base = self.devices[idx].address_range().0;
        Some((&mut self.devices[idx], paddr - base))
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("devices", &self.device_names())
            .finish_non_exhaustive()
    }
}

impl DeviceBus for Bus {
    fn read_u16(&mut self, addr: u64) -> Result<u16, BusError> {
        check_alignment(addr, 2)?;
        let (dev, offset) = self.find_device(addr).ok_or(BusError::Unmapped(addr))?;
        Ok(dev.read_u16(offset))
    }

    fn read_u32(&mut self, addr: u64) -> Result<u32, BusError> {
        check_alignment(addr, 4)?;
        let (dev, offset) = self.find_device(addr).ok_or(BusError::Unmapped(addr))?;
        Ok(dev.read_u32(offset))
    }

    fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), BusError> {
        check_alignment(addr, 4)?;
        let (dev, offset) = self.find_device(addr).ok_or(BusError::Unmapped(addr))?;
        dev.write_u32(offset, val);
        Ok(())
    }
}

fn contains(dev: &dyn Device, paddr: u64) -> bool {
    let (start, size) = dev.address_range();
    paddr >= start && paddr - start < size
}
