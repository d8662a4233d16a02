//! Device and bus traits for memory-mapped I/O.
//!
//! Two seams live here:
//! 1. **`Device`:** A component claiming an address range on the interconnect,
//!    addressed with device-relative offsets.
//! 2. **`DeviceBus`:** The abstract bus the model hooks are written against. Every
//!    hook takes `&mut impl DeviceBus`, so tests can substitute a recording fake
//!    for the real interconnect.
//!
//! Devices must be `Send + Sync` so a `Bus` can move between threads.

use crate::common::{BusError, Xlen};

/// Trait for memory-mapped devices attached to the system bus.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"UART0"`, `"DMEM"`).
    fn name(&self) -> &str;
    /// Returns (base_address, size_in_bytes) of this device's region.
    fn address_range(&self) -> (u64, u64);
    /// Reads two bytes (little-endian) at the given device-relative offset.
    fn read_u16(&mut self, offset: u64) -> u16;
    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&mut self, offset: u64) -> u32;
    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u64, val: u32);

    /// Writes one byte at the given offset (default: ignored, as on MMIO registers).
    fn write_u8(&mut self, _offset: u64, _val: u8) {}

    /// Writes a contiguous byte slice at the given offset (default: byte-by-byte).
    fn write_bytes(&mut self, offset: u64, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(offset + i as u64, *byte);
        }
    }
}

/// Address-level bus interface used by the model hooks.
///
/// Accesses must be naturally aligned. Unlike the raw `Device` interface, every
/// access can fail, so an unmapped doorbell surfaces as an error instead of a
/// silently dropped store.
pub trait DeviceBus {
    /// Reads a halfword (used to fetch the first parcel of a faulting instruction).
    fn read_u16(&mut self, addr: u64) -> Result<u16, BusError>;
    /// Reads a 32-bit word.
    fn read_u32(&mut self, addr: u64) -> Result<u32, BusError>;
    /// Writes a 32-bit word.
    fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), BusError>;

    /// Reads one XLEN-sized register image (`lw` on RV32, `ld` on RV64).
    fn read_xlen(&mut self, addr: u64, xlen: Xlen) -> Result<u64, BusError> {
        match xlen {
            Xlen::Rv32 => Ok(u64::from(self.read_u32(addr)?)),
            Xlen::Rv64 => {
                check_alignment(addr, 8)?;
                let lo = u64::from(self.read_u32(addr)?);
                let hi = u64::from(self.read_u32(addr + 4)?);
                Ok(lo | (hi << 32))
            }
        }
    }

    /// Writes one XLEN-sized register image (`sw` on RV32, `sd` on RV64).
    fn write_xlen(&mut self, addr: u64, xlen: Xlen, val: u64) -> Result<(), BusError> {
        match xlen {
            Xlen::Rv32 => self.write_u32(addr, val as u32),
            Xlen::Rv64 => {
                check_alignment(addr, 8)?;
                self.write_u32(addr, val as u32)?;
                self.write_u32(addr + 4, (val >> 32) as u32)
            }
        }
    }
}

/// Fails with [`BusError::Misaligned`] unless `addr` is a multiple of `width`.
pub const fn check_alignment(addr: u64, width: u64) -> Result<(), BusError> {
    if addr % width == 0 {
        Ok(())
    } else {
        Err(BusError::Misaligned { addr, width })
    }
}
