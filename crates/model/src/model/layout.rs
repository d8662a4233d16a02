//! Memory layout contract shared with the test program.
//!
//! The test image and the hooks agree on a handful of symbols:
//! 1. **Signature:** `begin_signature`/`end_signature` bound the result region.
//! 2. **Handshake:** `tohost`/`fromhost` are reserved co-simulation words.
//! 3. **Register state:** `begin_regstate`/`end_regstate` hold the host and
//!    target word widths for the external checker.
//! 4. **Dispatcher:** `rvmodel_trap_handler` is the trap vector target. Images
//!    built against the NEORV32 header name it `core_dummy_trap_handler`.
//!
//! The trap scratch area sits a fixed distance past `end_signature`, so it can
//! never overlap the signature itself.

use crate::common::constants::{
    REGSTATE_HOST_WIDTH, REGSTATE_TARGET_WIDTH, SIGNATURE_WORD_BYTES, TRAP_SCRATCH_OFFSET,
};
use crate::common::{BusError, ModelError};
use crate::soc::DeviceBus;

/// Symbol naming the first signature byte.
pub const BEGIN_SIGNATURE: &str = "begin_signature";
/// Symbol naming one past the last signature byte.
pub const END_SIGNATURE: &str = "end_signature";
/// Host-bound handshake word.
pub const TOHOST: &str = "tohost";
/// Target-bound handshake word.
pub const FROMHOST: &str = "fromhost";
/// Start of the register-state markers.
pub const BEGIN_REGSTATE: &str = "begin_regstate";
/// End of the register-state markers.
pub const END_REGSTATE: &str = "end_regstate";
/// Entry point of the trap dispatcher.
pub const TRAP_HANDLER: &str = "rvmodel_trap_handler";
/// Dispatcher entry as labelled by the NEORV32 `model_test.h`.
pub const CORE_TRAP_HANDLER: &str = "core_dummy_trap_handler";

/// The byte range `[begin, end)` the test fills with results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureRegion {
    begin: u64,
    end: u64,
}

impl SignatureRegion {
    /// Creates a region after checking the contract: the base is word aligned and
    /// the bound does not precede it. The bound itself may be unaligned.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidSignatureRegion`] if either check fails.
    pub const fn new(begin: u64, end: u64) -> Result<Self, ModelError> {
        if begin % SIGNATURE_WORD_BYTES != 0 {
            return Err(ModelError::InvalidSignatureRegion {
                begin,
                end,
                reason: "base is not word aligned",
            });
        }
        if end < begin {
            return Err(ModelError::InvalidSignatureRegion {
                begin,
                end,
                reason: "bound precedes base",
            });
        }
        Ok(Self { begin, end })
    }

    /// Address of the first signature byte.
    pub const fn begin(&self) -> u64 {
        self.begin
    }

    /// Address one past the last signature byte.
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Length of the region in bytes.
    pub const fn len(&self) -> u64 {
        self.end - self.begin
    }

    /// Returns `true` for an empty region.
    pub const fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns `true` if the bound is word aligned.
    pub const fn is_word_aligned(&self) -> bool {
        self.end % SIGNATURE_WORD_BYTES == 0
    }

    /// Returns `true` if `[addr, addr + len)` intersects the region. A range
    /// running past the top of the address space is clamped there.
    pub const fn overlaps(&self, addr: u64, len: u64) -> bool {
        len != 0 && addr < self.end && addr.saturating_add(len) > self.begin
    }
}

/// Addresses of the co-simulation handshake words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostHandshake {
    /// `tohost` word.
    pub tohost: u64,
    /// `fromhost` word.
    pub fromhost: u64,
}

/// Addresses of the register-state markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegStateMarkers {
    /// `begin_regstate`; holds the host word width.
    pub begin: u64,
    /// `end_regstate`; holds the target word width.
    pub end: u64,
}

impl RegStateMarkers {
    /// Reads the `(host, target)` widths stored at the markers.
    ///
    /// # Errors
    ///
    /// Returns [`BusError`] if either marker is unmapped.
    pub fn read_widths<B>(&self, bus: &mut B) -> Result<(u32, u32), BusError>
    where
        B: DeviceBus + ?Sized,
    {
        Ok((bus.read_u32(self.begin)?, bus.read_u32(self.end)?))
    }

    /// Returns `true` if the markers hold the widths this target reports
    /// (128-bit host, 4-byte target word).
    ///
    /// # Errors
    ///
    /// See [`Self::read_widths`].
    pub fn matches_target<B>(&self, bus: &mut B) -> Result<bool, BusError>
    where
        B: DeviceBus + ?Sized,
    {
        Ok(self.read_widths(bus)? == (REGSTATE_HOST_WIDTH, REGSTATE_TARGET_WIDTH))
    }
}

/// Resolved layout contract for one test image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryLayout {
    /// The signature region.
    pub signature: SignatureRegion,
    /// Dispatcher entry, if the image or configuration provides one.
    pub trap_entry: Option<u64>,
    /// Handshake words, if reserved by the image.
    pub handshake: Option<HostHandshake>,
    /// Register-state markers, if present.
    pub regstate: Option<RegStateMarkers>,
}

impl MemoryLayout {
    /// Creates a layout with just a signature region and dispatcher entry.
    pub const fn new(signature: SignatureRegion, trap_entry: Option<u64>) -> Self {
        Self {
            signature,
            trap_entry,
            handshake: None,
            regstate: None,
        }
    }

    /// Resolves the contract from `(name, address)` pairs, e.g. an ELF symbol table.
    ///
    /// The dispatcher entry is taken from [`TRAP_HANDLER`], then
    /// [`CORE_TRAP_HANDLER`], then `fallback_trap_entry`. Handshake
    /// words and register-state markers are only recorded when both halves exist.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingSymbol`] if either signature bound is missing,
    /// or [`ModelError::InvalidSignatureRegion`] if the bounds break the contract.
    pub fn from_symbols<'a, I>(symbols: I, fallback_trap_entry: Option<u64>) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut begin = None;
        let mut end = None;
        let mut trap_entry = None;
        let mut core_trap_entry = None;
        let mut tohost = None;
        let mut fromhost = None;
        let mut regstate_begin = None;
        let mut regstate_end = None;

        for (name, addr) in symbols {
            let slot = match name {
                BEGIN_SIGNATURE => &mut begin,
                END_SIGNATURE => &mut end,
                TRAP_HANDLER => &mut trap_entry,
                CORE_TRAP_HANDLER => &mut core_trap_entry,
                TOHOST => &mut tohost,
                FROMHOST => &mut fromhost,
                BEGIN_REGSTATE => &mut regstate_begin,
                END_REGSTATE => &mut regstate_end,
                _ => continue,
            };
            *slot = Some(addr);
        }

        let begin = begin.ok_or(ModelError::MissingSymbol(BEGIN_SIGNATURE))?;
        let end = end.ok_or(ModelError::MissingSymbol(END_SIGNATURE))?;

        Ok(Self {
            signature: SignatureRegion::new(begin, end)?,
            trap_entry: trap_entry.or(core_trap_entry).or(fallback_trap_entry),
            handshake: tohost
                .zip(fromhost)
                .map(|(tohost, fromhost)| HostHandshake { tohost, fromhost }),
            regstate: regstate_begin
                .zip(regstate_end)
                .map(|(begin, end)| RegStateMarkers { begin, end }),
        })
    }

    /// Base of the two-slot trap scratch area.
    ///
    /// Saturates at the top of the address space; such a base is never mapped,
    /// so the first trap reports a bus fault.
    pub const fn trap_scratch_base(&self) -> u64 {
        self.signature.end().saturating_add(TRAP_SCRATCH_OFFSET)
    }
}
