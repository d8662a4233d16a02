//! Signature dumper and halt.
//!
//! At the end of a test the signature region is streamed, one 32-bit word at a
//! time in ascending address order, to a single output port. Some platforms then
//! pad the stream with zero words so its total length lines up with the
//! checker's expectations, and every platform finishes by ringing the
//! termination doorbell. After that the hart spins forever; the model reports
//! and returns instead.

use crate::common::ModelError;
use crate::common::constants::SIGNATURE_WORD_BYTES;
use crate::model::layout::SignatureRegion;
use crate::soc::DeviceBus;

/// Loop exit condition of the dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpTermination {
    /// Stop when the cursor equals the bound. A bound that is not reachable in
    /// whole words would never match, so it is rejected up front.
    UntilEqual,
    /// Stop once the cursor reaches or passes the bound.
    UntilAtOrPast,
}

/// A single MMIO store with a fixed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MmioWrite {
    /// Target address.
    pub addr: u64,
    /// Stored word.
    pub value: u32,
}

impl MmioWrite {
    /// Creates a store of `value` to `addr`.
    pub const fn new(addr: u64, value: u32) -> Self {
        Self { addr, value }
    }
}

/// How a platform streams the signature out and stops the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumpProfile {
    /// Port every signature word is written to.
    pub output_addr: u64,
    /// Loop exit condition.
    pub termination: DumpTermination,
    /// Pad the stream with zero words according to the bound's position inside
    /// a block of this many bytes.
    pub pad_to: Option<u64>,
    /// Doorbell store that ends the simulation.
    pub terminate: MmioWrite,
}

/// Words emitted by one dump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DumpReport {
    /// Words copied out of the signature region.
    pub data_words: u64,
    /// Zero words appended after the data.
    pub padding_words: u64,
}

impl DumpReport {
    /// Total words written to the output port.
    pub const fn total_words(&self) -> u64 {
        self.data_words + self.padding_words
    }
}

/// Zero words appended for a region ending at `end`.
///
/// The word offset of `end` within its `boundary`-byte block is taken; if it is
/// non-zero, enough words to fill the rest of that block are emitted. With a
/// 16-byte boundary this is `(16 - (end & 0xC)) / 4`.
pub const fn padding_words(end: u64, boundary: u64) -> u64 {
    if boundary < SIGNATURE_WORD_BYTES {
        return 0;
    }
    let misalignment = end % boundary / SIGNATURE_WORD_BYTES * SIGNATURE_WORD_BYTES;
    if misalignment == 0 {
        0
    } else {
        (boundary - misalignment) / SIGNATURE_WORD_BYTES
    }
}

/// Streams the signature region to the profile's output port.
///
/// The region's memory is only read; a successful dump leaves it unchanged.
///
/// # Errors
///
/// Returns [`ModelError::UnterminatedDump`] for an equality-terminated profile
/// whose bound is not a whole number of words past the base, or
/// [`ModelError::Bus`] if a read or output store faults.
pub fn dump_signature<B>(
    bus: &mut B,
    region: SignatureRegion,
    profile: &DumpProfile,
) -> Result<DumpReport, ModelError>
where
    B: DeviceBus + ?Sized,
{
    let (begin, end) = (region.begin(), region.end());
    if profile.termination == DumpTermination::UntilEqual && region.len() % SIGNATURE_WORD_BYTES != 0 {
        return Err(ModelError::UnterminatedDump { begin, end });
    }

    let mut report = DumpReport::default();
    let mut cursor = begin;
    loop {
        let done = match profile.termination {
            DumpTermination::UntilEqual => cursor == end,
            DumpTermination::UntilAtOrPast => cursor >= end,
        };
        if done {
            break;
        }
        let word = bus.read_u32(cursor)?;
        bus.write_u32(profile.output_addr, word)?;
        cursor += SIGNATURE_WORD_BYTES;
        report.data_words += 1;
    }

    if let Some(boundary) = profile.pad_to {
        report.padding_words = padding_words(end, boundary);
        for _ in 0..report.padding_words {
            bus.write_u32(profile.output_addr, 0)?;
        }
    }

    tracing::debug!(
        begin = format_args!("{begin:#x}"),
        end = format_args!("{end:#x}"),
        data = report.data_words,
        padding = report.padding_words,
        "signature dumped"
    );
    Ok(report)
}

/// Dumps the signature, then rings the termination doorbell.
///
/// # Errors
///
/// See [`dump_signature`]; the doorbell store can also fail with [`ModelError::Bus`].
pub fn halt<B>(bus: &mut B, region: SignatureRegion, profile: &DumpProfile) -> Result<DumpReport, ModelError>
where
    B: DeviceBus + ?Sized,
{
    let report = dump_signature(bus, region, profile)?;
    bus.write_u32(profile.terminate.addr, profile.terminate.value)?;
    tracing::info!(words = report.total_words(), "halt requested");
    Ok(report)
}
