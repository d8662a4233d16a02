//! Signature capture and the reference-format file.
//!
//! The external checker compares signatures as text: one 32-bit word per line,
//! eight lowercase hex digits, in the order the words were streamed.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::common::ModelError;
use crate::common::constants::SIGNATURE_WORD_BYTES;
use crate::model::SignatureRegion;
use crate::soc::{DeviceBus, SimMonitor};

/// An ordered sequence of signature words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    words: Vec<u32>,
}

impl Signature {
    /// Wraps an existing word list.
    pub const fn from_words(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Collects the words streamed to either signature port.
    pub fn from_monitor(monitor: &SimMonitor) -> Self {
        Self::from_words(monitor.signature_words())
    }

    /// Reads the region straight out of memory, rounding a ragged bound up to a
    /// whole word.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Bus`] if the region is not readable.
    pub fn read_region<B>(bus: &mut B, region: SignatureRegion) -> Result<Self, ModelError>
    where
        B: DeviceBus + ?Sized,
    {
        let words = region.len().div_ceil(SIGNATURE_WORD_BYTES);
        let mut out = Vec::with_capacity(words as usize);
        for i in 0..words {
            out.push(bus.read_u32(region.begin() + i * SIGNATURE_WORD_BYTES)?);
        }
        Ok(Self::from_words(out))
    }

    /// The captured words.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` if `self` begins with every word of `other`.
    pub fn starts_with(&self, other: &Self) -> bool {
        self.words.starts_with(&other.words)
    }

    /// Signature file name the checker looks for, e.g. `DUT-neorv32.signature`.
    pub fn file_name(platform: &str) -> String {
        format!("DUT-{platform}.signature")
    }

    /// Writes the reference-format text to `path`.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.to_string())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in &self.words {
            writeln!(f, "{word:08x}")?;
        }
        Ok(())
    }
}
