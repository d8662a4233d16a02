//! ISA strings as written in a hart's ISA specification (e.g. `RV32IMCZicsr_Zifencei`).
//!
//! Only the width prefix and the single-letter extensions matter to the model:
//! the width selects XLEN and the ABI, and the letters decide which extensions
//! are passed on to the test build. Multi-letter extensions are kept verbatim
//! but not interpreted.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::common::Xlen;

/// Errors raised while parsing an ISA string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsaError {
    /// The string does not start with `RV`.
    #[error("ISA string '{0}' does not start with RV")]
    MissingPrefix(String),
    /// The width is not 32 or 64.
    #[error("unsupported register width in ISA string '{0}'")]
    UnsupportedWidth(String),
    /// No `I`, `E` or `G` base follows the width.
    #[error("ISA string '{0}' has no base integer ISA")]
    MissingBase(String),
}

/// A parsed ISA string.
///
/// # Examples
///
/// ```
/// use rvmodel_core::common::Xlen;
/// use rvmodel_core::isa::IsaString;
///
/// let isa: IsaString = "RV32IMCZicsr_Zifencei".parse().unwrap();
/// assert_eq!(isa.xlen(), Xlen::Rv32);
/// assert!(isa.has('c'));
/// assert!(!isa.has('f'));
/// assert_eq!(isa.multi_letter(), ["zicsr", "zifencei"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct IsaString {
    xlen: Xlen,
    letters: String,
    multi_letter: Vec<String>,
}

impl IsaString {
    /// Register width named by the prefix.
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    /// Single-letter extensions, lowercase, with `G` expanded to `IMAFD`.
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// Multi-letter extensions (`Z*`, `S*`, `X*`), lowercase.
    pub fn multi_letter(&self) -> &[String] {
        &self.multi_letter
    }

    /// Returns `true` if the single-letter extension `ext` is present.
    pub fn has(&self, ext: char) -> bool {
        self.letters.contains(ext.to_ascii_lowercase())
    }

    /// Integer calling convention for this width: `ilp32` or `lp64`.
    pub const fn mabi(&self) -> &'static str {
        match self.xlen {
            Xlen::Rv32 => "ilp32",
            Xlen::Rv64 => "lp64",
        }
    }

    /// `-march` value restricted to the extensions in `supported`, in that order.
    pub fn march(&self, supported: &str) -> String {
        let mut march = format!("rv{}", self.xlen.bits());
        march.extend(supported.chars().filter(|ext| self.has(*ext)));
        march
    }
}

impl FromStr for IsaString {
    type Err = IsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let rest = lower
            .strip_prefix("rv")
            .ok_or_else(|| IsaError::MissingPrefix(s.to_string()))?;

        let (xlen, rest) = if let Some(rest) = rest.strip_prefix("32") {
            (Xlen::Rv32, rest)
        } else if let Some(rest) = rest.strip_prefix("64") {
            (Xlen::Rv64, rest)
        } else {
            return Err(IsaError::UnsupportedWidth(s.to_string()));
        };

        let split = rest
            .find(|c: char| matches!(c, 'z' | 's' | 'x' | '_'))
            .unwrap_or(rest.len());
        let (single, multi) = rest.split_at(split);

        let mut letters = String::with_capacity(single.len());
        for ext in single.chars() {
            if ext == 'g' {
                letters.push_str("imafd");
            } else {
                letters.push(ext);
            }
        }
        if !matches!(letters.chars().next(), Some('i' | 'e')) {
            return Err(IsaError::MissingBase(s.to_string()));
        }

        let multi_letter = multi
            .split('_')
            .filter(|ext| !ext.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            xlen,
            letters,
            multi_letter,
        })
    }
}

impl TryFrom<String> for IsaString {
    type Error = IsaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for IsaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RV{}{}", self.xlen.bits(), self.letters.to_ascii_uppercase())?;
        for (i, ext) in self.multi_letter.iter().enumerate() {
            let sep = if i == 0 { "" } else { "_" };
            let mut chars = ext.chars();
            if let Some(first) = chars.next() {
                write!(f, "{sep}{}{}", first.to_ascii_uppercase(), chars.as_str())?;
            }
        }
        Ok(())
    }
}
