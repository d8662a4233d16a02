//! Register width of the simulated core.
//!
//! Compliance tests are built for either RV32 or RV64. The width decides how many
//! bytes a saved register occupies in the trap scratch area and which bit of
//! `mcause` flags an interrupt.

use serde::Deserialize;
use std::fmt;

/// Native integer register width of the target hart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Xlen {
    /// 32-bit registers (`ilp32`).
    #[default]
    #[serde(alias = "rv32", alias = "32")]
    Rv32,
    /// 64-bit registers (`lp64`).
    #[serde(alias = "rv64", alias = "64")]
    Rv64,
}

impl Xlen {
    /// Register width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 => 64,
        }
    }

    /// Register width in bytes.
    pub const fn bytes(self) -> u64 {
        self.bits() as u64 / 8
    }

    /// Mask selecting the architecturally visible bits of a register.
    pub const fn mask(self) -> u64 {
        match self {
            Self::Rv32 => 0xFFFF_FFFF,
            Self::Rv64 => u64::MAX,
        }
    }

    /// The `mcause` bit that marks an asynchronous interrupt (the register's sign bit).
    pub const fn interrupt_bit(self) -> u64 {
        1 << (self.bits() - 1)
    }
}

impl fmt::Display for Xlen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RV{}", self.bits())
    }
}
