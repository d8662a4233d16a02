//! Interrupt stimulus emitter.
//!
//! Tests raise and lower machine interrupts by poking platform-specific
//! doorbells. Each platform maps a [`Stimulus`] to a fixed, possibly empty,
//! sequence of stores; an empty sequence means the platform cannot drive that
//! source and the request is a no-op.

use std::fmt;

use crate::common::ModelError;
use crate::model::halt::MmioWrite;
use crate::soc::DeviceBus;

/// A request to change the level of a machine interrupt source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stimulus {
    /// Raise the machine software interrupt.
    SetSoftware,
    /// Lower the machine software interrupt.
    ClearSoftware,
    /// Raise the machine external interrupt.
    SetExternal,
    /// Lower the machine external interrupt.
    ClearExternal,
    /// Raise the machine timer interrupt.
    SetTimer,
    /// Lower the machine timer interrupt.
    ClearTimer,
}

impl Stimulus {
    /// Every stimulus, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::SetSoftware,
        Self::ClearSoftware,
        Self::SetExternal,
        Self::ClearExternal,
        Self::SetTimer,
        Self::ClearTimer,
    ];

    /// Returns `true` for the requests that lower a source.
    pub const fn is_clear(self) -> bool {
        matches!(self, Self::ClearSoftware | Self::ClearExternal | Self::ClearTimer)
    }
}

impl fmt::Display for Stimulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SetSoftware => "set-msw",
            Self::ClearSoftware => "clear-msw",
            Self::SetExternal => "set-mext",
            Self::ClearExternal => "clear-mext",
            Self::SetTimer => "set-mtimer",
            Self::ClearTimer => "clear-mtimer",
        };
        f.write_str(name)
    }
}

/// Performs `writes` in order. Returns the number of stores issued.
///
/// # Errors
///
/// Returns [`ModelError::Bus`] at the first store that faults; earlier stores
/// have already taken effect.
pub fn emit<B>(bus: &mut B, writes: &[MmioWrite]) -> Result<usize, ModelError>
where
    B: DeviceBus + ?Sized,
{
    for write in writes {
        bus.write_u32(write.addr, write.value)?;
    }
    Ok(writes.len())
}
