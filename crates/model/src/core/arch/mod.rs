//! Architectural register files.

/// Machine-mode Control and Status Registers.
pub mod csr;

/// General-purpose integer registers.
pub mod gpr;

pub use csr::Csrs;
pub use gpr::Gpr;
