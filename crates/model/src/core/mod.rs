//! Architectural state of the hart the hooks run on.
//!
//! 1. **Arch:** General-purpose registers and the machine-mode CSR subset.
//! 2. **Hart:** Program counter plus hardware trap entry and `mret` semantics.

/// Architectural register state (GPRs, CSRs).
pub mod arch;

/// Hart state and privileged control transfer.
pub mod hart;

pub use hart::Hart;
