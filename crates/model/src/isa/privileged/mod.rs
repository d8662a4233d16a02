//! Privileged architecture definitions.

/// Trap cause codes for `mcause`.
pub mod cause;
