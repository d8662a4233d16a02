//! Common types and constants shared by every part of the target model.
//!
//! This module provides the fundamental building blocks used across the crate:
//! 1. **Register width:** The `Xlen` selector for RV32 and RV64 targets.
//! 2. **Constants:** Fixed memory-mapped addresses and sentinel values of the target.
//! 3. **Traps:** The `Trap` cause type delivered to the hart.
//! 4. **Error Handling:** Bus and model error types.

/// Fixed addresses, sentinel values, and layout offsets.
pub mod constants;

/// Error types for bus accesses and hook sequencing.
pub mod error;

/// Trap cause definitions.
pub mod trap;

/// Register width (XLEN) selection.
pub mod xlen;

pub use error::{BusError, ModelError};
pub use trap::Trap;
pub use xlen::Xlen;
