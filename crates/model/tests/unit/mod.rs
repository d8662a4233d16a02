//! # Unit Components
//!
//! Tests grouped by the crate module they exercise.

/// Register width and trap cause encoding.
pub mod common;


/// Hart state, trap entry, and `mret`.
pub mod core;
