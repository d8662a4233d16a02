//! Instruction-set facts the model depends on.
//!
//! The model never executes instructions; it only needs register naming, the
//! privileged cause encoding, enough of the encoding rules to tell a 16-bit
//! instruction from a 32-bit one, and the ISA string a test is built for.

/// ABI register indices.
pub mod abi;

/// Privileged architecture (trap causes).
pub mod privileged;

/// Compressed (RVC) encoding rules.
pub mod rvc;

/// ISA string parsing.
pub mod string;

pub use string::{IsaError, IsaString};
