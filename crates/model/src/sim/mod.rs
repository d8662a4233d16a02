//! Running tests against the model.
//!
//! 1. **Loader:** Parses a test ELF and resolves its layout contract.
//! 2. **Session:** Drives the hooks in lifecycle order.
//! 3. **Signature:** Captures the streamed words and writes the checker's file.

/// ELF loading.
pub mod loader;
/// Session lifecycle.
pub mod session;
/// Signature capture and file output.
pub mod signature;

pub use self::loader::{ElfImage, LoadError};
pub use self::session::{Phase, Session, TrapOutcome};
pub use self::signature::Signature;
