//! Error types for the target model.
//!
//! The target itself has no recoverable-error concept; these errors describe
//! misuse of the model (hooks out of order, a bus access nothing answers) so the
//! host side can report it instead of hanging the way the real target would.

use thiserror::Error;

/// Failure of a single bus transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// No device claims the address.
    #[error("no device mapped at {0:#x}")]
    Unmapped(u64),
    /// The access is not naturally aligned for its width.
    #[error("misaligned {width}-byte access at {addr:#x}")]
    Misaligned {
        /// Faulting address.
        addr: u64,
        /// Access width in bytes.
        width: u64,
    },
}

/// Errors raised while sequencing the model hooks.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A bus access failed.
    #[error("bus error: {0}")]
    Bus(#[from] BusError),
    /// The boot hook ran more than once.
    #[error("boot hook already executed")]
    AlreadyBooted,
    /// A hook other than boot ran before boot.
    #[error("hook invoked before the boot hook")]
    NotBooted,
    /// The halt sequence already signalled termination; nothing past it is observable.
    #[error("simulation already terminated")]
    Halted,
    /// The trap scratch area is still held by an earlier trap; carries the new `mcause`.
    #[error("nested trap entry (mcause {0:#x}) while the scratch slot is held")]
    NestedTrap(u64),
    /// The trap vector would not point at a 4-byte aligned handler.
    #[error("trap handler entry {0:#x} is not 4-byte aligned")]
    MisalignedTrapVector(u64),
    /// A signature bound violates the layout contract.
    #[error("signature region [{begin:#x}, {end:#x}) is invalid: {reason}")]
    InvalidSignatureRegion {
        /// `begin_signature` address.
        begin: u64,
        /// `end_signature` address.
        end: u64,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// An equality-terminated dump would never reach its bound.
    #[error("dump loop from {begin:#x} never reaches {end:#x} in word steps")]
    UnterminatedDump {
        /// `begin_signature` address.
        begin: u64,
        /// `end_signature` address.
        end: u64,
    },
    /// A required layout symbol is missing.
    #[error("missing layout symbol `{0}`")]
    MissingSymbol(&'static str),
}
