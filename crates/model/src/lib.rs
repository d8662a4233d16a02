//! RISC-V architectural-test target model.
//!
//! This crate models the platform adaptation layer that lets the RISC-V
//! architectural test suite run on a bare-metal simulation core:
//! 1. **Hooks:** Boot sequencer, trap dispatcher, signature dumper and halt,
//!    and interrupt stimulus emitter, one set per supported platform.
//! 2. **Layout:** The symbol contract between a test image and the hooks.
//! 3. **Hart:** Machine-mode register and CSR state the hooks act on.
//! 4. **SoC:** Interconnect, RAM, and the MMIO devices the hooks write to.
//! 5. **Simulation:** ELF loading, session lifecycle, statistics, and the
//!    signature file consumed by the external checker.

/// Common types and constants (addresses, register width, traps, errors).
pub mod common;
/// Model configuration (platform, memory map, layout fallbacks).
pub mod config;
/// Hart state (GPRs, CSRs, trap entry and return).
pub mod core;
/// Instruction-set facts (ABI registers, cause codes, RVC lengths, ISA strings).
pub mod isa;
/// Target model hooks and platform definitions.
pub mod model;
/// ELF loader, session lifecycle, and signature output.
pub mod sim;
/// System-on-chip (builder, bus, devices, memory, traits).
pub mod soc;
/// Session statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Architectural hart state; construct with `Hart::new`.
pub use crate::core::Hart;
/// Platform selector and the hook trait it instantiates.
pub use crate::model::{PlatformKind, TargetModel};
/// Lifecycle driver for one test run.
pub use crate::sim::Session;
/// Top-level system (bus, devices, monitor); construct with `System::new`.
pub use crate::soc::System;
