//! Target model hooks.
//!
//! A target model adapts the architectural test suite to one platform. It
//! provides four hooks, each defined as a fixed sequence of register and MMIO
//! operations:
//! 1. **Boot:** [`TargetModel::boot`] runs once before the test body.
//! 2. **Trap:** [`trap::TrapDispatcher`] handles every trap taken while the test runs.
//! 3. **Stimulus:** [`TargetModel::stimulate`] raises or lowers interrupt sources.
//! 4. **Halt:** [`TargetModel::halt`] streams the signature out and stops the simulator.
//!
//! The trap dispatcher is shared by every platform; the other hooks vary per
//! [`PlatformKind`].

/// Boot sequencer.
pub mod boot;
/// Signature dumper and termination doorbell.
pub mod halt;
/// Symbol contract between the test image and the hooks.
pub mod layout;
/// Per-platform hook implementations.
pub mod platforms;
/// Interrupt stimulus emitter.
pub mod stimulus;
/// Compiler flags for building tests against a platform.
pub mod toolchain;
/// Trap dispatcher.
pub mod trap;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::{ModelError, Trap};
use crate::core::Hart;
use crate::isa::privileged::cause::exception;
use crate::soc::DeviceBus;

pub use self::boot::BootReport;
pub use self::halt::{DumpProfile, DumpReport, DumpTermination, MmioWrite};
pub use self::layout::{MemoryLayout, SignatureRegion};
pub use self::platforms::{Neorv32, SailCSim, Testbench};
pub use self::stimulus::Stimulus;
pub use self::toolchain::CompileFlags;
pub use self::trap::{TrapDispatcher, TrapDisposition, TrapFrame};

/// Hooks a platform supplies to the test suite.
///
/// Only [`name`](Self::name) and [`dump_profile`](Self::dump_profile) are
/// required; the defaults describe a platform with no boot work and no
/// interrupt doorbells.
pub trait TargetModel: fmt::Debug + Send + Sync {
    /// Platform name, used for logs and the signature file name.
    fn name(&self) -> &'static str;

    /// How the signature leaves the hart.
    fn dump_profile(&self) -> DumpProfile;

    /// Stores that implement `stimulus`; empty if the platform cannot drive it.
    fn stimulus_writes(&self, _stimulus: Stimulus) -> &'static [MmioWrite] {
        &[]
    }

    /// `mtval` the core writes when it takes `trap`.
    fn trap_value(&self, trap: Trap) -> u64 {
        trap.tval()
    }

    /// Exception causes whose `mtval` the test relocates and records, one bit
    /// per cause code.
    fn relocatable_tval_mask(&self) -> u64 {
        exception::RELOCATABLE_TVAL_MASK
    }

    /// Single-letter extensions tests are built with, in `-march` order.
    fn march_extensions(&self) -> &'static str {
        "imc"
    }

    /// Runs the boot sequence.
    ///
    /// # Errors
    ///
    /// Fails if the layout cannot support the platform's trap vector or a
    /// bring-up store faults.
    fn boot(
        &self,
        _hart: &mut Hart,
        _bus: &mut dyn DeviceBus,
        _layout: &MemoryLayout,
    ) -> Result<BootReport, ModelError> {
        Ok(BootReport::default())
    }

    /// Emits the stores for `stimulus`, returning how many were issued.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Bus`] if a store faults.
    fn stimulate(&self, bus: &mut dyn DeviceBus, stimulus: Stimulus) -> Result<usize, ModelError> {
        stimulus::emit(bus, self.stimulus_writes(stimulus))
    }

    /// Dumps the signature and rings the termination doorbell.
    ///
    /// # Errors
    ///
    /// See [`halt::halt`].
    fn halt(&self, bus: &mut dyn DeviceBus, layout: &MemoryLayout) -> Result<DumpReport, ModelError> {
        halt::halt(bus, layout.signature, &self.dump_profile())
    }
}

/// Selects one of the built-in platforms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformKind {
    /// [`Neorv32`].
    #[default]
    Neorv32,
    /// [`Testbench`].
    Testbench,
    /// [`SailCSim`].
    #[serde(alias = "sail_cSim")]
    SailCSim,
}

impl PlatformKind {
    /// Every platform.
    pub const ALL: [Self; 3] = [Self::Neorv32, Self::Testbench, Self::SailCSim];

    /// Instantiates the platform's hooks.
    pub fn model(self) -> Box<dyn TargetModel> {
        match self {
            Self::Neorv32 => Box::new(Neorv32),
            Self::Testbench => Box::new(Testbench),
            Self::SailCSim => Box::new(SailCSim),
        }
    }

    /// Canonical name, matching [`TargetModel::name`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neorv32 => "neorv32",
            Self::Testbench => "testbench",
            Self::SailCSim => "sail-c-sim",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown platform '{s}' (expected neorv32, testbench or sail-c-sim)")
            })
    }
}
