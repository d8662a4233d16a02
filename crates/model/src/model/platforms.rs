//! The supported target platforms.
//!
//! | Platform    | Boot                          | Output port   | Dump loop   | Padding | Stimuli        |
//! |-------------|-------------------------------|---------------|-------------|---------|----------------|
//! | `neorv32`   | `mtvec`, `mie`, UART sim mode | UART0 data    | equality    | 16 B    | msw, mext, mtimer clear |
//! | `testbench` | none                          | sim signature | at-or-past  | none    | msw, mext      |
//! | `sail-c-sim`| none                          | sim signature | equality    | none    | none           |
//!
//! NEORV32 writes zero to `mtval` on `ebreak`, so breakpoints are dropped from
//! the relocatable-`mtval` causes there. The Sail harness runs the same test
//! builds and drops them too.

use crate::common::{ModelError, Trap};
use crate::common::constants::{
    SIGNATURE_PAD_BOUNDARY, SIM_CONTROL_ADDR, SIM_SIGNATURE_ADDR, TAG_MEI_CLEAR, TAG_MEI_SET,
    TAG_MSI_CLEAR, TAG_MSI_SET, TERMINATE_MAGIC, TIMER_COMPARE_ADDR, TIMER_COMPARE_DISABLE,
    UART0_DATA_ADDR,
};
use crate::core::Hart;
use crate::isa::privileged::cause::exception;
use crate::model::TargetModel;
use crate::model::boot::{self, BootReport, DeviceBringUp};
use crate::model::halt::{DumpProfile, DumpTermination, MmioWrite};
use crate::model::layout::MemoryLayout;
use crate::model::stimulus::Stimulus;
use crate::soc::DeviceBus;

const TERMINATE: MmioWrite = MmioWrite::new(SIM_CONTROL_ADDR, TERMINATE_MAGIC);

const MSI_SET: &[MmioWrite] = &[MmioWrite::new(SIM_CONTROL_ADDR, TAG_MSI_SET)];
const MSI_CLEAR: &[MmioWrite] = &[MmioWrite::new(SIM_CONTROL_ADDR, TAG_MSI_CLEAR)];
const MEI_SET: &[MmioWrite] = &[MmioWrite::new(SIM_CONTROL_ADDR, TAG_MEI_SET)];
const MEI_CLEAR: &[MmioWrite] = &[MmioWrite::new(SIM_CONTROL_ADDR, TAG_MEI_CLEAR)];

// High word first so the compare never passes through a value below `mtime`.
const MTI_CLEAR: &[MmioWrite] = &[
    MmioWrite::new(TIMER_COMPARE_ADDR + 4, TIMER_COMPARE_DISABLE),
    MmioWrite::new(TIMER_COMPARE_ADDR, TIMER_COMPARE_DISABLE),
];

const TVAL_MASK_WITHOUT_BREAKPOINT: u64 =
    exception::RELOCATABLE_TVAL_MASK & !(1 << exception::BREAKPOINT);

const fn doorbell_stimulus(stimulus: Stimulus) -> &'static [MmioWrite] {
    match stimulus {
        Stimulus::SetSoftware => MSI_SET,
        Stimulus::ClearSoftware => MSI_CLEAR,
        Stimulus::SetExternal => MEI_SET,
        Stimulus::ClearExternal => MEI_CLEAR,
        Stimulus::SetTimer | Stimulus::ClearTimer => &[],
    }
}

/// NEORV32 processor testbench: signature over the simulation-mode UART.
#[derive(Clone, Copy, Debug, Default)]
pub struct Neorv32;

impl TargetModel for Neorv32 {
    fn name(&self) -> &'static str {
        "neorv32"
    }

    fn boot(
        &self,
        hart: &mut Hart,
        bus: &mut dyn DeviceBus,
        layout: &MemoryLayout,
    ) -> Result<BootReport, ModelError> {
        let vector = boot::install_trap_vector(hart, layout)?;
        boot::bring_up_device(bus, &DeviceBringUp::UART0_SIM_MODE)?;
        Ok(BootReport {
            trap_vector: Some(vector),
            device_enabled: true,
        })
    }

    fn dump_profile(&self) -> DumpProfile {
        DumpProfile {
            output_addr: UART0_DATA_ADDR,
            termination: DumpTermination::UntilEqual,
            pad_to: Some(SIGNATURE_PAD_BOUNDARY),
            terminate: TERMINATE,
        }
    }

    fn stimulus_writes(&self, stimulus: Stimulus) -> &'static [MmioWrite] {
        match stimulus {
            Stimulus::ClearTimer => MTI_CLEAR,
            other => doorbell_stimulus(other),
        }
    }

    fn trap_value(&self, trap: Trap) -> u64 {
        match trap {
            Trap::Breakpoint(_) => 0,
            other => other.tval(),
        }
    }

    fn relocatable_tval_mask(&self) -> u64 {
        TVAL_MASK_WITHOUT_BREAKPOINT
    }
}

/// Generic HDL testbench with a dedicated signature port.
#[derive(Clone, Copy, Debug, Default)]
pub struct Testbench;

impl TargetModel for Testbench {
    fn name(&self) -> &'static str {
        "testbench"
    }

    fn dump_profile(&self) -> DumpProfile {
        DumpProfile {
            output_addr: SIM_SIGNATURE_ADDR,
            termination: DumpTermination::UntilAtOrPast,
            pad_to: None,
            terminate: TERMINATE,
        }
    }

    fn stimulus_writes(&self, stimulus: Stimulus) -> &'static [MmioWrite] {
        doorbell_stimulus(stimulus)
    }
}

/// Instruction-set simulator harness. It cannot drive interrupt lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct SailCSim;

impl TargetModel for SailCSim {
    fn name(&self) -> &'static str {
        "sail-c-sim"
    }

    fn dump_profile(&self) -> DumpProfile {
        DumpProfile {
            output_addr: SIM_SIGNATURE_ADDR,
            termination: DumpTermination::UntilEqual,
            pad_to: None,
            terminate: TERMINATE,
        }
    }

    fn relocatable_tval_mask(&self) -> u64 {
        TVAL_MASK_WITHOUT_BREAKPOINT
    }

    fn march_extensions(&self) -> &'static str {
        "imfdc"
    }
}
