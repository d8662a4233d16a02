//! Trap causes delivered to the hart.
//!
//! A compliance test enters the trap dispatcher through one of these events. The
//! dispatcher never looks at anything but the encoded `mcause`, so the variants
//! carry just enough to fill `mcause` and `mtval` the way the hardware would.

use std::fmt;

use crate::common::Xlen;
use crate::isa::privileged::cause::{exception, interrupt};

/// RISC-V trap types reachable in machine mode on the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Instruction address misaligned; carries the target address.
    InstructionAddressMisaligned(u64),
    /// Instruction access fault; carries the faulting address.
    InstructionAccessFault(u64),
    /// Illegal or reserved instruction; carries the instruction bits.
    IllegalInstruction(u32),
    /// `ebreak` or hardware breakpoint; carries the program counter.
    Breakpoint(u64),
    /// Load address misaligned; carries the address.
    LoadAddressMisaligned(u64),
    /// Load access fault; carries the address.
    LoadAccessFault(u64),
    /// Store/AMO address misaligned; carries the address.
    StoreAddressMisaligned(u64),
    /// Store/AMO access fault; carries the address.
    StoreAccessFault(u64),
    /// `ecall` from machine mode.
    EnvironmentCallFromMMode,
    /// Machine software interrupt.
    MachineSoftwareInterrupt,
    /// Machine timer interrupt.
    MachineTimerInterrupt,
    /// Machine external interrupt.
    MachineExternalInterrupt,
}

impl Trap {
    /// Returns `true` for asynchronous interrupts.
    pub const fn is_interrupt(&self) -> bool {
        matches!(
            self,
            Self::MachineSoftwareInterrupt
                | Self::MachineTimerInterrupt
                | Self::MachineExternalInterrupt
        )
    }

    /// Exception or interrupt code without the interrupt flag.
    pub const fn code(&self) -> u64 {
        match self {
            Self::InstructionAddressMisaligned(_) => exception::INSTRUCTION_ADDRESS_MISALIGNED,
            Self::InstructionAccessFault(_) => exception::INSTRUCTION_ACCESS_FAULT,
            Self::IllegalInstruction(_) => exception::ILLEGAL_INSTRUCTION,
            Self::Breakpoint(_) => exception::BREAKPOINT,
            Self::LoadAddressMisaligned(_) => exception::LOAD_ADDRESS_MISALIGNED,
            Self::LoadAccessFault(_) => exception::LOAD_ACCESS_FAULT,
            Self::StoreAddressMisaligned(_) => exception::STORE_ADDRESS_MISALIGNED,
            Self::StoreAccessFault(_) => exception::STORE_ACCESS_FAULT,
            Self::EnvironmentCallFromMMode => exception::ENVIRONMENT_CALL_FROM_M_MODE,
            Self::MachineSoftwareInterrupt => interrupt::MACHINE_SOFTWARE,
            Self::MachineTimerInterrupt => interrupt::MACHINE_TIMER,
            Self::MachineExternalInterrupt => interrupt::MACHINE_EXTERNAL,
        }
    }

    /// Encodes the trap as an `mcause` value for the given register width.
    pub const fn mcause(&self, xlen: Xlen) -> u64 {
        if self.is_interrupt() {
            xlen.interrupt_bit() | self.code()
        } else {
            self.code()
        }
    }

    /// Value the hardware places in `mtval` for this trap.
    pub const fn tval(&self) -> u64 {
        match self {
            Self::InstructionAddressMisaligned(a)
            | Self::InstructionAccessFault(a)
            | Self::Breakpoint(a)
            | Self::LoadAddressMisaligned(a)
            | Self::LoadAccessFault(a)
            | Self::StoreAddressMisaligned(a)
            | Self::StoreAccessFault(a) => *a,
            Self::IllegalInstruction(inst) => *inst as u64,
            _ => 0,
        }
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstructionAddressMisaligned(addr) => {
                write!(f, "InstructionAddressMisaligned({addr:#x})")
            }
            Self::InstructionAccessFault(addr) => write!(f, "InstructionAccessFault({addr:#x})"),
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({inst:#x})"),
            Self::Breakpoint(pc) => write!(f, "Breakpoint({pc:#x})"),
            Self::LoadAddressMisaligned(addr) => write!(f, "LoadAddressMisaligned({addr:#x})"),
            Self::LoadAccessFault(addr) => write!(f, "LoadAccessFault({addr:#x})"),
            Self::StoreAddressMisaligned(addr) => write!(f, "StoreAddressMisaligned({addr:#x})"),
            Self::StoreAccessFault(addr) => write!(f, "StoreAccessFault({addr:#x})"),
            Self::EnvironmentCallFromMMode => write!(f, "EnvironmentCallFromMMode"),
            Self::MachineSoftwareInterrupt => write!(f, "MachineSoftwareInterrupt"),
            Self::MachineTimerInterrupt => write!(f, "MachineTimerInterrupt"),
            Self::MachineExternalInterrupt => write!(f, "MachineExternalInterrupt"),
        }
    }
}
