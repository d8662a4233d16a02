//! Boot sequencer.
//!
//! Runs once, before the test body, with interrupts disabled. Depending on the
//! platform it installs the dispatcher as the trap vector, masks every interrupt
//! source, and brings up the device that carries the signature stream.

use crate::common::ModelError;
use crate::common::constants::{UART_CTRL_EN, UART_CTRL_SIM_MODE, UART0_CTRL_ADDR};
use crate::core::Hart;
use crate::core::arch::csr;
use crate::isa::abi;
use crate::model::layout::{MemoryLayout, TRAP_HANDLER};
use crate::soc::DeviceBus;

/// One-time device bring-up: a reset write followed by an enable write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceBringUp {
    /// Control register address.
    pub ctrl_addr: u64,
    /// Value written first to put the device in a known state.
    pub reset_value: u32,
    /// Capability bits OR-ed together and written second.
    pub capabilities: [u32; 2],
}

impl DeviceBringUp {
    /// UART0 in simulation mode: enable (`ctrl[28]`) plus sim mode (`ctrl[12]`).
    pub const UART0_SIM_MODE: Self = Self {
        ctrl_addr: UART0_CTRL_ADDR,
        reset_value: 0,
        capabilities: [UART_CTRL_EN, UART_CTRL_SIM_MODE],
    };

    /// The value of the enable write.
    pub const fn enable_value(&self) -> u32 {
        self.capabilities[0] | self.capabilities[1]
    }
}

/// What the boot hook did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BootReport {
    /// Address installed in `mtvec`, if the platform installs one.
    pub trap_vector: Option<u64>,
    /// Whether a device bring-up sequence ran.
    pub device_enabled: bool,
}

/// Points `mtvec` at the dispatcher and clears `mie`.
///
/// The handler address is loaded into `ra` first, exactly as the boot code
/// materializes it before the `csrw`.
///
/// # Errors
///
/// Returns [`ModelError::MissingSymbol`] if the layout has no dispatcher entry, or
/// [`ModelError::MisalignedTrapVector`] if it is not 4-byte aligned (direct mode
/// needs the low two bits of `mtvec` clear).
pub fn install_trap_vector(hart: &mut Hart, layout: &MemoryLayout) -> Result<u64, ModelError> {
    let entry = layout
        .trap_entry
        .ok_or(ModelError::MissingSymbol(TRAP_HANDLER))?;
    if entry & csr::MTVEC_MODE_MASK != 0 {
        return Err(ModelError::MisalignedTrapVector(entry));
    }

    hart.write_reg(abi::REG_RA, entry);
    hart.csr_write(csr::MTVEC, entry);
    hart.csr_write(csr::MIE, 0);
    tracing::debug!(mtvec = format_args!("{entry:#x}"), "trap vector installed, mie cleared");
    Ok(entry)
}

/// Writes the reset value, then the combined capability bits, to the device.
///
/// # Errors
///
/// Returns [`ModelError::Bus`] if the control register is not mapped.
pub fn bring_up_device<B>(bus: &mut B, bring_up: &DeviceBringUp) -> Result<(), ModelError>
where
    B: DeviceBus + ?Sized,
{
    bus.write_u32(bring_up.ctrl_addr, bring_up.reset_value)?;
    bus.write_u32(bring_up.ctrl_addr, bring_up.enable_value())?;
    tracing::debug!(
        ctrl = format_args!("{:#x}", bring_up.ctrl_addr),
        value = format_args!("{:#010x}", bring_up.enable_value()),
        "device enabled"
    );
    Ok(())
}
