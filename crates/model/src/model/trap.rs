//! Trap dispatcher.
//!
//! Every synchronous exception and interrupt the test provokes lands here. The
//! handler works with two scratch registers (`s0`, `s1`) whose live values are
//! parked in a private two-slot area just past the signature, and with the
//! interrupted `sp` parked in `mscratch`:
//! 1. **Interrupts:** `mcause` has its top bit set. Nothing is skipped; the handler
//!    returns and the pending source is expected to be cleared by the test.
//! 2. **Exceptions:** The first halfword at `mepc` decides the instruction length
//!    (low two bits `11` means 32-bit), and `mepc` is advanced past it so the
//!    faulting instruction is not re-executed.
//!
//! The scratch area holds exactly one frame. Entry and exit are expressed as a
//! scoped [`TrapFrame`] that borrows the slot mutably, so a second entry while a
//! frame is live does not type-check; a frame leaked past its scope is caught at
//! runtime with [`ModelError::NestedTrap`].

use crate::common::{ModelError, Xlen};
use crate::core::Hart;
use crate::core::arch::csr;
use crate::isa::{abi, rvc};
use crate::model::layout::MemoryLayout;
use crate::soc::DeviceBus;

/// The dispatcher's private save area: one XLEN slot each for `s0` and `s1`.
#[derive(Debug)]
pub struct ScratchSlot {
    base: u64,
    holder: Option<u64>,
}

impl ScratchSlot {
    /// Creates an empty slot at `base`.
    pub const fn new(base: u64) -> Self {
        Self { base, holder: None }
    }

    /// Address of the `s0` save slot; `s1` follows one XLEN word later.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Returns `true` while a frame owns the slot.
    pub const fn is_held(&self) -> bool {
        self.holder.is_some()
    }

    /// `mcause` of the trap currently owning the slot.
    pub const fn holder(&self) -> Option<u64> {
        self.holder
    }
}

/// A live trap frame: `s0`/`s1` saved, `sp` pointing at the scratch area.
///
/// Dropping a frame without calling [`TrapFrame::exit`] releases the slot but
/// leaves the hart in handler context.
#[derive(Debug)]
pub struct TrapFrame<'slot> {
    slot: &'slot mut ScratchSlot,
    xlen: Xlen,
}

impl<'slot> TrapFrame<'slot> {
    /// Handler prologue: park `sp` in `mscratch`, point `sp` at the scratch
    /// area, and save `s0` then `s1`.
    ///
    /// The saves happen before any register is touched, so a bus failure leaves
    /// the hart as the trap found it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NestedTrap`] if the slot is still held, or
    /// [`ModelError::Bus`] if a save faults.
    pub fn enter<B>(slot: &'slot mut ScratchSlot, hart: &mut Hart, bus: &mut B) -> Result<Self, ModelError>
    where
        B: DeviceBus + ?Sized,
    {
        let mcause = hart.csr_read(csr::MCAUSE);
        if slot.is_held() {
            return Err(ModelError::NestedTrap(mcause));
        }

        let xlen = hart.xlen();
        let base = slot.base;
        bus.write_xlen(base, xlen, hart.read_reg(abi::REG_S0))?;
        bus.write_xlen(base.wrapping_add(xlen.bytes()), xlen, hart.read_reg(abi::REG_S1))?;

        hart.csr_write(csr::MSCRATCH, hart.read_reg(abi::REG_SP));
        hart.write_reg(abi::REG_SP, base);
        slot.holder = Some(mcause);
        Ok(Self { slot, xlen })
    }

    /// Address of the save area this frame owns.
    pub const fn base(&self) -> u64 {
        self.slot.base
    }

    /// Handler epilogue: reload `s0` and `s1` from their own slots, restore `sp`
    /// from `mscratch`, and `mret`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Bus`] if a reload faults. The slot is released either way.
    pub fn exit<B>(self, hart: &mut Hart, bus: &mut B) -> Result<(), ModelError>
    where
        B: DeviceBus + ?Sized,
    {
        let base = self.slot.base;
        let s0 = bus.read_xlen(base, self.xlen)?;
        let s1 = bus.read_xlen(base.wrapping_add(self.xlen.bytes()), self.xlen)?;
        hart.write_reg(abi::REG_S0, s0);
        hart.write_reg(abi::REG_S1, s1);
        hart.write_reg(abi::REG_SP, hart.csr_read(csr::MSCRATCH));
        hart.mret();
        Ok(())
    }
}

impl Drop for TrapFrame<'_> {
    fn drop(&mut self) {
        self.slot.holder = None;
    }
}

/// What the dispatcher did with a trap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapDisposition {
    /// Interrupt; returned to the interrupted instruction unchanged.
    Interrupt,
    /// Exception on a 16-bit instruction; `mepc` advanced by 2.
    SkippedCompressed,
    /// Exception on a 32-bit instruction; `mepc` advanced by 4.
    SkippedFull,
}

impl TrapDisposition {
    /// Bytes added to `mepc`.
    pub const fn skipped_bytes(self) -> u64 {
        match self {
            Self::Interrupt => 0,
            Self::SkippedCompressed => 2,
            Self::SkippedFull => 4,
        }
    }
}

/// Advances `mepc` past the instruction it points at.
///
/// The length comes from the quadrant of the halfword at `mepc`. Uses `s0`/`s1`
/// as temporaries, so it must run inside a [`TrapFrame`].
///
/// # Errors
///
/// Returns [`ModelError::Bus`] if the halfword at `mepc` cannot be read. `mepc`
/// is left alone in that case.
pub fn skip_faulting_instruction<B>(hart: &mut Hart, bus: &mut B) -> Result<TrapDisposition, ModelError>
where
    B: DeviceBus + ?Sized,
{
    let epc = hart.csr_read(csr::MEPC);
    let halfword = bus.read_u16(epc)?;
    hart.write_reg(abi::REG_S1, u64::from(rvc::quadrant(halfword)));

    let len = rvc::instruction_len(halfword);
    let disposition = if len == 2 {
        TrapDisposition::SkippedCompressed
    } else {
        TrapDisposition::SkippedFull
    };
    let next = epc.wrapping_add(len);
    hart.write_reg(abi::REG_S0, next);
    hart.csr_write(csr::MEPC, next);
    Ok(disposition)
}

/// The machine-mode trap handler installed by the boot sequencer.
#[derive(Debug)]
pub struct TrapDispatcher {
    entry: Option<u64>,
    slot: ScratchSlot,
}

impl TrapDispatcher {
    /// Creates a dispatcher whose scratch area follows the layout's signature.
    pub const fn new(layout: &MemoryLayout) -> Self {
        Self {
            entry: layout.trap_entry,
            slot: ScratchSlot::new(layout.trap_scratch_base()),
        }
    }

    /// Handler entry address, if known.
    pub const fn entry(&self) -> Option<u64> {
        self.entry
    }

    /// The scratch slot.
    pub const fn slot(&self) -> &ScratchSlot {
        &self.slot
    }

    /// Returns `true` if a trap delivered to `pc` lands on this handler.
    pub fn owns(&self, pc: u64) -> bool {
        self.entry == Some(pc)
    }

    /// Runs the handler for the trap already recorded in the hart's CSRs.
    ///
    /// On return the hart is back at `mepc` (possibly advanced) with every
    /// general-purpose register as it was at the trap. The epilogue also runs
    /// when the handler body fails, so an error never leaves the hart in
    /// handler context; `mepc` is then unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`TrapFrame::enter`], [`skip_faulting_instruction`] and
    /// [`TrapFrame::exit`] failures.
    pub fn dispatch<B>(&mut self, hart: &mut Hart, bus: &mut B) -> Result<TrapDisposition, ModelError>
    where
        B: DeviceBus + ?Sized,
    {
        let frame = TrapFrame::enter(&mut self.slot, hart, bus)?;

        let mcause = hart.csr_read(csr::MCAUSE);
        hart.write_reg(abi::REG_S0, mcause);
        let body = if mcause & hart.xlen().interrupt_bit() != 0 {
            Ok(TrapDisposition::Interrupt)
        } else {
            skip_faulting_instruction(hart, bus)
        };

        frame.exit(hart, bus)?;
        let disposition = body.inspect_err(|e| {
            tracing::warn!(mcause = format_args!("{mcause:#x}"), error = %e, "trap handler failed");
        })?;
        tracing::trace!(
            mcause = format_args!("{mcause:#x}"),
            ?disposition,
            mepc = format_args!("{:#x}", hart.csr_read(csr::MEPC)),
            "trap dispatched"
        );
        Ok(disposition)
    }
}
