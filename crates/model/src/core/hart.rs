//! Hart state and privileged control transfer.
//!
//! The target runs everything in machine mode, so the hart only models the
//! M-mode half of trap entry and `mret`:
//! 1. **Trap entry:** Records `mepc`/`mcause`/`mtval`, stacks `MIE` into `MPIE`,
//!    and jumps to the direct-mode vector.
//! 2. **Return:** `mret` restores `MIE` from `MPIE` and resumes at `mepc`.
//! 3. **Width:** Every register and CSR write is truncated to XLEN.

use crate::common::{Trap, Xlen};
use crate::core::arch::csr;
use crate::core::arch::{Csrs, Gpr};

/// Architectural state of a single machine-mode hart.
#[derive(Clone, Debug)]
pub struct Hart {
    /// Integer register file.
    pub regs: Gpr,
    /// Machine-mode CSRs.
    pub csrs: Csrs,
    /// Program counter.
    pub pc: u64,
    xlen: Xlen,
}

impl Hart {
    /// Creates a hart in its reset state: all registers zero, `pc` at `reset_pc`.
    pub fn new(xlen: Xlen, reset_pc: u64) -> Self {
        Self {
            regs: Gpr::new(),
            csrs: Csrs::default(),
            pc: reset_pc & xlen.mask(),
            xlen,
        }
    }

    /// Register width of this hart.
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    /// Reads an integer register.
    pub fn read_reg(&self, idx: usize) -> u64 {
        self.regs.read(idx)
    }

    /// Writes an integer register, truncated to XLEN.
    pub fn write_reg(&mut self, idx: usize, val: u64) {
        self.regs.write(idx, val & self.xlen.mask());
    }

    /// `csrr`: reads a CSR.
    pub const fn csr_read(&self, addr: u32) -> u64 {
        self.csrs.read(addr)
    }

    /// `csrw`: writes a CSR, truncated to XLEN.
    pub const fn csr_write(&mut self, addr: u32, val: u64) {
        self.csrs.write(addr, val & self.xlen.mask());
    }

    /// Returns `true` if `mstatus.MIE` is set.
    pub const fn interrupts_enabled(&self) -> bool {
        self.csrs.mstatus & csr::MSTATUS_MIE != 0
    }

    /// Delivers a trap the way the hardware does before any handler code runs.
    ///
    /// `mepc` receives the current `pc`; control moves to the base of `mtvec`.
    /// Vectored mode is not used by the target, so interrupts land on the base too.
    pub fn take_trap(&mut self, trap: Trap) {
        self.take_trap_with_tval(trap, trap.tval());
    }

    /// Same as [`Self::take_trap`], but writes `tval` to `mtval` instead of the
    /// architectural default. Cores may zero `mtval` for some causes.
    pub fn take_trap_with_tval(&mut self, trap: Trap, tval: u64) {
        let mask = self.xlen.mask();
        self.csrs.mepc = self.pc & mask & !1;
        self.csrs.mcause = trap.mcause(self.xlen);
        self.csrs.mtval = tval & mask;

        let mut mstatus = self.csrs.mstatus & !(csr::MSTATUS_MPIE | csr::MSTATUS_MPP);
        if self.interrupts_enabled() {
            mstatus |= csr::MSTATUS_MPIE;
        }
        mstatus &= !csr::MSTATUS_MIE;
        mstatus |= csr::MSTATUS_MPP;
        self.csrs.mstatus = mstatus;

        self.pc = self.csrs.mtvec & !csr::MTVEC_MODE_MASK;
        tracing::debug!(%trap, mepc = format_args!("{:#x}", self.csrs.mepc), "trap taken");
    }

    /// Executes `mret`: resumes at `mepc` with `MIE` restored from `MPIE`.
    pub const fn mret(&mut self) {
        self.pc = self.csrs.mepc & !1;
        let mstatus = self.csrs.mstatus;
        let mut new_mstatus = if mstatus & csr::MSTATUS_MPIE != 0 {
            mstatus | csr::MSTATUS_MIE
        } else {
            mstatus & !csr::MSTATUS_MIE
        };
        new_mstatus |= csr::MSTATUS_MPIE;
        self.csrs.mstatus = new_mstatus;
    }
}
