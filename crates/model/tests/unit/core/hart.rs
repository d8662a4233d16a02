//! # Hart Trap Entry and Return Tests
//!
//! Covers the hardware half of a trap: the CSR updates before the dispatcher
//! runs, and the `mret` that ends it.

use pretty_assertions::assert_eq;
use rvmodel_core::Hart;
use rvmodel_core::common::{Trap, Xlen};
use rvmodel_core::core::arch::csr;
use rvmodel_core::isa::abi;

fn hart_with_vector(xlen: Xlen) -> Hart {
    let mut hart = Hart::new(xlen, 0x8000_0000);
    hart.csr_write(csr::MTVEC, 0x100);
    hart
}

#[test]
fn test_reset_state() {
    let hart = Hart::new(Xlen::Rv32, 0x1_0000_0040);
    assert_eq!(hart.pc, 0x40);
    assert_eq!(hart.regs.snapshot(), [0; 32]);
    assert_eq!(hart.csr_read(csr::MTVEC), 0);
}

#[test]
fn test_x0_hardwired() {
    let mut hart = Hart::new(Xlen::Rv32, 0);
    hart.write_reg(abi::REG_ZERO, 0xDEAD);
    assert_eq!(hart.read_reg(abi::REG_ZERO), 0);
}

#[test]
fn test_rv32_writes_truncate() {
    let mut hart = Hart::new(Xlen::Rv32, 0);
    hart.write_reg(abi::REG_A0, 0x1_2345_6789);
    hart.csr_write(csr::MSCRATCH, u64::MAX);
    assert_eq!(hart.read_reg(abi::REG_A0), 0x2345_6789);
    assert_eq!(hart.csr_read(csr::MSCRATCH), 0xFFFF_FFFF);
}

#[test]
fn test_take_trap_records_cause_and_jumps() {
    let mut hart = hart_with_vector(Xlen::Rv32);
    hart.pc = 0x8000_0010;
    hart.take_trap(Trap::IllegalInstruction(0xFFFF_FFFF));

    assert_eq!(hart.pc, 0x100);
    assert_eq!(hart.csr_read(csr::MEPC), 0x8000_0010);
    assert_eq!(hart.csr_read(csr::MCAUSE), 2);
    assert_eq!(hart.csr_read(csr::MTVAL), 0xFFFF_FFFF);
}

#[test]
fn test_take_trap_with_explicit_tval() {
    let mut hart = hart_with_vector(Xlen::Rv32);
    hart.pc = 0x8000_0010;
    hart.take_trap_with_tval(Trap::Breakpoint(0x8000_0010), 0);

    assert_eq!(hart.csr_read(csr::MCAUSE), 3);
    assert_eq!(hart.csr_read(csr::MTVAL), 0);

    hart.take_trap_with_tval(Trap::LoadAccessFault(0), 0x1_2345_6789);
    assert_eq!(hart.csr_read(csr::MTVAL), 0x2345_6789);
}

#[test]
fn test_take_trap_ignores_mode_bits_of_mtvec() {
    let mut hart = Hart::new(Xlen::Rv32, 0);
    hart.csr_write(csr::MTVEC, 0x201);
    hart.take_trap(Trap::MachineTimerInterrupt);
    assert_eq!(hart.pc, 0x200);
}

#[test]
fn test_trap_stacks_and_mret_restores_mie() {
    let mut hart = hart_with_vector(Xlen::Rv64);
    hart.csr_write(csr::MSTATUS, csr::MSTATUS_MIE);
    hart.pc = 0x8000_0020;

    hart.take_trap(Trap::MachineSoftwareInterrupt);
    assert!(!hart.interrupts_enabled());
    assert_ne!(hart.csr_read(csr::MSTATUS) & csr::MSTATUS_MPIE, 0);
    assert_eq!(hart.csr_read(csr::MCAUSE), (1 << 63) | 3);

    hart.mret();
    assert!(hart.interrupts_enabled());
    assert_eq!(hart.pc, 0x8000_0020);
}

#[test]
fn test_mret_with_interrupts_disabled_before_trap() {
    let mut hart = hart_with_vector(Xlen::Rv32);
    hart.pc = 0x8000_0000;
    hart.take_trap(Trap::Breakpoint(0x8000_0000));
    hart.mret();
    assert!(!hart.interrupts_enabled());
}
