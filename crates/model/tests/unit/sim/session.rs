//! # Session Lifecycle Tests
//!
//! End-to-end runs: boot, a test body that traps and stimulates, then halt.

use pretty_assertions::assert_eq;
use rvmodel_core::common::constants::{TAG_MSI_CLEAR, TAG_MSI_SET, UART_CTRL_EN, UART_CTRL_SIM_MODE};
use rvmodel_core::common::{ModelError, Trap, Xlen};
use rvmodel_core::core::arch::csr;
use rvmodel_core::model::{Stimulus, TrapDisposition};
use rvmodel_core::sim::{Phase, Signature, TrapOutcome};
use rvmodel_core::soc::{DeviceBus, SimEvent};
use rvmodel_core::PlatformKind;

use crate::common::harness::{self, HANDLER, SIG_BEGIN, TEST_PC};

#[test]
fn test_neorv32_full_run() {
    let (mut session, monitor) = harness::session(PlatformKind::Neorv32, Xlen::Rv32, harness::layout(20));
    assert_eq!(session.phase(), Phase::Reset);
    session.hart_mut().csr_write(csr::MIE, csr::MIE_MSIE);

    session.boot().unwrap();
    assert_eq!(session.hart().csr_read(csr::MTVEC), HANDLER);
    assert_eq!(session.hart().csr_read(csr::MIE), 0);

    // Test body: an illegal instruction, then a software interrupt round trip.
    session.bus_mut().write_u32(TEST_PC, 0xFFFF_FFFF).unwrap();
    let outcome = session.raise(Trap::IllegalInstruction(0xFFFF_FFFF)).unwrap();
    assert_eq!(outcome, TrapOutcome::Handled(TrapDisposition::SkippedFull));

    session.stimulate(Stimulus::SetSoftware).unwrap();
    session.hart_mut().csr_write(csr::MIE, csr::MIE_MSIE);
    session.raise(Trap::MachineSoftwareInterrupt).unwrap();
    session.stimulate(Stimulus::ClearSoftware).unwrap();
    assert_eq!(session.hart().pc, TEST_PC + 4);

    harness::fill_words(session.bus_mut(), SIG_BEGIN, &[1, 2, 3, 4, 5]);
    session.halt().unwrap();

    assert_eq!(
        monitor.events(),
        [
            SimEvent::UartControl(0),
            SimEvent::UartControl(UART_CTRL_EN | UART_CTRL_SIM_MODE),
            SimEvent::Doorbell(TAG_MSI_SET),
            SimEvent::Doorbell(TAG_MSI_CLEAR),
            SimEvent::SignatureWord(1),
            SimEvent::SignatureWord(2),
            SimEvent::SignatureWord(3),
            SimEvent::SignatureWord(4),
            SimEvent::SignatureWord(5),
            SimEvent::SignatureWord(0),
            SimEvent::SignatureWord(0),
            SimEvent::SignatureWord(0),
            SimEvent::Terminate,
        ]
    );
    assert_eq!(
        Signature::from_monitor(&monitor).to_string(),
        "00000001\n00000002\n00000003\n00000004\n00000005\n00000000\n00000000\n00000000\n"
    );

    let stats = session.stats();
    assert_eq!(stats.traps_taken, 2);
    assert_eq!(stats.stimuli_requested, 2);
    assert_eq!(stats.signature_words, 5);
    assert_eq!(stats.padding_words, 3);
}

#[test]
fn test_streamed_signature_matches_memory() {
    let (mut session, monitor) = harness::booted(PlatformKind::Neorv32, Xlen::Rv32, harness::layout(28));
    harness::fill_words(session.bus_mut(), SIG_BEGIN, &[7; 7]);
    let region = session.layout().signature;

    session.halt().unwrap();

    let streamed = Signature::from_monitor(&monitor);
    let memory = Signature::read_region(session.bus_mut(), region).unwrap();
    assert!(streamed.starts_with(&memory));
    assert_eq!(streamed.len(), 8);
}

#[test]
fn test_hooks_require_boot() {
    let (mut session, _) = harness::session(PlatformKind::Testbench, Xlen::Rv32, harness::layout(16));
    assert!(matches!(session.raise(Trap::Breakpoint(0)), Err(ModelError::NotBooted)));
    assert_eq!(session.stats().traps_taken, 0);
}

#[test]
fn test_boot_after_halt() {
    let (mut session, _) = harness::booted(PlatformKind::SailCSim, Xlen::Rv32, harness::layout(0));
    session.halt().unwrap();
    assert!(matches!(session.boot(), Err(ModelError::Halted)));
}

#[test]
fn test_into_parts_returns_bus() {
    let (mut session, _) = harness::booted(PlatformKind::Testbench, Xlen::Rv64, harness::layout(8));
    session.bus_mut().write_u32(SIG_BEGIN, 42).unwrap();
    let (hart, mut bus) = session.into_parts();
    assert_eq!(hart.xlen(), Xlen::Rv64);
    assert_eq!(bus.read_u32(SIG_BEGIN).unwrap(), 42);
}
