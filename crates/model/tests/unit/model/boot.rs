//! # Boot Sequencer Tests

use mockall::Sequence;
use mockall::predicate::eq;
use rvmodel_core::common::constants::{UART_CTRL_EN, UART_CTRL_SIM_MODE, UART0_CTRL_ADDR};
use rvmodel_core::common::{ModelError, Xlen};
use rvmodel_core::core::arch::csr;
use rvmodel_core::isa::abi;
use rvmodel_core::model::boot::{self, DeviceBringUp};
use rvmodel_core::model::layout::TRAP_HANDLER;
use rvmodel_core::model::{MemoryLayout, SignatureRegion};
use rvmodel_core::sim::Phase;
use rvmodel_core::soc::SimEvent;
use rvmodel_core::{Hart, PlatformKind};

use crate::common::harness::{self, HANDLER};
use crate::common::mocks::bus::MockBus;

#[test]
fn test_neorv32_boot_installs_vector_and_masks_interrupts() {
    let (mut session, monitor) = harness::session(PlatformKind::Neorv32, Xlen::Rv32, harness::layout(16));
    session.hart_mut().csr_write(csr::MIE, csr::MIE_MSIE | csr::MIE_MTIE | csr::MIE_MEIE);
    session.hart_mut().csr_write(csr::MTVEC, 0xDEAD_BEEC);

    let report = session.boot().unwrap();

    assert_eq!(report.trap_vector, Some(HANDLER));
    assert!(report.device_enabled);
    assert_eq!(session.hart().csr_read(csr::MTVEC), HANDLER);
    assert_eq!(session.hart().csr_read(csr::MIE), 0);
    assert_eq!(session.hart().read_reg(abi::REG_RA), HANDLER);
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(
        monitor.events(),
        [
            SimEvent::UartControl(0),
            SimEvent::UartControl(UART_CTRL_EN | UART_CTRL_SIM_MODE),
        ]
    );
}

#[test]
fn test_boot_leaves_test_state_alone() {
    let (mut session, _) = harness::session(PlatformKind::Neorv32, Xlen::Rv32, harness::layout(16));
    session.hart_mut().write_reg(abi::REG_A0, 0x1234);
    session.hart_mut().csr_write(csr::MSTATUS, csr::MSTATUS_MIE);
    let pc = session.hart().pc;

    session.boot().unwrap();

    assert_eq!(session.hart().read_reg(abi::REG_A0), 0x1234);
    assert_eq!(session.hart().csr_read(csr::MSTATUS), csr::MSTATUS_MIE);
    assert_eq!(session.hart().pc, pc);
}

#[test]
fn test_bring_up_writes_reset_then_enable() {
    let mut bus = MockBus::new();
    let mut seq = Sequence::new();
    bus.expect_write_u32()
        .with(eq(UART0_CTRL_ADDR), eq(0))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    bus.expect_write_u32()
        .with(eq(UART0_CTRL_ADDR), eq(UART_CTRL_EN | UART_CTRL_SIM_MODE))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    boot::bring_up_device(&mut bus, &DeviceBringUp::UART0_SIM_MODE).unwrap();
}

#[test]
fn test_misaligned_vector_rejected() {
    let region = SignatureRegion::new(0x8000_1000, 0x8000_1010).unwrap();
    let layout = MemoryLayout::new(region, Some(0x102));
    let mut hart = Hart::new(Xlen::Rv32, 0);

    let err = boot::install_trap_vector(&mut hart, &layout).unwrap_err();
    assert!(matches!(err, ModelError::MisalignedTrapVector(0x102)));
    assert_eq!(hart.csr_read(csr::MTVEC), 0);
}

#[test]
fn test_missing_vector_fails_boot_and_stays_in_reset() {
    let region = SignatureRegion::new(harness::SIG_BEGIN, harness::SIG_BEGIN + 16).unwrap();
    let (mut session, monitor) =
        harness::session(PlatformKind::Neorv32, Xlen::Rv32, MemoryLayout::new(region, None));

    let err = session.boot().unwrap_err();
    assert!(matches!(err, ModelError::MissingSymbol(name) if name == TRAP_HANDLER));
    assert_eq!(session.phase(), Phase::Reset);
    assert!(monitor.events().is_empty());
}

#[test]
fn test_noop_boot_platforms() {
    for platform in [PlatformKind::Testbench, PlatformKind::SailCSim] {
        let (mut session, monitor) = harness::session(platform, Xlen::Rv32, harness::layout(16));
        session.hart_mut().csr_write(csr::MIE, csr::MIE_MEIE);

        let report = session.boot().unwrap();

        assert_eq!(report.trap_vector, None);
        assert!(!report.device_enabled);
        assert_eq!(session.hart().csr_read(csr::MIE), csr::MIE_MEIE);
        assert_eq!(session.hart().csr_read(csr::MTVEC), 0);
        assert!(monitor.events().is_empty(), "{platform}");
    }
}

#[test]
fn test_boot_runs_once() {
    let (mut session, _) = harness::booted(PlatformKind::Neorv32, Xlen::Rv32, harness::layout(16));
    assert!(matches!(session.boot(), Err(ModelError::AlreadyBooted)));
}
