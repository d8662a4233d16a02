//! # Signature File Tests

use pretty_assertions::assert_eq;
use rvmodel_core::sim::Signature;
use rvmodel_core::soc::{SimEvent, SimMonitor};

#[test]
fn test_reference_format() {
    let signature = Signature::from_words(vec![1, 0xDEAD_BEEF, 0]);
    assert_eq!(signature.to_string(), "00000001\ndeadbeef\n00000000\n");
}

#[test]
fn test_file_name() {
    assert_eq!(Signature::file_name("neorv32"), "DUT-neorv32.signature");
}

#[test]
fn test_from_monitor_keeps_only_signature_words() {
    let monitor = SimMonitor::new();
    monitor.record(SimEvent::UartControl(0));
    monitor.record(SimEvent::SignatureWord(5));
    monitor.record(SimEvent::Doorbell(0x1111_1111));
    monitor.record(SimEvent::SignatureWord(6));
    monitor.record(SimEvent::Terminate);

    let signature = Signature::from_monitor(&monitor);
    assert_eq!(signature.words(), [5, 6]);
    assert_eq!(signature.len(), 2);
}

#[test]
fn test_prefix_comparison() {
    let streamed = Signature::from_words(vec![1, 2, 0, 0]);
    assert!(streamed.starts_with(&Signature::from_words(vec![1, 2])));
    assert!(!streamed.starts_with(&Signature::from_words(vec![2])));
    assert!(Signature::default().is_empty());
}

#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(Signature::file_name("testbench"));

    Signature::from_words(vec![0xCAFE_F00D, 7]).write_to(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "cafef00d\n00000007\n");
}
