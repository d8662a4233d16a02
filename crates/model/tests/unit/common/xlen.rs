//! # XLEN Tests

use rvmodel_core::common::Xlen;

#[test]
fn test_xlen_widths() {
    assert_eq!(Xlen::Rv32.bits(), 32);
    assert_eq!(Xlen::Rv32.bytes(), 4);
    assert_eq!(Xlen::Rv64.bits(), 64);
    assert_eq!(Xlen::Rv64.bytes(), 8);
}

#[test]
fn test_xlen_masks() {
    assert_eq!(Xlen::Rv32.mask(), 0xFFFF_FFFF);
    assert_eq!(Xlen::Rv64.mask(), u64::MAX);
}

#[test]
fn test_interrupt_bit_is_sign_bit() {
    assert_eq!(Xlen::Rv32.interrupt_bit(), 0x8000_0000);
    assert_eq!(Xlen::Rv64.interrupt_bit(), 0x8000_0000_0000_0000);
}

#[test]
fn test_default_is_rv32() {
    assert_eq!(Xlen::default(), Xlen::Rv32);
    assert_eq!(Xlen::Rv64.to_string(), "RV64");
}
