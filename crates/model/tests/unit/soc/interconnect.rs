//! # Interconnect Tests

use rvmodel_core::common::{BusError, Xlen};
use rvmodel_core::soc::memory::Memory;
use rvmodel_core::soc::{Bus, DeviceBus, System};
use rvmodel_core::Config;

fn ram_bus() -> Bus {
    let mut bus = Bus::new();
    bus.add_device(Box::new(Memory::new("RAM", 0x8000_0000, 0x1000)));
    bus
}

#[test]
fn test_read_write_word() {
    let mut bus = ram_bus();
    bus.write_u32(0x8000_0010, 0xDEAD_BEEF).unwrap();
    assert_eq!(bus.read_u32(0x8000_0010).unwrap(), 0xDEAD_BEEF);
    assert_eq!(bus.read_u16(0x8000_0010).unwrap(), 0xBEEF);
    assert_eq!(bus.read_u16(0x8000_0012).unwrap(), 0xDEAD);
}

#[test]
fn test_unmapped_access() {
    let mut bus = ram_bus();
    assert_eq!(bus.read_u32(0x1000), Err(BusError::Unmapped(0x1000)));
    assert_eq!(bus.write_u32(0x8000_1000, 0), Err(BusError::Unmapped(0x8000_1000)));
    assert!(!bus.is_valid_address(0x8000_1000));
    assert!(bus.is_valid_address(0x8000_0FFF));
}

#[test]
fn test_misaligned_access() {
    let mut bus = ram_bus();
    assert_eq!(
        bus.read_u32(0x8000_0002),
        Err(BusError::Misaligned { addr: 0x8000_0002, width: 4 })
    );
    assert_eq!(
        bus.read_u16(0x8000_0001),
        Err(BusError::Misaligned { addr: 0x8000_0001, width: 2 })
    );
}

#[test]
fn test_xlen_access_rv64_is_two_words() {
    let mut bus = ram_bus();
    bus.write_xlen(0x8000_0008, Xlen::Rv64, 0x0123_4567_89AB_CDEF).unwrap();
    assert_eq!(bus.read_u32(0x8000_0008).unwrap(), 0x89AB_CDEF);
    assert_eq!(bus.read_u32(0x8000_000C).unwrap(), 0x0123_4567);
    assert_eq!(bus.read_xlen(0x8000_0008, Xlen::Rv64).unwrap(), 0x0123_4567_89AB_CDEF);
    assert!(bus.write_xlen(0x8000_0004, Xlen::Rv64, 0).is_err());
}

#[test]
fn test_xlen_access_rv32_truncates() {
    let mut bus = ram_bus();
    bus.write_xlen(0x8000_0004, Xlen::Rv32, 0xFFFF_FFFF_0000_0001).unwrap();
    assert_eq!(bus.read_xlen(0x8000_0004, Xlen::Rv32).unwrap(), 1);
}

#[test]
fn test_load_binary_at() {
    let mut bus = ram_bus();
    bus.load_binary_at(&[0x13, 0x00, 0x00, 0x00, 0x01, 0x45], 0x8000_0100).unwrap();
    assert_eq!(bus.read_u32(0x8000_0100).unwrap(), 0x13);
    assert_eq!(bus.read_u16(0x8000_0104).unwrap(), 0x4501);
    assert_eq!(
        bus.load_binary_at(&[0; 8], 0x8000_0FFC),
        Err(BusError::Unmapped(0x8000_1000))
    );
}

#[test]
fn test_default_system_map() {
    let system = System::new(&Config::default());
    let names = system.bus.device_names();
    assert_eq!(names, ["IMEM", "DMEM", "SIMCTRL", "MTIMECMP", "UART0"]);
}
