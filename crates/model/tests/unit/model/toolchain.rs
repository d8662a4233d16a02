//! # Compile Flag Tests

use pretty_assertions::assert_eq;
use rvmodel_core::PlatformKind;
use rvmodel_core::isa::IsaString;
use rvmodel_core::isa::privileged::cause::exception;
use rvmodel_core::model::CompileFlags;

fn flags(platform: PlatformKind, isa: &str) -> CompileFlags {
    let isa: IsaString = isa.parse().unwrap();
    CompileFlags::new(platform.model().as_ref(), &isa)
}

#[test]
fn test_neorv32_drops_breakpoint_from_relocatable_tval() {
    let flags = flags(PlatformKind::Neorv32, "RV32IMCZicsr_Zifencei");

    assert_eq!(flags.march, "rv32imc");
    assert_eq!(flags.mabi, "ilp32");
    assert_eq!(flags.rel_tval_mask & (1 << exception::BREAKPOINT), 0);
    assert_eq!(flags.rel_tval_mask, 0xB0F3);
    assert_eq!(
        flags.to_string(),
        "-march=rv32imc -mabi=ilp32 -DSET_REL_TVAL_MSK=0xb0f3"
    );
}

#[test]
fn test_testbench_keeps_default_mask() {
    let flags = flags(PlatformKind::Testbench, "RV32IMC");
    assert_eq!(flags.rel_tval_mask, exception::RELOCATABLE_TVAL_MASK);
    assert_eq!(flags.rel_tval_mask, 0xB0FB);
}

#[test]
fn test_sail_builds_with_float_extensions() {
    let flags = flags(PlatformKind::SailCSim, "RV64IMAFDC");
    assert_eq!(flags.march, "rv64imfdc");
    assert_eq!(flags.mabi, "lp64");
    assert_eq!(flags.rel_tval_mask, 0xB0F3);

    let flags = self::flags(PlatformKind::Neorv32, "RV64IMAFDC");
    assert_eq!(flags.march, "rv64imc");
}
