//! # `rvmodel flags`

use pretty_assertions::assert_eq;

use crate::common::cli::rvmodel;

#[test]
fn test_neorv32_flags() {
    let run = rvmodel(["flags", "--isa", "RV32IMCZicsr_Zifencei", "--platform", "neorv32"]);

    assert!(run.success, "{}", run.stderr);
    assert_eq!(
        run.stdout.trim(),
        "-march=rv32imc -mabi=ilp32 -DSET_REL_TVAL_MSK=0xb0f3"
    );
}

#[test]
fn test_isa_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{ "general": { "platform": "sail-c-sim", "isa": "RV64IMAFDC" } }"#,
    )
    .unwrap();

    let run = rvmodel(["flags", "--config", config.to_str().unwrap()]);

    assert!(run.success, "{}", run.stderr);
    assert_eq!(
        run.stdout.trim(),
        "-march=rv64imfdc -mabi=lp64 -DSET_REL_TVAL_MSK=0xb0f3"
    );
}

#[test]
fn test_missing_isa_fails() {
    let run = rvmodel(["flags", "--platform", "testbench"]);

    assert!(!run.success);
    assert!(run.stderr.contains("no ISA string"), "{}", run.stderr);
}

#[test]
fn test_malformed_isa_rejected_by_parser() {
    let run = rvmodel(["flags", "--isa", "RV128I"]);

    assert!(!run.success);
    assert!(run.stderr.contains("unsupported register width"), "{}", run.stderr);
}
