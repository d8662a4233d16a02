//! # ELF Loader Tests

use rvmodel_core::sim::{ElfImage, LoadError};

#[test]
fn test_rejects_garbage() {
    assert!(ElfImage::parse(b"definitely not an object file").is_err());
    assert!(ElfImage::parse(&[]).is_err());
}

#[test]
fn test_rejects_truncated_elf_header() {
    let header = [0x7F, b'E', b'L', b'F', 1, 1, 1, 0];
    assert!(ElfImage::parse(&header).is_err());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ElfImage::load(dir.path().join("missing.elf")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
