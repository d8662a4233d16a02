//! ELF loading and layout resolution.
//!
//! This module turns a compiled test into something the model can run. It performs:
//! 1. **Parsing:** Accepts 32- and 64-bit little-endian RISC-V ELF files.
//! 2. **Segments:** Collects the file-backed bytes of every loadable segment.
//! 3. **Symbols:** Keeps the symbol table so the layout contract can be resolved.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use object::read::elf::{ElfFile32, ElfFile64};
use object::{Architecture, Endianness, FileKind, Object, ObjectSegment, ObjectSymbol};
use thiserror::Error;

use crate::common::{BusError, ModelError, Xlen};
use crate::config::LayoutConfig;
use crate::model::MemoryLayout;
use crate::soc::Bus;

/// Errors raised while loading a test image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The bytes are not a well-formed object file.
    #[error("malformed object file: {0}")]
    Parse(#[from] object::Error),
    /// The file is not an ELF image.
    #[error("unsupported file format {0:?}")]
    UnsupportedFormat(FileKind),
    /// The ELF targets another architecture.
    #[error("not a RISC-V image (architecture {0:?})")]
    NotRiscv(Architecture),
    /// A segment falls outside mapped memory.
    #[error("segment does not fit in memory: {0}")]
    Bus(#[from] BusError),
    /// The image does not satisfy the layout contract.
    #[error(transparent)]
    Layout(#[from] ModelError),
}

/// Bytes to place at a load address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadSegment {
    /// Physical load address.
    pub addr: u64,
    /// File-backed contents; the zero-initialized tail is left to fresh memory.
    pub data: Vec<u8>,
}

/// A parsed test image.
#[derive(Clone, Debug)]
pub struct ElfImage {
    /// Entry point.
    pub entry: u64,
    /// Register width implied by the ELF class.
    pub xlen: Xlen,
    /// Loadable segments in file order.
    pub segments: Vec<LoadSegment>,
    /// Named symbols and their addresses.
    pub symbols: BTreeMap<String, u64>,
}

impl ElfImage {
    /// Reads and parses the ELF file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise see [`Self::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data)
    }

    /// Parses an in-memory ELF file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for malformed input,
    /// [`LoadError::UnsupportedFormat`] for non-ELF input, and
    /// [`LoadError::NotRiscv`] for other architectures.
    pub fn parse(data: &[u8]) -> Result<Self, LoadError> {
        match FileKind::parse(data)? {
            FileKind::Elf32 => Self::from_object(&ElfFile32::<Endianness>::parse(data)?, Xlen::Rv32),
            FileKind::Elf64 => Self::from_object(&ElfFile64::<Endianness>::parse(data)?, Xlen::Rv64),
            other => Err(LoadError::UnsupportedFormat(other)),
        }
    }

    fn from_object<'data, O: Object<'data>>(file: &O, xlen: Xlen) -> Result<Self, LoadError> {
        let arch = file.architecture();
        if !matches!(arch, Architecture::Riscv32 | Architecture::Riscv64) {
            return Err(LoadError::NotRiscv(arch));
        }

        let mut segments = Vec::new();
        for segment in file.segments() {
            let data = segment.data()?;
            if data.is_empty() {
                continue;
            }
            segments.push(LoadSegment {
                addr: segment.address(),
                data: data.to_vec(),
            });
        }

        let symbols = file
            .symbols()
            .filter_map(|sym| {
                let name = sym.name().ok()?;
                (!name.is_empty()).then(|| (name.to_string(), sym.address()))
            })
            .collect();

        Ok(Self {
            entry: file.entry(),
            xlen,
            segments,
            symbols,
        })
    }

    /// Address of `name`, if the image defines it.
    pub fn symbol(&self, name: &str) -> Option<u64> {
        self.symbols.get(name).copied()
    }

    /// Resolves the layout contract from the symbol table.
    ///
    /// # Errors
    ///
    /// See [`MemoryLayout::from_symbols`].
    pub fn layout(&self, config: &LayoutConfig) -> Result<MemoryLayout, ModelError> {
        MemoryLayout::from_symbols(
            self.symbols.iter().map(|(name, addr)| (name.as_str(), *addr)),
            config.trap_entry,
        )
    }

    /// Copies every segment onto the bus.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Bus`] if a segment does not fit a single mapped device.
    pub fn load_into(&self, bus: &mut Bus) -> Result<(), LoadError> {
        for segment in &self.segments {
            bus.load_binary_at(&segment.data, segment.addr)?;
            tracing::debug!(
                addr = format_args!("{:#x}", segment.addr),
                len = segment.data.len(),
                "segment loaded"
            );
        }
        Ok(())
    }
}
