//! Configuration system for the target model.
//!
//! This module defines the configuration structures used to set up a session. It provides:
//! 1. **Defaults:** Baseline memory map of the target (instruction and data memory).
//! 2. **Structures:** General (platform, XLEN), memory, and layout settings.
//! 3. **Loading:** JSON parsing via `serde_json`, or `Config::default()` for the CLI.
//!
//! Every field has a default, so `{}` is a complete configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::common::Xlen;
use crate::isa::IsaString;
use crate::model::PlatformKind;

/// Default configuration constants.
mod defaults {
    /// Base address of instruction memory; also the reset vector.
    pub const IMEM_BASE: u64 = 0x0000_0000;

    /// Instruction memory size (2 MiB, enough for the largest arch-test images).
    pub const IMEM_SIZE: usize = 2 * 1024 * 1024;

    /// Base address of data memory.
    pub const DMEM_BASE: u64 = 0x8000_0000;

    /// Data memory size (512 KiB).
    pub const DMEM_SIZE: usize = 512 * 1024;
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The JSON is malformed or has wrong field types.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rvmodel_core::config::Config;
/// use rvmodel_core::model::PlatformKind;
///
/// let json = r#"{
///     "general": { "platform": "sail-c-sim", "xlen": "Rv64" },
///     "layout": { "trap_entry": 256 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.platform, PlatformKind::SailCSim);
/// assert_eq!(config.layout.trap_entry, Some(0x100));
/// assert_eq!(config.memory.regions.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Platform and hart settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory map.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Layout fallbacks for symbols the image does not define.
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Platform and hart settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Target platform whose hooks are used.
    #[serde(default)]
    pub platform: PlatformKind,

    /// Register width of the hart.
    #[serde(default)]
    pub xlen: Xlen,

    /// ISA string of the hart, e.g. `RV32IMCZicsr_Zifencei`. When present its
    /// width takes precedence over `xlen`.
    #[serde(default)]
    pub isa: Option<IsaString>,

    /// Emit per-step hook tracing (the CLI raises the log level).
    #[serde(default)]
    pub trace: bool,

    /// Program counter at reset.
    #[serde(default = "GeneralConfig::default_reset_pc")]
    pub reset_pc: u64,
}

impl GeneralConfig {
    const fn default_reset_pc() -> u64 {
        defaults::IMEM_BASE
    }

    /// Effective register width: the ISA string's if set, otherwise `xlen`.
    pub fn effective_xlen(&self) -> Xlen {
        self.isa.as_ref().map_or(self.xlen, IsaString::xlen)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            platform: PlatformKind::default(),
            xlen: Xlen::default(),
            isa: None,
            trace: false,
            reset_pc: defaults::IMEM_BASE,
        }
    }
}

/// One RAM region on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryRegion {
    /// Device name shown in logs.
    pub name: String,
    /// Physical base address.
    pub base: u64,
    /// Size in bytes.
    pub size: usize,
}

/// Memory map configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// RAM regions; the defaults mirror the target's IMEM and DMEM.
    #[serde(default = "MemoryConfig::default_regions")]
    pub regions: Vec<MemoryRegion>,
}

impl MemoryConfig {
    fn default_regions() -> Vec<MemoryRegion> {
        vec![
            MemoryRegion {
                name: "IMEM".to_string(),
                base: defaults::IMEM_BASE,
                size: defaults::IMEM_SIZE,
            },
            MemoryRegion {
                name: "DMEM".to_string(),
                base: defaults::DMEM_BASE,
                size: defaults::DMEM_SIZE,
            },
        ]
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            regions: Self::default_regions(),
        }
    }
}

/// Fallback values for the layout contract.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    /// Trap dispatcher entry when the image has no dispatcher symbol.
    #[serde(default)]
    pub trap_entry: Option<u64>,
}
