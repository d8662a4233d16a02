//! System-on-Chip model of the target's memory-mapped surface.
//!
//! This module organizes everything behind the bus the hooks write to: the
//! interconnect, RAM, the control-page devices, the event monitor that records
//! what the simulation environment would observe, and the builder assembling them.

/// System builder for assembling the SoC.
pub mod builder;

/// Memory-mapped device implementations.
pub mod devices;

/// System bus interconnect and routing.
pub mod interconnect;

/// Flat RAM regions.
pub mod memory;

/// Log of externally observed MMIO events.
pub mod monitor;

/// Device and bus trait definitions.
pub mod traits;

pub use builder::System;
pub use interconnect::Bus;
pub use monitor::{SimEvent, SimMonitor};
pub use traits::{Device, DeviceBus};
