//! Simulation control page.
//!
//! A write-only doorbell watched by the testbench rather than by software.
//!
//! # Registers
//!
//! * `0x00`: Control doorbell (Write Only)
//!   * `0xCAFECAFE`: Terminate the simulation
//!   * anything else: stimulus tag (e.g. `0x11111111` sets the software interrupt)
//! * `0x04`: Signature stream (Write Only); each word is captured in order.

use crate::common::constants::TERMINATE_MAGIC;
use crate::soc::devices::Device;
use crate::soc::monitor::{SimEvent, SimMonitor};

/// Simulation control device.
#[derive(Debug)]
pub struct SimControl {
    base_addr: u64,
    monitor: SimMonitor,
}

impl SimControl {
    /// Offset of the control doorbell.
    pub const DOORBELL: u64 = 0x0;
    /// Offset of the signature stream register.
    pub const SIGNATURE: u64 = 0x4;

    /// Creates the device at `base_addr`, reporting into `monitor`.
    pub const fn new(base_addr: u64, monitor: SimMonitor) -> Self {
        Self { base_addr, monitor }
    }
}

impl Device for SimControl {
    fn name(&self) -> &str {
        "SIMCTRL"
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, 8)
    }

    fn read_u16(&mut self, _offset: u64) -> u16 {
        0
    }

    fn read_u32(&mut self, _offset: u64) -> u32 {
        0
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        match offset {
            Self::DOORBELL if val == TERMINATE_MAGIC => {
                tracing::info!("terminate sentinel received");
                self.monitor.record(SimEvent::Terminate);
            }
            Self::DOORBELL => {
                tracing::debug!(tag = format_args!("{val:#010x}"), "doorbell");
                self.monitor.record(SimEvent::Doorbell(val));
            }
            Self::SIGNATURE => self.monitor.record(SimEvent::SignatureWord(val)),
            _ => {}
        }
    }
}
