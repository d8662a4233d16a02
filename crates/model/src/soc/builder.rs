//! System-on-Chip construction and top-level `System` type.
//!
//! This module builds the target's bus from configuration. It performs:
//! 1. **Memory:** One `Memory` device per configured RAM region.
//! 2. **Control surface:** The simulation control page, UART0, and the timer compare pair.
//! 3. **Observation:** A single `SimMonitor` shared by every device.

use crate::common::constants::{SIM_CONTROL_ADDR, TIMER_COMPARE_ADDR, UART0_CTRL_ADDR};
use crate::config::Config;
use crate::soc::devices::{SimControl, TimerCompare, Uart};
use crate::soc::interconnect::Bus;
use crate::soc::memory::Memory;
use crate::soc::monitor::SimMonitor;

/// Top-level system instance: the bus plus the monitor its devices report to.
#[derive(Debug)]
pub struct System {
    /// System interconnect; routes accesses to RAM and MMIO devices.
    pub bus: Bus,
    /// Event log of everything the simulation environment observes.
    pub monitor: SimMonitor,
}

impl System {
    /// Builds the system described by `config`.
    pub fn new(config: &Config) -> Self {
        let monitor = SimMonitor::new();
        let mut bus = Bus::new();

        for region in &config.memory.regions {
            bus.add_device(Box::new(Memory::new(
                region.name.clone(),
                region.base,
                region.size,
            )));
        }

        bus.add_device(Box::new(SimControl::new(SIM_CONTROL_ADDR, monitor.clone())));
        bus.add_device(Box::new(Uart::new(UART0_CTRL_ADDR, monitor.clone())));
        bus.add_device(Box::new(TimerCompare::new(
            TIMER_COMPARE_ADDR,
            monitor.clone(),
        )));

        Self { bus, monitor }
    }
}
