//! UART0 control and data registers.
//!
//! Only the two words the hooks touch are modelled. With both the enable bit
//! (`ctrl[28]`) and the simulation-mode bit (`ctrl[12]`) set, the simulator
//! diverts every data word into its signature output file instead of the
//! serial line; that diversion is what the signature dump relies on.

use crate::common::constants::{UART_CTRL_EN, UART_CTRL_SIM_MODE};
use crate::soc::devices::Device;
use crate::soc::monitor::{SimEvent, SimMonitor};

/// UART0 device.
#[derive(Debug)]
pub struct Uart {
    base_addr: u64,
    ctrl: u32,
    monitor: SimMonitor,
}

impl Uart {
    /// Offset of the control register.
    pub const CTRL: u64 = 0x0;
    /// Offset of the data register.
    pub const DATA: u64 = 0x4;

    /// Creates a disabled UART at `base_addr`.
    pub const fn new(base_addr: u64, monitor: SimMonitor) -> Self {
        Self {
            base_addr,
            ctrl: 0,
            monitor,
        }
    }

    /// Current control register value.
    pub const fn ctrl(&self) -> u32 {
        self.ctrl
    }

    /// Returns `true` when data writes go to the simulation output.
    pub const fn sim_mode(&self) -> bool {
        let bits = UART_CTRL_EN | UART_CTRL_SIM_MODE;
        self.ctrl & bits == bits
    }
}

impl Device for Uart {
    fn name(&self) -> &str {
        "UART0"
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, 8)
    }

    fn read_u16(&mut self, offset: u64) -> u16 {
        (self.read_u32(offset & !3) >> ((offset & 2) * 8)) as u16
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        match offset {
            Self::CTRL => self.ctrl,
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        match offset {
            Self::CTRL => {
                self.ctrl = val;
                self.monitor.record(SimEvent::UartControl(val));
            }
            Self::DATA if self.sim_mode() => self.monitor.record(SimEvent::SignatureWord(val)),
            Self::DATA => {
                tracing::warn!(
                    ctrl = format_args!("{:#010x}", self.ctrl),
                    "UART0 data write dropped: simulation mode not enabled"
                );
            }
            _ => {}
        }
    }
}
