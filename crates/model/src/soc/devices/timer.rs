//! Machine timer compare register pair.
//!
//! # Registers
//!
//! * `0x00`: `mtimecmp` low word
//! * `0x04`: `mtimecmp` high word
//!
//! The timer interrupt is pending while `mtime >= mtimecmp`; writing all ones
//! to both words is how the timer-clear stimulus retires it.

use crate::soc::devices::Device;
use crate::soc::monitor::{SimEvent, SimMonitor};

/// Timer compare device.
#[derive(Debug)]
pub struct TimerCompare {
    base_addr: u64,
    lo: u32,
    hi: u32,
    monitor: SimMonitor,
}

impl TimerCompare {
    /// Creates the compare pair at `base_addr`, initially zero (pending at reset).
    pub const fn new(base_addr: u64, monitor: SimMonitor) -> Self {
        Self {
            base_addr,
            lo: 0,
            hi: 0,
            monitor,
        }
    }

    /// Full 64-bit compare value.
    pub const fn compare(&self) -> u64 {
        ((self.hi as u64) << 32) | self.lo as u64
    }

    /// Returns `true` if the timer interrupt is pending at time `mtime`.
    pub const fn is_pending(&self, mtime: u64) -> bool {
        mtime >= self.compare()
    }
}

impl Device for TimerCompare {
    fn name(&self) -> &str {
        "MTIMECMP"
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, 8)
    }

    fn read_u16(&mut self, offset: u64) -> u16 {
        (self.read_u32(offset & !3) >> ((offset & 2) * 8)) as u16
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        match offset {
            0 => self.lo,
            4 => self.hi,
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u64, value: u32) {
        match offset {
            0 => self.lo = value,
            4 => self.hi = value,
            _ => return,
        }
        self.monitor.record(SimEvent::TimerCompare { offset, value });
    }
}
