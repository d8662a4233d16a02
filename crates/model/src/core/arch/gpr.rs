//! RISC-V General-Purpose Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Provides a register dump for trace output.

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers. Register `x0` is hardwired to zero and
/// cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; 32],
}

impl Gpr {
    /// Creates a new register file with all registers set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a general-purpose register. Writes to `x0` are ignored.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The value to write.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of all 32 registers, `x0` included.
    pub const fn snapshot(&self) -> [u64; 32] {
        self.regs
    }

    /// Logs the contents of all registers at `trace` level, two per line.
    pub fn dump(&self) {
        for i in (0..32).step_by(2) {
            tracing::trace!(
                "x{:<2}={:#018x} x{:<2}={:#018x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}
