//! RISC-V Application Binary Interface (ABI) register name constants.
//!
//! Defines the register indices the model hooks touch.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register x1 (return address, ra).
pub const REG_RA: usize = 1;
/// Register x2 (stack pointer, sp).
pub const REG_SP: usize = 2;
/// Register x8 (saved register / frame pointer, s0). First trap scratch register.
pub const REG_S0: usize = 8;
/// Register x9 (saved register, s1). Second trap scratch register.
pub const REG_S1: usize = 9;
/// Register x10 (first argument/return value, a0).
pub const REG_A0: usize = 10;
