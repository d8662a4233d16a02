//! Fixed constants of the target's memory-mapped control surface.
//!
//! These addresses are device registers with write-triggers-effect semantics:
//! a store is an irreversible event observed by the simulation environment.

/// Simulation control doorbell; receives the terminate sentinel and stimulus tags.
pub const SIM_CONTROL_ADDR: u64 = 0xF000_0000;

/// Signature stream output on the simulation control page.
pub const SIM_SIGNATURE_ADDR: u64 = 0xF000_0004;

/// Value that ends the simulation when written to [`SIM_CONTROL_ADDR`].
pub const TERMINATE_MAGIC: u32 = 0xCAFE_CAFE;

/// UART0 control register.
pub const UART0_CTRL_ADDR: u64 = 0xFFFF_FFA0;

/// UART0 data register; in simulation mode every word lands in the signature stream.
pub const UART0_DATA_ADDR: u64 = 0xFFFF_FFA4;

/// UART0 enable bit in the control register.
pub const UART_CTRL_EN: u32 = 1 << 28;

/// UART0 simulation-mode bit in the control register.
pub const UART_CTRL_SIM_MODE: u32 = 1 << 12;

/// Machine timer compare register pair (low word; high word at +4).
pub const TIMER_COMPARE_ADDR: u64 = 0xFFFF_FF90;

/// Stimulus tag: set machine software interrupt.
pub const TAG_MSI_SET: u32 = 0x1111_1111;

/// Stimulus tag: clear machine software interrupt.
pub const TAG_MSI_CLEAR: u32 = 0x2222_2222;

/// Stimulus tag: set machine external interrupt.
pub const TAG_MEI_SET: u32 = 0x3333_3333;

/// Stimulus tag: clear machine external interrupt.
pub const TAG_MEI_CLEAR: u32 = 0x4444_4444;

/// Value written to both timer compare words to push the compare point out of reach.
pub const TIMER_COMPARE_DISABLE: u32 = 0xFFFF_FFFF;

/// Distance from `end_signature` to the trap scratch area.
pub const TRAP_SCRATCH_OFFSET: u64 = 32;

/// Size of one signature word in bytes.
pub const SIGNATURE_WORD_BYTES: u64 = 4;

/// Boundary the padded dump is rounded up to, in bytes.
pub const SIGNATURE_PAD_BOUNDARY: u64 = 16;

/// Register-state marker: host word width value stored at `begin_regstate`.
pub const REGSTATE_HOST_WIDTH: u32 = 128;

/// Register-state marker: target word width value stored at `end_regstate`.
pub const REGSTATE_TARGET_WIDTH: u32 = 4;
