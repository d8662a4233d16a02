//! RISC-V Trap Cause Codes.
//!
//! This module defines the exception codes stored in the low bits of `mcause`.
//! The interrupt flag is the register's most significant bit and depends on
//! XLEN, so it is applied by [`Trap::mcause`](crate::common::Trap::mcause)
//! rather than baked into these constants.

/// Interrupt codes (applied together with the XLEN-dependent interrupt bit).
pub mod interrupt {
    /// Machine software interrupt.
    pub const MACHINE_SOFTWARE: u64 = 3;

    /// Machine timer interrupt.
    pub const MACHINE_TIMER: u64 = 7;

    /// Machine external interrupt.
    pub const MACHINE_EXTERNAL: u64 = 11;
}

/// Exception definitions (MSB = 0).
pub mod exception {
    /// Instruction address misaligned (0).
    pub const INSTRUCTION_ADDRESS_MISALIGNED: u64 = 0;
    /// Instruction access fault (1).
    pub const INSTRUCTION_ACCESS_FAULT: u64 = 1;
    /// Illegal instruction (2).
    pub const ILLEGAL_INSTRUCTION: u64 = 2;
    /// Breakpoint (3).
    pub const BREAKPOINT: u64 = 3;
    /// Load address misaligned (4).
    pub const LOAD_ADDRESS_MISALIGNED: u64 = 4;
    /// Load access fault (5).
    pub const LOAD_ACCESS_FAULT: u64 = 5;
    /// Store/AMO address misaligned (6).
    pub const STORE_ADDRESS_MISALIGNED: u64 = 6;
    /// Store/AMO access fault (7).
    pub const STORE_ACCESS_FAULT: u64 = 7;
    /// Environment call from M-mode (11).
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u64 = 11;
    /// Instruction page fault (12).
    pub const INSTRUCTION_PAGE_FAULT: u64 = 12;
    /// Load page fault (13).
    pub const LOAD_PAGE_FAULT: u64 = 13;
    /// Store/AMO page fault (15).
    pub const STORE_PAGE_FAULT: u64 = 15;

    /// Causes whose `mtval` holds an address the test relocates before writing
    /// it to the signature (the suite's `SET_REL_TVAL_MSK`).
    pub const RELOCATABLE_TVAL_MASK: u64 = (1 << INSTRUCTION_ADDRESS_MISALIGNED)
        | (1 << INSTRUCTION_ACCESS_FAULT)
        | (1 << BREAKPOINT)
        | (1 << LOAD_ADDRESS_MISALIGNED)
        | (1 << LOAD_ACCESS_FAULT)
        | (1 << STORE_ADDRESS_MISALIGNED)
        | (1 << STORE_ACCESS_FAULT)
        | (1 << INSTRUCTION_PAGE_FAULT)
        | (1 << LOAD_PAGE_FAULT)
        | (1 << STORE_PAGE_FAULT);
}
