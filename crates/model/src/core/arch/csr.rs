//! Control and Status Register (CSR) definitions and operations.
//!
//! Only the machine-mode registers the model hooks read or write are kept:
//! 1. **Address Definitions:** CSR numbers used by `csrr`/`csrw` in the hooks.
//! 2. **Field Masks:** `mstatus` interrupt-enable stack bits.
//! 3. **Register Storage:** The `Csrs` struct.
//! 4. **Access Logic:** Read and write by CSR number.

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine interrupt enable register CSR address.
pub const MIE: u32 = 0x304;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;

/// Machine interrupt enable bit in `mstatus`.
pub const MSTATUS_MIE: u64 = 1 << 3;

/// Machine previous interrupt enable bit in `mstatus`.
pub const MSTATUS_MPIE: u64 = 1 << 7;

/// Machine previous privilege mode field mask in `mstatus`.
pub const MSTATUS_MPP: u64 = 3 << 11;

/// Machine software interrupt enable bit in `mie`.
pub const MIE_MSIE: u64 = 1 << 3;

/// Machine timer interrupt enable bit in `mie`.
pub const MIE_MTIE: u64 = 1 << 7;

/// Machine external interrupt enable bit in `mie`.
pub const MIE_MEIE: u64 = 1 << 11;

/// Mode bits of `mtvec`; zero selects direct mode.
pub const MTVEC_MODE_MASK: u64 = 0b11;

/// Machine-mode Control and Status Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Csrs {
    /// Machine status register.
    pub mstatus: u64,
    /// Machine interrupt enable.
    pub mie: u64,
    /// Machine trap vector base address.
    pub mtvec: u64,
    /// Machine scratch register.
    pub mscratch: u64,
    /// Machine exception program counter.
    pub mepc: u64,
    /// Machine trap cause.
    pub mcause: u64,
    /// Machine trap value.
    pub mtval: u64,
}

impl Csrs {
    /// Reads a CSR value by its address; unknown addresses read as zero.
    pub const fn read(&self, addr: u32) -> u64 {
        match addr {
            MSTATUS => self.mstatus,
            MIE => self.mie,
            MTVEC => self.mtvec,
            MSCRATCH => self.mscratch,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            MTVAL => self.mtval,
            _ => 0,
        }
    }

    /// Writes a CSR value by its address; unknown addresses are ignored.
    ///
    /// `mepc` drops bit 0, since instructions are at least 2-byte aligned.
    pub const fn write(&mut self, addr: u32, val: u64) {
        match addr {
            MSTATUS => self.mstatus = val,
            MIE => self.mie = val,
            MTVEC => self.mtvec = val,
            MSCRATCH => self.mscratch = val,
            MEPC => self.mepc = val & !1,
            MCAUSE => self.mcause = val,
            MTVAL => self.mtval = val,
            _ => {}
        }
    }
}
