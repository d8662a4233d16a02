//! Compiler flags for building a test against a platform.
//!
//! The test build needs three platform facts: the `-march` string (the hart's
//! ISA filtered to what the platform builds with), the integer ABI, and which
//! exception causes carry a relocatable `mtval`.

use std::fmt;

use crate::isa::IsaString;
use crate::model::TargetModel;

/// Macro the test suite reads the relocatable-`mtval` causes from.
pub const REL_TVAL_MACRO: &str = "SET_REL_TVAL_MSK";

/// `-march`, `-mabi` and the relocatable-`mtval` define for one test build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileFlags {
    /// `-march` value, e.g. `rv32imc`.
    pub march: String,
    /// `-mabi` value, e.g. `ilp32`.
    pub mabi: &'static str,
    /// Bit per exception cause whose `mtval` the test relocates.
    pub rel_tval_mask: u64,
}

impl CompileFlags {
    /// Derives the flags for building `isa` tests against `target`.
    pub fn new(target: &dyn TargetModel, isa: &IsaString) -> Self {
        Self {
            march: isa.march(target.march_extensions()),
            mabi: isa.mabi(),
            rel_tval_mask: target.relocatable_tval_mask() & 0xFFFF_FFFF,
        }
    }
}

impl fmt::Display for CompileFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "-march={} -mabi={} -D{REL_TVAL_MACRO}={:#x}",
            self.march, self.mabi, self.rel_tval_mask
        )
    }
}
