//! Session statistics collection and reporting.
//!
//! Counts what the hooks did over one test run:
//! 1. **Traps:** Taken, split by disposition, plus traps that bypassed the dispatcher.
//! 2. **Stimuli:** Requests issued and the MMIO stores they produced.
//! 3. **Signature:** Data and padding words streamed at halt.

use std::time::{Duration, Instant};

use crate::model::TrapDisposition;

/// Statistics for one session.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Traps delivered to the hart.
    pub traps_taken: u64,
    /// Interrupts returned from without skipping.
    pub interrupts_handled: u64,
    /// Exceptions on 16-bit instructions.
    pub compressed_skips: u64,
    /// Exceptions on 32-bit instructions.
    pub full_skips: u64,
    /// Traps whose vector did not point at the dispatcher.
    pub foreign_traps: u64,

    /// Stimulus requests issued.
    pub stimuli_requested: u64,
    /// MMIO stores produced by stimulus requests.
    pub stimulus_writes: u64,

    /// Words copied out of the signature region.
    pub signature_words: u64,
    /// Zero words appended after the signature.
    pub padding_words: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            traps_taken: 0,
            interrupts_handled: 0,
            compressed_skips: 0,
            full_skips: 0,
            foreign_traps: 0,
            stimuli_requested: 0,
            stimulus_writes: 0,
            signature_words: 0,
            padding_words: 0,
        }
    }
}

impl SimStats {
    /// Records one dispatched trap.
    pub const fn record_disposition(&mut self, disposition: TrapDisposition) {
        match disposition {
            TrapDisposition::Interrupt => self.interrupts_handled += 1,
            TrapDisposition::SkippedCompressed => self.compressed_skips += 1,
            TrapDisposition::SkippedFull => self.full_skips += 1,
        }
    }

    /// Wall-clock time since the session was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Prints a summary to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("RISC-V TARGET MODEL STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", self.elapsed().as_secs_f64());
        println!("traps_taken              {}", self.traps_taken);
        println!("  interrupts             {}", self.interrupts_handled);
        println!("  skip_compressed        {}", self.compressed_skips);
        println!("  skip_full              {}", self.full_skips);
        println!("  foreign                {}", self.foreign_traps);
        println!("----------------------------------------------------------");
        println!("stimuli_requested        {}", self.stimuli_requested);
        println!("stimulus_writes          {}", self.stimulus_writes);
        println!("----------------------------------------------------------");
        println!("signature_words          {}", self.signature_words);
        println!("padding_words            {}", self.padding_words);
        println!("==========================================================");
    }
}
