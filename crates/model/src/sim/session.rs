//! Test session lifecycle.
//!
//! A session ties one hart, one bus and one platform together and enforces the
//! order the hooks may run in:
//!
//! ```text
//! Reset --boot--> Running --halt--> Halted
//!                  |  ^
//!          trap/stimulus
//! ```
//!
//! Traps and stimuli are only meaningful while running; nothing runs after halt.

use crate::common::{ModelError, Trap};
use crate::core::Hart;
use crate::model::{BootReport, DumpReport, MemoryLayout, Stimulus, TargetModel, TrapDispatcher, TrapDisposition};
use crate::soc::DeviceBus;
use crate::stats::SimStats;

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Created; the boot hook has not run.
    Reset,
    /// Booted; the test body is executing.
    Running,
    /// Signature dumped and termination requested.
    Halted,
}

/// Result of delivering a trap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapOutcome {
    /// The dispatcher handled the trap and the hart is back in the test.
    Handled(TrapDisposition),
    /// `mtvec` pointed somewhere else; the hart is left at `vector`.
    Foreign {
        /// Address control was transferred to.
        vector: u64,
    },
}

/// One run of one test on one platform.
#[derive(Debug)]
pub struct Session<B: DeviceBus> {
    hart: Hart,
    bus: B,
    layout: MemoryLayout,
    target: Box<dyn TargetModel>,
    dispatcher: TrapDispatcher,
    phase: Phase,
    stats: SimStats,
}

impl<B: DeviceBus> Session<B> {
    /// Creates a session in [`Phase::Reset`].
    pub fn new(target: Box<dyn TargetModel>, layout: MemoryLayout, hart: Hart, bus: B) -> Self {
        Self {
            hart,
            bus,
            dispatcher: TrapDispatcher::new(&layout),
            layout,
            target,
            phase: Phase::Reset,
            stats: SimStats::default(),
        }
    }

    /// Runs the platform's boot hook.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AlreadyBooted`] after the first call, or whatever
    /// the hook itself reports. A failed boot leaves the session in reset.
    pub fn boot(&mut self) -> Result<BootReport, ModelError> {
        match self.phase {
            Phase::Reset => {}
            Phase::Running => return Err(ModelError::AlreadyBooted),
            Phase::Halted => return Err(ModelError::Halted),
        }
        let report = self.target.boot(&mut self.hart, &mut self.bus, &self.layout)?;
        self.phase = Phase::Running;
        tracing::info!(platform = self.target.name(), "booted");
        Ok(report)
    }

    /// Delivers `trap` at the current `pc` and, if it lands on the dispatcher,
    /// runs the handler to completion.
    ///
    /// Delivery does not consult `mie`/`mstatus`; the caller decides when an
    /// interrupt is taken. `mtval` follows the platform's
    /// [`TargetModel::trap_value`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotBooted`] or [`ModelError::Halted`] outside the
    /// running phase, or any dispatcher failure.
    pub fn raise(&mut self, trap: Trap) -> Result<TrapOutcome, ModelError> {
        self.ensure_running()?;
        let tval = self.target.trap_value(trap);
        self.hart.take_trap_with_tval(trap, tval);
        self.stats.traps_taken += 1;

        if !self.dispatcher.owns(self.hart.pc) {
            self.stats.foreign_traps += 1;
            tracing::warn!(%trap, vector = format_args!("{:#x}", self.hart.pc), "trap vector bypasses dispatcher");
            return Ok(TrapOutcome::Foreign { vector: self.hart.pc });
        }

        let disposition = self.dispatcher.dispatch(&mut self.hart, &mut self.bus)?;
        self.stats.record_disposition(disposition);
        Ok(TrapOutcome::Handled(disposition))
    }

    /// Emits the platform's stores for `stimulus`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotBooted`] or [`ModelError::Halted`] outside the
    /// running phase, or [`ModelError::Bus`] if a store faults.
    pub fn stimulate(&mut self, stimulus: Stimulus) -> Result<usize, ModelError> {
        self.ensure_running()?;
        let writes = self.target.stimulate(&mut self.bus, stimulus)?;
        self.stats.stimuli_requested += 1;
        self.stats.stimulus_writes += writes as u64;
        if writes == 0 {
            tracing::debug!(%stimulus, platform = self.target.name(), "stimulus not supported");
        }
        Ok(writes)
    }

    /// Dumps the signature and requests termination.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotBooted`] or [`ModelError::Halted`] outside the
    /// running phase, or any dump failure. A failed halt leaves the session running.
    pub fn halt(&mut self) -> Result<DumpReport, ModelError> {
        self.ensure_running()?;
        let report = self.target.halt(&mut self.bus, &self.layout)?;
        self.stats.signature_words = report.data_words;
        self.stats.padding_words = report.padding_words;
        self.phase = Phase::Halted;
        Ok(report)
    }

    const fn ensure_running(&self) -> Result<(), ModelError> {
        match self.phase {
            Phase::Reset => Err(ModelError::NotBooted),
            Phase::Running => Ok(()),
            Phase::Halted => Err(ModelError::Halted),
        }
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The hart.
    pub const fn hart(&self) -> &Hart {
        &self.hart
    }

    /// The hart, for test code that stands in for the test body.
    pub const fn hart_mut(&mut self) -> &mut Hart {
        &mut self.hart
    }

    /// The bus.
    pub const fn bus(&self) -> &B {
        &self.bus
    }

    /// The bus, mutably.
    pub const fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// The resolved layout.
    pub const fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    /// The platform hooks.
    pub fn target(&self) -> &dyn TargetModel {
        self.target.as_ref()
    }

    /// The trap dispatcher.
    pub const fn dispatcher(&self) -> &TrapDispatcher {
        &self.dispatcher
    }

    /// Statistics so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Consumes the session, returning the hart and bus.
    pub fn into_parts(self) -> (Hart, B) {
        (self.hart, self.bus)
    }
}
