//! Log of externally observed MMIO events.
//!
//! The simulation environment watches a handful of addresses: the signature
//! stream, the control doorbell, and the device control registers. Devices push
//! what they see into a shared `SimMonitor`; the session and the tests read the
//! log back in order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One event observed by the simulation environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// A word arrived on the signature stream.
    SignatureWord(u32),
    /// A non-terminating tag was written to the control doorbell.
    Doorbell(u32),
    /// The terminate sentinel was written; the simulation ends here.
    Terminate,
    /// A UART control register write.
    UartControl(u32),
    /// A timer-compare register write (`offset` is 0 for low, 4 for high).
    TimerCompare {
        /// Word offset within the compare pair.
        offset: u64,
        /// Written value.
        value: u32,
    },
}

/// Shared, cloneable event log.
#[derive(Clone, Debug, Default)]
pub struct SimMonitor {
    events: Arc<Mutex<Vec<SimEvent>>>,
}

impl SimMonitor {
    /// Creates an empty monitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&self, event: SimEvent) {
        self.lock().push(event);
    }

    /// All events in arrival order.
    pub fn events(&self) -> Vec<SimEvent> {
        self.lock().clone()
    }

    /// Words observed on the signature stream, in order.
    pub fn signature_words(&self) -> Vec<u32> {
        self.lock()
            .iter()
            .filter_map(|ev| match ev {
                SimEvent::SignatureWord(w) => Some(*w),
                _ => None,
            })
            .collect()
    }

    /// Tags written to the control doorbell, in order.
    pub fn doorbell_tags(&self) -> Vec<u32> {
        self.lock()
            .iter()
            .filter_map(|ev| match ev {
                SimEvent::Doorbell(tag) => Some(*tag),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` once the terminate sentinel has been observed.
    pub fn terminated(&self) -> bool {
        self.lock().contains(&SimEvent::Terminate)
    }

    /// Drops all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SimEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
