//! Simulation observer trait for progress reporting and data collection.

use chrono::{DateTime, Utc};

use wt_core::Tick;

use crate::{ContactLog, ContactRecord};

/// Callbacks invoked by [`Hospital::run`][crate::Hospital::run] at key points
/// in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_contacts(&mut self, tick: Tick, ts: DateTime<Utc>, records: &[ContactRecord]) {
///         println!("{tick} @ {ts}: {} contacts", records.len());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `transitions` is the number of agents that changed cell (or finished)
    /// this tick.
    fn on_tick_end(&mut self, _tick: Tick, _transitions: usize) {}

    /// Called on logging ticks, after every cell has emitted.  `records` are
    /// the records appended this tick, stamped `timestamp`.
    fn on_contacts(
        &mut self,
        _tick:      Tick,
        _timestamp: DateTime<Utc>,
        _records:   &[ContactRecord],
    ) {}

    /// Called once after the final tick with the complete contact log.
    fn on_sim_end(&mut self, _final_tick: Tick, _log: &ContactLog) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
