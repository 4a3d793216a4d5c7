//! `ContactOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use wt_core::Tick;
use wt_sim::{ContactLog, SimObserver};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that hands the finished contact log to any
/// [`OutputWriter`] backend (JSON, CSV, SQLite, Parquet, …).
///
/// The log is written once, after the last tick.  Errors from the writer are
/// stored internally because `SimObserver` methods have no return value.
/// After `hospital.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ContactOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ContactOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `hospital.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for ContactOutputObserver<W> {
    fn on_sim_end(&mut self, _final_tick: Tick, log: &ContactLog) {
        let result = self.writer.write_contacts(log.records());
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
