//! The `OutputWriter` trait implemented by all backend writers.

use wt_sim::ContactRecord;

use crate::OutputResult;

/// Trait implemented by JSON, CSV, SQLite, and Parquet writers.
///
/// Errors are surfaced to the observer, which stores the first one for
/// [`ContactOutputObserver::take_error`][crate::ContactOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of contact records, in order.
    fn write_contacts(&mut self, records: &[ContactRecord]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_contacts(&mut self, records: &[ContactRecord]) -> OutputResult<()> {
        (**self).write_contacts(records)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
