//! `HistoryObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use pisr_sim::{AgeSnapshot, RunHistory, SimObserver, VisitRecord};

use crate::row::{AgeRow, VisitRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams visits and age snapshots to any
/// [`OutputWriter`] backend as the run produces them.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct HistoryObserver<W: OutputWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> HistoryObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        match result {
            Ok(()) => self.rows += 1,
            Err(e) => {
                // Keep only the first error.
                if self.last_error.is_none() {
                    tracing::warn!(error = %e, "output write failed");
                    self.last_error = Some(e);
                }
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for HistoryObserver<W> {
    fn on_visit(&mut self, visit: &VisitRecord) {
        let result = self.writer.write_visit(&VisitRow::from(visit));
        self.store_err(result);
    }

    fn on_age_snapshot(&mut self, snapshot: &AgeSnapshot) {
        let result = self.writer.write_ages(&AgeRow::from(snapshot));
        self.store_err(result);
    }

    fn on_run_end(&mut self, _history: &RunHistory) {
        let result = self.writer.finish();
        if let Err(e) = result {
            self.store_err(Err(e));
        }
        tracing::debug!(rows = self.rows, "output flushed");
    }
}
