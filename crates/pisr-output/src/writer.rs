//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgeRow, OutputResult, VisitRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface per call; [`HistoryObserver`](crate::HistoryObserver)
/// stores the first one for retrieval after the run.
pub trait OutputWriter {
    fn write_visit(&mut self, row: &VisitRow) -> OutputResult<()>;

    fn write_ages(&mut self, row: &AgeRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
