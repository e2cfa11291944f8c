//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `visits.csv`: `vehicle_id,task_id,time,waypoints`
//! - `task_ages.csv`: `time,phase,age_1,…,age_n`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgeRow, OutputError, OutputResult, VisitRow};

/// Writes run output to two CSV files.
pub struct CsvWriter {
    visits:     Writer<File>,
    ages:       Writer<File>,
    task_count: usize,
    finished:   bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path, task_count: usize) -> OutputResult<Self> {
        let mut visits = Writer::from_path(dir.join("visits.csv"))?;
        visits.write_record(["vehicle_id", "task_id", "time", "waypoints"])?;

        let mut ages = Writer::from_path(dir.join("task_ages.csv"))?;
        let header: Vec<String> = ["time".to_owned(), "phase".to_owned()]
            .into_iter()
            .chain((1..=task_count).map(|k| format!("age_{k}")))
            .collect();
        ages.write_record(&header)?;

        Ok(Self { visits, ages, task_count, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_visit(&mut self, row: &VisitRow) -> OutputResult<()> {
        self.visits.write_record(&[
            row.vehicle_id.to_string(),
            row.task_id.to_string(),
            row.time.to_string(),
            row.waypoints.clone(),
        ])?;
        Ok(())
    }

    fn write_ages(&mut self, row: &AgeRow) -> OutputResult<()> {
        if row.ages.len() != self.task_count {
            return Err(OutputError::AgeWidth { expected: self.task_count, got: row.ages.len() });
        }
        let record: Vec<String> = [row.time.to_string(), row.phase.to_owned()]
            .into_iter()
            .chain(row.ages.iter().map(f64::to_string))
            .collect();
        self.ages.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.visits.flush()?;
        self.ages.flush()?;
        Ok(())
    }
}
