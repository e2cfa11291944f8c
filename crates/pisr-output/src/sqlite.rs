//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the output directory with two
//! tables: `visits` and `task_ages`.  Ages are stored long-form, one row per
//! task per snapshot, so the schema does not depend on the task count.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgeRow, OutputResult, VisitRow};

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS visits (
                 vehicle_id INTEGER NOT NULL,
                 task_id    INTEGER NOT NULL,
                 time       REAL    NOT NULL,
                 waypoints  TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS task_ages (
                 time    REAL    NOT NULL,
                 phase   TEXT    NOT NULL,
                 task_id INTEGER NOT NULL,
                 age     REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_visit(&mut self, row: &VisitRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO visits (vehicle_id, task_id, time, waypoints) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.vehicle_id, row.task_id, row.time, row.waypoints],
        )?;
        Ok(())
    }

    fn write_ages(&mut self, row: &AgeRow) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO task_ages (time, phase, task_id, age) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (i, age) in row.ages.iter().enumerate() {
                stmt.execute(rusqlite::params![row.time, row.phase, i as u32 + 1, age])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
