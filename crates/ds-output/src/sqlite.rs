//! SQLite output backend (feature `sqlite`).
//!
//! One `survey.db` file with the tables `probe_snapshots` and `coverage`.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::writer::OutputWriter;
use crate::{CoverageRow, OutputResult, ProbeSnapshotRow};

pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `survey.db` in `dir` and create the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("survey.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS probe_snapshots (
                 probe_id INTEGER NOT NULL,
                 tick     INTEGER NOT NULL,
                 lon      REAL    NOT NULL,
                 lat      REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS coverage (
                 tick               INTEGER PRIMARY KEY,
                 elapsed_days       INTEGER NOT NULL,
                 new_cells          INTEGER NOT NULL,
                 explored_cells     INTEGER NOT NULL,
                 percent_hundredths INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_probe_snapshots(&mut self, rows: &[ProbeSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO probe_snapshots (probe_id, tick, lon, lat) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(params![row.probe_id, row.tick as i64, row.lon, row.lat])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_coverage(&mut self, row: &CoverageRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO coverage \
             (tick, elapsed_days, new_cells, explored_cells, percent_hundredths) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                row.tick as i64,
                row.elapsed_days as i64,
                row.new_cells as i64,
                row.explored_cells as i64,
                row.percent_hundredths as i64,
            ],
        )?;
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
