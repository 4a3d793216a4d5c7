//! SQLite output backend (feature `sqlite`).
//!
//! Creates `contacts.db` in the configured output directory with a single
//! `contacts` table.

use std::path::Path;

use rusqlite::Connection;

use wt_sim::ContactRecord;

use crate::OutputResult;
use crate::row::ContactRow;
use crate::writer::OutputWriter;

/// Writes contact records to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `contacts.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("contacts.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS contacts (
                 agent_1        TEXT    NOT NULL,
                 agent_2        TEXT    NOT NULL,
                 timestamp      TEXT    NOT NULL,
                 unix_time_secs INTEGER NOT NULL
             );
             CREATE INDEX IF NOT EXISTS contacts_agent_1 ON contacts (agent_1);",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_contacts(&mut self, records: &[ContactRecord]) -> OutputResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO contacts (agent_1, agent_2, timestamp, unix_time_secs) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                let row = ContactRow::from(record);
                stmt.execute(rusqlite::params![
                    row.agent_1,
                    row.agent_2,
                    row.timestamp,
                    row.unix_time_secs,
                ])?;
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
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
