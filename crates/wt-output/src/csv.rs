//! CSV output backend.
//!
//! Creates `contacts.csv` in the configured output directory with header
//! `agent_1,agent_2,timestamp`.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use wt_sim::ContactRecord;

use crate::OutputResult;
use crate::row::ContactRow;
use crate::writer::OutputWriter;

/// Writes contact records to a CSV file.
pub struct CsvWriter {
    contacts: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) `contacts.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut contacts = Writer::from_path(dir.join("contacts.csv"))?;
        contacts.write_record(["agent_1", "agent_2", "timestamp"])?;
        Ok(Self { contacts, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_contacts(&mut self, records: &[ContactRecord]) -> OutputResult<()> {
        for record in records {
            let row = ContactRow::from(record);
            self.contacts.write_record([&row.agent_1, &row.agent_2, &row.timestamp])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.contacts.flush()?;
        Ok(())
    }
}
