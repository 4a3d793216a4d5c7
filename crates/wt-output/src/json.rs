//! JSON output backend: the contact-list wire format.
//!
//! Creates `contact_list.json` in the configured output directory, a single
//! array of `{"agent_1", "agent_2", "timestamp"}` objects.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use wt_sim::ContactRecord;

use crate::OutputResult;
use crate::writer::OutputWriter;

pub const CONTACT_LIST_FILE: &str = "contact_list.json";

/// Buffers records and writes the whole array on [`finish`](OutputWriter::finish).
pub struct JsonWriter {
    path:     PathBuf,
    records:  Vec<ContactRecord>,
    finished: bool,
}

impl JsonWriter {
    /// Target `contact_list.json` in `dir`.  The file is created immediately
    /// so a bad directory fails fast.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let path = dir.join(CONTACT_LIST_FILE);
        File::create(&path)?;
        Ok(Self { path, records: Vec::new(), finished: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputWriter for JsonWriter {
    fn write_contacts(&mut self, records: &[ContactRecord]) -> OutputResult<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(&mut out, &self.records)?;
        out.flush()?;
        debug!(records = self.records.len(), path = %self.path.display(), "wrote contact list");
        Ok(())
    }
}
