//! Parquet output backend (feature `parquet`).
//!
//! Creates `contacts.parquet` in the configured output directory.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use wt_sim::ContactRecord;

use crate::OutputResult;
use crate::row::ContactRow;
use crate::writer::OutputWriter;

fn contact_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("agent_1",        DataType::Utf8,  false),
        Field::new("agent_2",        DataType::Utf8,  false),
        Field::new("timestamp",      DataType::Utf8,  false),
        Field::new("unix_time_secs", DataType::Int64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes contact records to a Parquet file, one row group per batch.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    contacts: Option<ArrowWriter<File>>,
    schema:   Arc<Schema>,
}

impl ParquetWriter {
    /// Create `contacts.parquet` in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let schema = contact_schema();
        let file = File::create(dir.join("contacts.parquet"))?;
        let contacts = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;
        Ok(Self { contacts: Some(contacts), schema })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_contacts(&mut self, records: &[ContactRecord]) -> OutputResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.contacts.as_mut() else {
            return Ok(());
        };

        let mut agent_1s   = StringBuilder::new();
        let mut agent_2s   = StringBuilder::new();
        let mut timestamps = StringBuilder::new();
        let mut unix_times = Int64Builder::new();

        for record in records {
            let row = ContactRow::from(record);
            agent_1s.append_value(&row.agent_1);
            agent_2s.append_value(&row.agent_2);
            timestamps.append_value(&row.timestamp);
            unix_times.append_value(row.unix_time_secs);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.schema),
            vec![
                Arc::new(agent_1s.finish()),
                Arc::new(agent_2s.finish()),
                Arc::new(timestamps.finish()),
                Arc::new(unix_times.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.contacts.take() {
            w.close()?;
        }
        Ok(())
    }
}
