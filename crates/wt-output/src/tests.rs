//! Integration tests for wt-output.

use chrono::{DateTime, TimeDelta, Utc};
use tempfile::TempDir;

use wt_core::{AgentUid, SimConfig};
use wt_sim::ContactRecord;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn uid(n: u128) -> AgentUid {
    AgentUid(uuid::Uuid::from_u128(n))
}

fn start() -> DateTime<Utc> {
    SimConfig::default().start
}

fn record(a: u128, b: u128, secs: i64) -> ContactRecord {
    ContactRecord {
        agent_1:   uid(a),
        agent_2:   uid(b),
        timestamp: start() + TimeDelta::seconds(secs),
    }
}

// ── Row conversion ────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use super::*;
    use crate::ContactRow;

    #[test]
    fn row_flattens_ids_and_time() {
        let row = ContactRow::from(&record(1, 2, 30));
        assert_eq!(row.agent_1, "00000000-0000-0000-0000-000000000001");
        assert_eq!(row.agent_2, "00000000-0000-0000-0000-000000000002");
        assert_eq!(row.timestamp, "2024-01-01T00:00:30Z");
        assert_eq!(row.unix_time_secs, start().timestamp() + 30);
    }
}

// ── JSON tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod json_tests {
    use super::*;
    use crate::writer::OutputWriter;
    use crate::{CONTACT_LIST_FILE, JsonWriter, load_contacts_json};

    #[test]
    fn json_file_created_on_open() {
        let dir = tmp();
        let _w = JsonWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(CONTACT_LIST_FILE).exists());
    }

    #[test]
    fn json_wire_format() {
        let dir = tmp();
        let mut w = JsonWriter::new(dir.path()).unwrap();
        w.write_contacts(&[record(1, 2, 30)]).unwrap();
        w.finish().unwrap();

        let text = std::fs::read_to_string(dir.path().join(CONTACT_LIST_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 1);
        let obj = array[0].as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["agent_1"], "00000000-0000-0000-0000-000000000001");
        assert_eq!(obj["agent_2"], "00000000-0000-0000-0000-000000000002");
        assert_eq!(obj["timestamp"], "2024-01-01T00:00:30Z");
    }

    #[test]
    fn json_batches_accumulate_in_order() {
        let dir = tmp();
        let mut w = JsonWriter::new(dir.path()).unwrap();
        w.write_contacts(&[record(1, 2, 30), record(2, 1, 30)]).unwrap();
        w.write_contacts(&[record(1, 3, 60)]).unwrap();
        w.finish().unwrap();

        let records = load_contacts_json(&dir.path().join(CONTACT_LIST_FILE)).unwrap();
        assert_eq!(records, vec![record(1, 2, 30), record(2, 1, 30), record(1, 3, 60)]);
    }

    #[test]
    fn json_empty_log_is_empty_array() {
        let dir = tmp();
        let mut w = JsonWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        let text = std::fs::read_to_string(dir.path().join(CONTACT_LIST_FILE)).unwrap();
        assert_eq!(text, "[]");
    }

    #[test]
    fn json_finish_idempotent() {
        let dir = tmp();
        let mut w = JsonWriter::new(dir.path()).unwrap();
        w.write_contacts(&[record(1, 2, 30)]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
        let records = load_contacts_json(w.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn json_missing_dir_errors() {
        let dir = tmp();
        assert!(JsonWriter::new(&dir.path().join("missing")).is_err());
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("contacts.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["agent_1", "agent_2", "timestamp"]);
    }

    #[test]
    fn csv_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_contacts(&[record(1, 2, 30), record(2, 1, 30), record(3, 1, 60)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("contacts.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "00000000-0000-0000-0000-000000000001");
        assert_eq!(&rows[1][0], "00000000-0000-0000-0000-000000000002");
        assert_eq!(&rows[2][2], "2024-01-01T00:01:00Z");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_contacts(&[]).unwrap();
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use wt_core::{PresenceRequirements, SequentialUids, SimRng};
    use wt_sim::HospitalBuilder;

    use crate::writer::OutputWriter;
    use crate::{
        CONTACT_LIST_FILE, ContactOutputObserver, JsonWriter, OutputError, OutputResult,
        load_contacts_json,
    };

    struct FailingWriter {
        finishes: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_contacts(&mut self, _records: &[ContactRecord]) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn run_writes_full_log() {
        let config = SimConfig {
            cell_count: 1,
            total_ticks: 61,
            presence: PresenceRequirements::NONE,
            ..SimConfig::default()
        };
        let mut hospital = HospitalBuilder::new(config)
            .patient_counts(vec![2])
            .uid_source(Box::new(SequentialUids::default()))
            .build(&mut SimRng::new(1))
            .unwrap();

        let dir = tmp();
        let mut obs = ContactOutputObserver::new(JsonWriter::new(dir.path()).unwrap());
        hospital.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Logging ticks 0, 30, 60; two records each.
        let records = load_contacts_json(&dir.path().join(CONTACT_LIST_FILE)).unwrap();
        assert_eq!(records, hospital.log.records());
        assert_eq!(records.len(), 6);
        assert_eq!(records[5], record(2, 1, 90));
    }

    #[test]
    fn first_error_is_kept_and_finish_still_runs() {
        let mut obs = ContactOutputObserver::new(FailingWriter { finishes: 0 });
        let log = wt_sim::ContactLog::new();
        wt_sim::SimObserver::on_sim_end(&mut obs, wt_core::Tick(10), &log);
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().finishes, 1);
    }

    #[test]
    fn boxed_writer_is_a_writer() {
        let dir = tmp();
        let writer: Box<dyn OutputWriter> = Box::new(JsonWriter::new(dir.path()).unwrap());
        let mut obs = ContactOutputObserver::new(writer);
        let mut log = wt_sim::ContactLog::new();
        log.push(record(1, 2, 30));
        wt_sim::SimObserver::on_sim_end(&mut obs, wt_core::Tick(1), &log);
        assert!(obs.take_error().is_none());
        assert_eq!(load_contacts_json(&dir.path().join(CONTACT_LIST_FILE)).unwrap().len(), 1);
    }
}

// ── Trace queries ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod trace_tests {
    use super::*;
    use crate::writer::OutputWriter;
    use crate::{CONTACT_LIST_FILE, JsonWriter, read_contacts_json, trace_file};

    #[test]
    fn trace_reports_partners_per_infected_id() {
        let dir = tmp();
        let mut w = JsonWriter::new(dir.path()).unwrap();
        w.write_contacts(&[record(1, 2, 30), record(2, 1, 30), record(3, 4, 30), record(4, 1, 60)])
            .unwrap();
        w.finish().unwrap();

        let met = trace_file(&dir.path().join(CONTACT_LIST_FILE), &[uid(1), uid(3)]).unwrap();
        assert_eq!(met[&uid(1)], vec![uid(2), uid(4)]);
        assert_eq!(met[&uid(3)], vec![uid(4)]);
    }

    #[test]
    fn reads_hand_written_wire_format() {
        let text = r#"[{"agent_1":"00000000-0000-0000-0000-000000000001",
                        "agent_2":"00000000-0000-0000-0000-000000000002",
                        "timestamp":"2024-01-01T00:00:30Z"}]"#;
        let records = read_contacts_json(text.as_bytes()).unwrap();
        assert_eq!(records, vec![record(1, 2, 30)]);
    }

    #[test]
    fn malformed_json_errors() {
        assert!(read_contacts_json("[{\"agent_1\": 5}]".as_bytes()).is_err());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("contacts.db").exists());
    }

    #[test]
    fn sqlite_contact_rows() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_contacts(&[record(1, 2, 30), record(2, 1, 30), record(1, 3, 60)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("contacts.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);

        let (agent_2, ts, unix): (String, String, i64) = conn
            .query_row(
                "SELECT agent_2, timestamp, unix_time_secs FROM contacts WHERE unix_time_secs = ?1",
                [start().timestamp() + 60],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(agent_2, "00000000-0000-0000-0000-000000000003");
        assert_eq!(ts, "2024-01-01T00:01:00Z");
        assert_eq!(unix, start().timestamp() + 60);
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use super::*;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    #[test]
    fn parquet_contact_rows() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_contacts(&[record(1, 2, 30), record(2, 1, 30)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("contacts.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 2);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, ["agent_1", "agent_2", "timestamp", "unix_time_secs"]);
        assert_eq!(*schema.field_with_name("unix_time_secs").unwrap().data_type(), DataType::Int64);
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_contacts(&[record(1, 2, 30)]).unwrap();
            // Dropped without finish(): no footer.
        }

        let file = std::fs::File::open(dir.path().join("contacts.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
