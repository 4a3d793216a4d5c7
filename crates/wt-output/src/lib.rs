//! `wt-output` — contact-log writers for the `ward_trace` simulator.
//!
//! Four backends are provided, two behind Cargo features:
//!
//! | Feature   | Backend     | Files created          |
//! |-----------|-------------|------------------------|
//! | *(none)*  | JSON        | `contact_list.json`    |
//! | *(none)*  | CSV         | `contacts.csv`         |
//! | `sqlite`  | SQLite      | `contacts.db`          |
//! | `parquet` | Parquet     | `contacts.parquet`     |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`ContactOutputObserver`], which implements `wt_sim::SimObserver`.
//! [`load_contacts_json`] reads the JSON wire format back for tracing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wt_output::{ContactOutputObserver, JsonWriter};
//!
//! let writer = JsonWriter::new(Path::new("./output"))?;
//! let mut obs = ContactOutputObserver::new(writer);
//! hospital.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod trace;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::{CONTACT_LIST_FILE, JsonWriter};
pub use observer::ContactOutputObserver;
pub use row::ContactRow;
pub use trace::{load_contacts_json, read_contacts_json, trace_file};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
