//! Flat, string-typed rows for the tabular backends.

use chrono::SecondsFormat;

use wt_sim::ContactRecord;

/// One contact record as written by the CSV, SQLite and Parquet backends.
///
/// Agent ids are hyphenated UUIDs; `timestamp` is RFC 3339 with a `Z`
/// suffix, matching the JSON wire format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactRow {
    pub agent_1:        String,
    pub agent_2:        String,
    pub timestamp:      String,
    pub unix_time_secs: i64,
}

impl From<&ContactRecord> for ContactRow {
    fn from(r: &ContactRecord) -> Self {
        Self {
            agent_1:        r.agent_1.to_string(),
            agent_2:        r.agent_2.to_string(),
            timestamp:      r.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            unix_time_secs: r.timestamp.timestamp(),
        }
    }
}
