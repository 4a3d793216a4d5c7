//! Contact records and the append-only contact log.
//!
//! A record says two agents were resident in the same cell on a logging
//! tick.  The serialized form is the wire format read by contact-tracing
//! tools:
//!
//! ```json
//! {"agent_1": "<uuid>", "agent_2": "<uuid>", "timestamp": "2024-01-01T00:00:30Z"}
//! ```

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wt_core::AgentUid;

/// Two agents co-resident in one cell at `timestamp`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub agent_1:   AgentUid,
    pub agent_2:   AgentUid,
    pub timestamp: DateTime<Utc>,
}

/// Append-only, ordered sequence of contact records.
#[derive(Clone, Debug, Default)]
pub struct ContactLog {
    records: Vec<ContactRecord>,
}

impl ContactLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, record: ContactRecord) {
        self.records.push(record);
    }

    pub fn extend<I: IntoIterator<Item = ContactRecord>>(&mut self, records: I) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Records appended at or after position `start`.
    pub fn since(&self, start: usize) -> &[ContactRecord] {
        &self.records[start.min(self.records.len())..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContactRecord> + '_ {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<ContactRecord> {
        self.records
    }
}

// ── Tracing queries ───────────────────────────────────────────────────────────

/// Every agent that shared a cell with `agent`, sorted and de-duplicated.
///
/// Matches either side of a record, so the answer is the same for directed
/// and unordered logs.
pub fn contacts_of(records: &[ContactRecord], agent: AgentUid) -> Vec<AgentUid> {
    let partners: BTreeSet<AgentUid> = records
        .iter()
        .filter_map(|r| {
            if r.agent_1 == agent {
                Some(r.agent_2)
            } else if r.agent_2 == agent {
                Some(r.agent_1)
            } else {
                None
            }
        })
        .collect();
    partners.into_iter().collect()
}

/// [`contacts_of`] for each id in `infected`.
pub fn met_with(records: &[ContactRecord], infected: &[AgentUid]) -> BTreeMap<AgentUid, Vec<AgentUid>> {
    infected
        .iter()
        .map(|&uid| (uid, contacts_of(records, uid)))
        .collect()
}
