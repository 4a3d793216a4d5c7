//! Hospital cells and their occupancy sets.

use chrono::{DateTime, Utc};

use wt_core::{AgentId, AgentUid, CellId, ContactPairing};

use crate::{ContactLog, ContactRecord};

#[cfg(feature = "fx-hash")]
type OccupancySet = rustc_hash::FxHashSet<AgentId>;
#[cfg(not(feature = "fx-hash"))]
type OccupancySet = std::collections::HashSet<AgentId>;

/// A location holding the set of agents currently present.
///
/// Membership changes only through [`enter`](Self::enter) and
/// [`leave`](Self::leave), both idempotent.
#[derive(Clone, Debug)]
pub struct Cell {
    pub id:    CellId,
    occupants: OccupancySet,
}

impl Cell {
    pub fn new(id: CellId) -> Self {
        Self { id, occupants: OccupancySet::default() }
    }

    /// Register `agent` as present.  Returns `false` if it already was.
    #[inline]
    pub fn enter(&mut self, agent: AgentId) -> bool {
        self.occupants.insert(agent)
    }

    /// Remove `agent`.  Returns `false` if it was not present.
    #[inline]
    pub fn leave(&mut self, agent: AgentId) -> bool {
        self.occupants.remove(&agent)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.occupants.contains(&agent)
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Current occupants in ascending `AgentId` order.
    pub fn occupants(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.occupants.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Append one record per co-resident pair to `log`.
    ///
    /// Pairs are enumerated over occupants sorted by `AgentId`, so the order
    /// of records never depends on hash iteration order.  `uids` is the
    /// store's uid array, indexed by `AgentId`.  Returns the number of
    /// records appended.
    pub fn periodic_emit(
        &self,
        timestamp: DateTime<Utc>,
        pairing:   ContactPairing,
        uids:      &[AgentUid],
        log:       &mut ContactLog,
    ) -> usize {
        if self.occupants.len() < 2 {
            return 0;
        }
        let ids = self.occupants();
        let before = log.len();
        for (i, a) in ids.iter().enumerate() {
            let partners = match pairing {
                ContactPairing::Directed  => &ids[..],
                ContactPairing::Unordered => &ids[i + 1..],
            };
            for b in partners.iter().filter(|&b| b != a) {
                log.push(ContactRecord {
                    agent_1: uids[a.index()],
                    agent_2: uids[b.index()],
                    timestamp,
                });
            }
        }
        log.len() - before
    }

    /// Like [`periodic_emit`](Self::periodic_emit) but returns the records.
    pub fn contacts(
        &self,
        timestamp: DateTime<Utc>,
        pairing:   ContactPairing,
        uids:      &[AgentUid],
    ) -> Vec<ContactRecord> {
        let mut log = ContactLog::new();
        self.periodic_emit(timestamp, pairing, uids, &mut log);
        log.into_records()
    }
}
