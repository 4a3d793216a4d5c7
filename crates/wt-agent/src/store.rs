//! Core agent storage: `AgentStore` (SoA arena).
//!
//! # Layout
//!
//! Every `Vec` field has exactly `count` elements and the `AgentId` is the
//! index into all of them.  Agents are laid out by kind in creation order:
//!
//! ```text
//! [ doctors … | nurses … | visitors … | patients … ]
//! ```
//!
//! so each personnel pool is a contiguous slice of `schedules`, which is what
//! `wt_schedule::distribute` walks.  Cells refer to agents by `AgentId` only;
//! the store is the single owner of agent state.

use std::ops::Range;

use wt_core::{AgentId, AgentKind, AgentUid, CellId};
use wt_schedule::AgentSchedule;

/// Structure-of-Arrays storage for all agent state.
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Opaque identity written to the contact log.
    pub uid: Vec<AgentUid>,

    pub kind: Vec<AgentKind>,

    /// The cell a patient is bound to.  `CellId::INVALID` for personnel.
    pub home_cell: Vec<CellId>,

    /// Ticks elapsed in the visit at the head of the agent's queue.
    pub time_in_cell: Vec<u32>,

    /// Terminal flag, set once the agent's queue drains.
    pub finished: Vec<bool>,

    /// Allotment and visit queue.  Empty for patients.
    pub schedules: Vec<AgentSchedule>,

    /// Index ranges of the three personnel pools, in `AgentKind::PERSONNEL`
    /// order.
    pools: [Range<usize>; 3],
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        (0..self.count as u32).map(AgentId)
    }

    /// All doctors, then all nurses, then all visitors, each in creation order.
    pub fn personnel_ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        (0..self.personnel_count() as u32).map(AgentId)
    }

    pub fn personnel_count(&self) -> usize {
        self.pools[2].end
    }

    pub fn patient_ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        (self.personnel_count() as u32..self.count as u32).map(AgentId)
    }

    // ── Pools ─────────────────────────────────────────────────────────────

    /// Arena range of `kind`'s pool.  Empty for patients.
    pub fn pool_range(&self, kind: AgentKind) -> Range<usize> {
        match kind.personnel_index() {
            Some(i) => self.pools[i].clone(),
            None => self.personnel_count()..self.count,
        }
    }

    pub fn pool_len(&self, kind: AgentKind) -> usize {
        self.pool_range(kind).len()
    }

    pub fn pool_ids(&self, kind: AgentKind) -> impl Iterator<Item = AgentId> + use<> {
        let range = self.pool_range(kind);
        (range.start as u32..range.end as u32).map(AgentId)
    }

    /// Mutable schedules of one pool, in creation order.
    pub fn pool_mut(&mut self, kind: AgentKind) -> &mut [AgentSchedule] {
        let range = self.pool_range(kind);
        &mut self.schedules[range]
    }

    // ── Per-agent queries ─────────────────────────────────────────────────

    #[inline]
    pub fn is_finished(&self, agent: AgentId) -> bool {
        self.finished[agent.index()]
    }

    #[inline]
    pub fn schedule(&self, agent: AgentId) -> &AgentSchedule {
        &self.schedules[agent.index()]
    }

    /// The cell whose occupancy set should contain `agent` right now.
    ///
    /// Patients: their home cell.  Personnel: the head of the queue, or
    /// `None` while holding or once finished.
    pub fn current_cell(&self, agent: AgentId) -> Option<CellId> {
        let i = agent.index();
        if self.kind[i] == AgentKind::Patient {
            return Some(self.home_cell[i]);
        }
        if self.finished[i] {
            return None;
        }
        self.schedules[i].queue.front().and_then(|v| v.cell.cell_id())
    }

    /// Linear lookup of an agent by its opaque identity.
    pub fn find(&self, uid: AgentUid) -> Option<AgentId> {
        self.uid
            .iter()
            .position(|&u| u == uid)
            .map(|i| AgentId(i as u32))
    }

    /// Mark every personnel agent with an empty queue as finished.
    ///
    /// Called once after schedules are built: surplus pool members that
    /// received no visit never enter the state machine.  Returns how many
    /// were retired.
    pub fn retire_unscheduled(&mut self) -> usize {
        let mut retired = 0;
        for i in 0..self.personnel_count() {
            if self.schedules[i].queue.is_empty() && !self.finished[i] {
                self.finished[i] = true;
                retired += 1;
            }
        }
        retired
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(
        uid:       Vec<AgentUid>,
        kind:      Vec<AgentKind>,
        home_cell: Vec<CellId>,
        pools:     [Range<usize>; 3],
    ) -> Self {
        let count = uid.len();
        debug_assert_eq!(kind.len(), count);
        debug_assert_eq!(home_cell.len(), count);
        let schedules = kind.iter().map(|&k| AgentSchedule::for_kind(k)).collect();
        Self {
            count,
            uid,
            kind,
            home_cell,
            time_in_cell: vec![0; count],
            finished: vec![false; count],
            schedules,
            pools,
        }
    }
}
