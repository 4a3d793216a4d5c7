//! Personnel pool sizing.
//!
//! Pools are sized once, before any queue is filled, so that the total
//! capacity of a pool covers the summed requirement of every cell:
//!
//! ```text
//! required(kind) = ceil(cell_count × per_cell_requirement(kind) / per_agent_capacity(kind))
//! ```
//!
//! With that sizing the distribute loop can always find a schedulable agent
//! while a cell still has requirement left.

use wt_core::{AgentKind, PresenceRequirements};

/// Number of `kind` agents needed to cover `per_cell_requirement` ticks at
/// each of `cell_count` cells.  Zero for patients and for kinds with no
/// capacity.
pub fn required_personnel(kind: AgentKind, cell_count: usize, per_cell_requirement: u32) -> u32 {
    let capacity = u64::from(kind.per_agent_capacity());
    if !kind.is_personnel() || capacity == 0 {
        return 0;
    }
    let total = cell_count as u64 * u64::from(per_cell_requirement);
    u32::try_from(total.div_ceil(capacity)).unwrap_or(u32::MAX)
}

/// Pool sizes for the three personnel kinds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Staffing {
    pub doctors:  u32,
    pub nurses:   u32,
    pub visitors: u32,
}

impl Staffing {
    /// Size every pool with [`required_personnel`].
    pub fn required(cell_count: usize, presence: &PresenceRequirements) -> Self {
        let mut staffing = Staffing::default();
        for kind in AgentKind::PERSONNEL {
            staffing.set(kind, required_personnel(kind, cell_count, presence.for_kind(kind)));
        }
        staffing
    }

    /// Pool size for `kind` (zero for patients).
    pub fn get(&self, kind: AgentKind) -> u32 {
        match kind {
            AgentKind::Doctor  => self.doctors,
            AgentKind::Nurse   => self.nurses,
            AgentKind::Visitor => self.visitors,
            AgentKind::Patient => 0,
        }
    }

    /// Set the pool size for `kind`.  Ignored for patients.
    pub fn set(&mut self, kind: AgentKind, n: u32) {
        match kind {
            AgentKind::Doctor  => self.doctors = n,
            AgentKind::Nurse   => self.nurses = n,
            AgentKind::Visitor => self.visitors = n,
            AgentKind::Patient => {}
        }
    }

    pub fn total(&self) -> u64 {
        [self.doctors, self.nurses, self.visitors].into_iter().map(u64::from).sum()
    }
}
