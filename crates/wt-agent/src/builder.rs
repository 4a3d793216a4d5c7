//! Fluent builder for constructing an `AgentStore` in one step.
//!
//! # Usage
//!
//! ```rust
//! use wt_agent::AgentStoreBuilder;
//! use wt_core::{AgentKind, CellId, SequentialUids};
//!
//! let store = AgentStoreBuilder::new()
//!     .pool(AgentKind::Doctor, 2)
//!     .pool(AgentKind::Nurse, 3)
//!     .patients(CellId(0), 4)
//!     .build(&mut SequentialUids::default());
//!
//! assert_eq!(store.count, 9);
//! assert_eq!(store.pool_len(AgentKind::Nurse), 3);
//! ```

use wt_core::{AgentKind, CellId, UidSource};

use crate::AgentStore;

/// Fluent builder for [`AgentStore`].
///
/// Call order does not matter: `build` always lays agents out as doctors,
/// nurses, visitors, then patients grouped by cell in the order added.
#[derive(Default)]
pub struct AgentStoreBuilder {
    pool_sizes: [u32; 3],
    patients:   Vec<(CellId, u32)>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pool size for a personnel kind.  Patients are added with
    /// [`patients`](Self::patients) instead; passing `Patient` is a no-op.
    pub fn pool(mut self, kind: AgentKind, n: u32) -> Self {
        if let Some(i) = kind.personnel_index() {
            self.pool_sizes[i] = n;
        }
        self
    }

    /// Add `n` patients bound to `cell`.
    pub fn patients(mut self, cell: CellId, n: u32) -> Self {
        self.patients.push((cell, n));
        self
    }

    /// Add patients for every cell from a census vector indexed by `CellId`.
    pub fn census(mut self, counts: &[u32]) -> Self {
        self.patients.extend(
            counts
                .iter()
                .enumerate()
                .map(|(c, &n)| (CellId(c as u32), n)),
        );
        self
    }

    /// Number of agents `build` will allocate.
    pub fn agent_count(&self) -> usize {
        let personnel: usize = self.pool_sizes.iter().map(|&n| n as usize).sum();
        let patients: usize = self.patients.iter().map(|&(_, n)| n as usize).sum();
        personnel + patients
    }

    /// Allocate every SoA array and draw one uid per agent from `uids`.
    pub fn build(self, uids: &mut dyn UidSource) -> AgentStore {
        let total = self.agent_count();

        let mut kind      = Vec::with_capacity(total);
        let mut home_cell = Vec::with_capacity(total);
        let mut pools: [std::ops::Range<usize>; 3] = Default::default();

        for (i, pool_kind) in AgentKind::PERSONNEL.into_iter().enumerate() {
            let start = kind.len();
            let n = self.pool_sizes[i] as usize;
            kind.extend(std::iter::repeat_n(pool_kind, n));
            home_cell.extend(std::iter::repeat_n(CellId::INVALID, n));
            pools[i] = start..kind.len();
        }

        for (cell, n) in self.patients {
            kind.extend(std::iter::repeat_n(AgentKind::Patient, n as usize));
            home_cell.extend(std::iter::repeat_n(cell, n as usize));
        }

        let uid = (0..total).map(|_| uids.next_uid()).collect();
        AgentStore::new(uid, kind, home_cell, pools)
    }
}
