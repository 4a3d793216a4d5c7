//! Quota-respecting distribution of cell presence across a personnel pool.
//!
//! # Algorithm
//!
//! For one (cell, kind) demand, walk the pool with a wrap-around index while
//! the cell still needs presence:
//!
//! 1. skip agents whose allotment is spent;
//! 2. draw `d` uniformly from `[0, min(remaining_allotment, max_stay, cell_remaining)]`;
//! 3. append `(cell, d)` to the agent's queue, merging into the last entry if
//!    it is the same cell (the very first assignment is preceded by a holding
//!    entry whose delay is the previous first visit handed out in this pool);
//! 4. subtract `d` from both the agent's allotment and the cell's remainder.
//!
//! Because every draw is bounded by the cell's remainder, a cell ends up with
//! exactly its requirement, never more.
//!
//! The walk uses an explicit index into a fixed slice rather than a cycling
//! iterator: termination depends only on the shrinking remainder, and the
//! pool slice stays mutably borrowed for the whole call.

use tracing::debug;

use wt_core::{AgentKind, CellId, SimRng};

use crate::{AgentSchedule, ScheduleError, ScheduleResult};

// ── CellDemand ────────────────────────────────────────────────────────────────

/// A cell's outstanding presence requirement for one kind.  Exists only while
/// schedules are being built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellDemand {
    pub cell:      CellId,
    pub kind:      AgentKind,
    pub remaining: u32,
}

impl CellDemand {
    pub fn new(cell: CellId, kind: AgentKind, requirement: u32) -> Self {
        Self { cell, kind, remaining: requirement }
    }

    #[inline]
    pub fn is_met(&self) -> bool {
        self.remaining == 0
    }
}

// ── PoolCursor ────────────────────────────────────────────────────────────────

/// Persistent walk position over one pool, shared by every cell's demand so
/// load spreads across the pool instead of draining its first member.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolCursor {
    next: usize,
    /// Duration of the most recent first real visit handed out in this pool;
    /// becomes the holding delay of the next agent to get its first visit.
    stagger: u32,
}

impl PoolCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current index, then step forward with wrap-around.
    #[inline]
    fn advance(&mut self, len: usize) -> usize {
        let idx = self.next % len;
        self.next = (idx + 1) % len;
        idx
    }
}

// ── distribute ────────────────────────────────────────────────────────────────

/// Cover `demand` from `pool`, drawing visit durations from `rng`.
///
/// Returns the number of ticks assigned (always the full requirement on
/// success).
///
/// # Errors
///
/// - [`ScheduleError::CapacityExhausted`] once a full lap of the pool finds
///   nobody with allotment left (or the pool is empty).
/// - [`ScheduleError::IterationCapExceeded`] if the walk runs longer than
///   `iteration_cap` steps.
pub fn distribute(
    demand:        &mut CellDemand,
    pool:          &mut [AgentSchedule],
    cursor:        &mut PoolCursor,
    max_stay:      u32,
    rng:           &mut SimRng,
    iteration_cap: u64,
) -> ScheduleResult<u32> {
    let requirement = demand.remaining;
    let mut iterations: u64 = 0;
    // Consecutive unschedulable agents seen; a full lap means exhaustion.
    let mut idle_streak: usize = 0;

    while demand.remaining > 0 {
        if pool.is_empty() || idle_streak >= pool.len() {
            return Err(ScheduleError::CapacityExhausted {
                cell:      demand.cell,
                kind:      demand.kind,
                remaining: demand.remaining,
            });
        }
        if iterations >= iteration_cap {
            return Err(ScheduleError::IterationCapExceeded {
                cell:       demand.cell,
                kind:       demand.kind,
                iterations,
            });
        }
        iterations += 1;

        let slot = &mut pool[cursor.advance(pool.len())];
        if !slot.is_schedulable() {
            idle_streak += 1;
            continue;
        }
        idle_streak = 0;

        let bound = slot
            .remaining_allotment
            .min(max_stay)
            .min(demand.remaining);
        let duration = rng.gen_range(0..=bound);

        let first_visit = slot.queue.is_empty();
        slot.assign(demand.cell, duration, cursor.stagger);
        if first_visit {
            cursor.stagger = duration;
        }
        demand.remaining -= duration;
    }

    debug!(
        cell = demand.cell.0,
        kind = %demand.kind,
        requirement,
        iterations,
        "distributed presence"
    );
    Ok(requirement)
}
