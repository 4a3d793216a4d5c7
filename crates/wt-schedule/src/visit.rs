//! Core schedule types: `CellRef`, `Visit`, `VisitQueue`, and `AgentSchedule`.
//!
//! # Queue shape
//!
//! A personnel agent's queue is built once, before the first tick, and is
//! consumed strictly front to back during the run:
//!
//! ```text
//! [ Holding(delay) , Cell(c0, d0) , Cell(c1, d1) , … ]
//! ```
//!
//! The leading holding entry staggers start times across a pool.  It is only
//! ever pushed into an empty queue, and merging compares `CellRef`s, so a
//! real visit can never be folded into it.

use std::collections::VecDeque;

use wt_core::{AgentKind, CellId};

// ── CellRef ───────────────────────────────────────────────────────────────────

/// Where a queue entry places the agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellRef {
    /// Sentinel holding location.  Never registered in any cell's occupancy.
    Holding,
    /// A real hospital cell.
    Cell(CellId),
}

impl CellRef {
    /// The concrete cell, or `None` for the holding sentinel.
    #[inline]
    pub fn cell_id(self) -> Option<CellId> {
        match self {
            CellRef::Cell(c) => Some(c),
            CellRef::Holding => None,
        }
    }

    #[inline]
    pub fn is_holding(self) -> bool {
        matches!(self, CellRef::Holding)
    }
}

// ── Visit ─────────────────────────────────────────────────────────────────────

/// One queue entry: stay at `cell` for `duration` ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    pub cell:     CellRef,
    pub duration: u32,
}

// ── VisitQueue ────────────────────────────────────────────────────────────────

/// Ordered visit sequence for one agent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitQueue {
    visits: VecDeque<Visit>,
}

impl VisitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    #[inline]
    pub fn front(&self) -> Option<&Visit> {
        self.visits.front()
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<Visit> {
        self.visits.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Visit> + '_ {
        self.visits.iter()
    }

    /// Push the holding entry.  Only valid on an empty queue.
    pub fn push_holding(&mut self, delay: u32) {
        debug_assert!(self.visits.is_empty(), "holding entry must lead the queue");
        self.visits.push_back(Visit { cell: CellRef::Holding, duration: delay });
    }

    /// Append a visit to `cell`, folding it into the last entry when that
    /// entry is already the same cell.
    pub fn push_merging(&mut self, cell: CellId, duration: u32) {
        let target = CellRef::Cell(cell);
        match self.visits.back_mut() {
            Some(last) if last.cell == target => last.duration += duration,
            _ => self.visits.push_back(Visit { cell: target, duration }),
        }
    }

    /// Sum of all real visit durations (holding entry excluded).
    pub fn scheduled_ticks(&self) -> u64 {
        self.visits
            .iter()
            .filter(|v| !v.cell.is_holding())
            .map(|v| u64::from(v.duration))
            .sum()
    }

    /// Sum of real visit durations spent at `cell`.
    pub fn ticks_at(&self, cell: CellId) -> u64 {
        self.visits
            .iter()
            .filter(|v| v.cell == CellRef::Cell(cell))
            .map(|v| u64::from(v.duration))
            .sum()
    }
}

// ── AgentSchedule ─────────────────────────────────────────────────────────────

/// Scheduling state carried by each agent: its allotment budget and queue.
///
/// Patients carry an empty schedule with a zero allotment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSchedule {
    /// Ticks left to schedule.  Starts at the kind's daily allotment and only
    /// ever decreases.
    pub remaining_allotment: u32,
    pub queue: VisitQueue,
}

impl AgentSchedule {
    /// Fresh schedule holding the full daily allotment for `kind`.
    pub fn for_kind(kind: AgentKind) -> Self {
        Self {
            remaining_allotment: kind.daily_allotment(),
            queue: VisitQueue::new(),
        }
    }

    #[inline]
    pub fn is_schedulable(&self) -> bool {
        self.remaining_allotment > 0
    }

    /// Assign a visit, inserting the holding entry first if this is the
    /// agent's first assignment.
    ///
    /// # Panics
    ///
    /// Panics if `duration` exceeds the remaining allotment.  Callers bound
    /// their draw by it, so this only fires on a broken caller.
    pub fn assign(&mut self, cell: CellId, duration: u32, holding_delay: u32) {
        assert!(
            duration <= self.remaining_allotment,
            "allotment underflow: assigning {duration} ticks with {} remaining",
            self.remaining_allotment
        );
        if self.queue.is_empty() {
            self.queue.push_holding(holding_delay);
        }
        self.queue.push_merging(cell, duration);
        self.remaining_allotment -= duration;
    }
}
