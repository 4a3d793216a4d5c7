//! Per-tick visit state machine.
//!
//! ```text
//! Holding ──▶ Visiting(c0) ──▶ Visiting(c1) ──▶ … ──▶ Finished
//! ```
//!
//! [`AgentStore::step`] only updates the agent's own state and reports what
//! changed; the orchestrator applies the returned [`Step`] to the cells'
//! occupancy sets.  Keeping the two apart means the store never needs to
//! borrow a cell.

use wt_core::{AgentId, AgentKind};
use wt_schedule::CellRef;

use crate::AgentStore;

/// Outcome of one state-machine step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Patient or finished agent — not part of the state machine.
    Idle,
    /// Still within the planned duration of the current visit.
    Stay,
    /// Left `from` and entered `to`.
    Moved { from: CellRef, to: CellRef },
    /// Left `from`; the queue is drained and the agent is now finished.
    Finished { from: CellRef },
}

impl AgentStore {
    /// Advance one personnel agent by one tick.
    ///
    /// Increments the time spent at the queue head; once that reaches the
    /// head's planned duration the head is popped.  An empty queue then
    /// finishes the agent, otherwise the new head is entered with its timer
    /// reset.
    pub fn step(&mut self, agent: AgentId) -> Step {
        let i = agent.index();
        if self.finished[i] || self.kind[i] == AgentKind::Patient {
            return Step::Idle;
        }

        let queue = &mut self.schedules[i].queue;
        let Some(head) = queue.front().copied() else {
            // Never scheduled: nothing to leave.
            self.finished[i] = true;
            return Step::Finished { from: CellRef::Holding };
        };

        self.time_in_cell[i] += 1;
        if self.time_in_cell[i] < head.duration {
            return Step::Stay;
        }

        queue.pop_front();
        match queue.front() {
            None => {
                self.finished[i] = true;
                Step::Finished { from: head.cell }
            }
            Some(next) => {
                self.time_in_cell[i] = 0;
                Step::Moved { from: head.cell, to: next.cell }
            }
        }
    }
}
