//! The `Hospital` struct and its tick loop.

use tracing::{debug, info};

use wt_agent::{AgentStore, Step};
use wt_core::{AgentId, CellId, SimClock, SimConfig, Tick, WtError};
use wt_schedule::CellRef;

use crate::{Cell, ContactLog, NoopObserver, SimObserver, SimResult};

// ── TickReport ────────────────────────────────────────────────────────────────

/// What happened during one call to [`Hospital::tick`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick:        Tick,
    /// Agents that changed cell or finished.
    pub transitions: usize,
    /// Records appended to the contact log.
    pub contacts:    usize,
}

// ── Hospital ──────────────────────────────────────────────────────────────────

/// The simulation world: cells, agents, the calendar clock and the contact
/// log.
///
/// Each tick runs two phases:
///
/// 1. **Step**: every personnel agent advances its visit queue in ascending
///    `AgentId` order; the resulting transitions are applied to cell
///    occupancy immediately.
/// 2. **Emit** (logging ticks only): the clock advances by
///    `clock_step_secs`, then every cell, in ascending `CellId` order,
///    appends one record per co-resident pair.
///
/// Create via [`HospitalBuilder`][crate::HospitalBuilder] or
/// [`Hospital::new`] for hand-built schedules.
pub struct Hospital {
    pub config: SimConfig,

    /// Calendar time used to stamp contact records.
    pub clock: SimClock,

    /// Index of the next tick to run.
    pub tick: Tick,

    /// Cells indexed by `CellId`.
    pub cells: Vec<Cell>,

    pub agents: AgentStore,

    pub log: ContactLog,
}

impl Hospital {
    /// Assemble a hospital from a finished agent store.
    ///
    /// Creates `config.cell_count` empty cells and enters every patient into
    /// its home cell.  Personnel start outside all cells; their schedules must
    /// already be complete.
    ///
    /// # Errors
    ///
    /// - [`SimError::Core`][crate::SimError::Core] if `config` fails validation, or a patient's home
    ///   cell or a queued visit names a cell that does not exist.
    pub fn new(config: SimConfig, agents: AgentStore) -> SimResult<Self> {
        config.validate()?;
        let cell_count = config.cell_count;
        let in_range = |cell: CellId| -> SimResult<()> {
            if cell.index() < cell_count {
                Ok(())
            } else {
                Err(WtError::CellNotFound(cell).into())
            }
        };
        for agent in agents.personnel_ids() {
            for visit in agents.schedule(agent).queue.iter() {
                if let Some(cell) = visit.cell.cell_id() {
                    in_range(cell)?;
                }
            }
        }

        let mut cells: Vec<Cell> = (0..cell_count)
            .map(|c| Cell::new(CellId(c as u32)))
            .collect();
        for patient in agents.patient_ids() {
            let home = agents.home_cell[patient.index()];
            in_range(home)?;
            cells[home.index()].enter(patient);
        }
        Ok(Self {
            clock: config.make_clock(),
            tick: Tick::ZERO,
            cells,
            agents,
            log: ContactLog::new(),
            config,
        })
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        let end = self.config.end_tick();
        let mut contacts = 0;
        while self.tick < end {
            contacts += self.process_tick(observer).contacts;
        }
        info!(
            ticks = self.tick.0,
            contacts,
            total = self.log.len(),
            sim_time = %self.clock,
            "simulation finished"
        );
        observer.on_sim_end(self.tick, &self.log);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.  Does not call
    /// `on_sim_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.process_tick(observer);
        }
    }

    /// Advance one tick without an observer.
    pub fn tick(&mut self) -> TickReport {
        self.process_tick(&mut NoopObserver)
    }

    pub fn contact_log(&self) -> &ContactLog {
        &self.log
    }

    pub fn into_log(self) -> ContactLog {
        self.log
    }

    /// `true` once every personnel agent has finished its queue.
    pub fn all_finished(&self) -> bool {
        self.agents.personnel_ids().all(|a| self.agents.is_finished(a))
    }

    /// The cell currently holding `agent`, found by scanning occupancy.
    pub fn locate(&self, agent: AgentId) -> Option<CellId> {
        self.cells.iter().find(|c| c.contains(agent)).map(|c| c.id)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) -> TickReport {
        let now = self.tick;
        observer.on_tick_start(now);

        let transitions = self.step_agents();

        let mut contacts = 0;
        if now.is_logging_tick(self.config.log_interval_ticks) {
            self.clock.advance_secs(self.config.clock_step_secs);
            let start = self.log.len();
            self.emit_contacts();
            contacts = self.log.len() - start;
            observer.on_contacts(now, self.clock.now(), self.log.since(start));
            debug!(tick = now.0, contacts, at = %self.clock.now(), "logged contacts");
        }

        observer.on_tick_end(now, transitions);
        self.tick = now + 1;
        TickReport { tick: now, transitions, contacts }
    }

    /// Step every personnel agent and apply the resulting moves.
    fn step_agents(&mut self) -> usize {
        let mut transitions = 0;
        for agent in self.agents.personnel_ids() {
            match self.agents.step(agent) {
                Step::Idle | Step::Stay => continue,
                Step::Moved { from, to } => {
                    self.leave(from, agent);
                    self.enter(to, agent);
                }
                Step::Finished { from } => self.leave(from, agent),
            }
            transitions += 1;
        }
        transitions
    }

    fn enter(&mut self, cell: CellRef, agent: AgentId) {
        if let Some(id) = cell.cell_id() {
            self.cells[id.index()].enter(agent);
        }
    }

    fn leave(&mut self, cell: CellRef, agent: AgentId) {
        if let Some(id) = cell.cell_id() {
            self.cells[id.index()].leave(agent);
        }
    }

    /// Append this tick's records for every cell, in `CellId` order.
    ///
    /// With the `parallel` feature, per-cell batches are built on Rayon's
    /// thread pool and concatenated in cell order afterwards.
    fn emit_contacts(&mut self) {
        let timestamp = self.clock.now();
        let pairing = self.config.pairing;
        let uids = self.agents.uid.as_slice();

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            let batches: Vec<_> = self
                .cells
                .par_iter()
                .map(|cell| cell.contacts(timestamp, pairing, uids))
                .collect();
            for batch in batches {
                self.log.extend(batch);
            }
        }

        #[cfg(not(feature = "parallel"))]
        {
            for cell in &self.cells {
                cell.periodic_emit(timestamp, pairing, uids, &mut self.log);
            }
        }
    }
}
