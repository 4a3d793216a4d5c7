//! Fluent builder for constructing a [`Hospital`].

use tracing::{info, warn};

use wt_agent::AgentStoreBuilder;
use wt_core::{AgentKind, CellId, SeededUids, SimConfig, SimRng, UidSource};
use wt_schedule::{CellDemand, PoolCursor, Staffing, distribute};

use crate::{Hospital, SimError, SimResult};

/// Stream offset for the default uid generator's seed.
const UID_STREAM: u64 = 0x5549_4453;

/// Fluent builder for [`Hospital`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                        |
/// |------------------------|------------------------------------------------|
/// | `.patient_counts(v)`   | Drawn per cell from `config.patients_per_cell` |
/// | `.pool_size(kind, n)`  | `ceil(cells × requirement / capacity)`         |
/// | `.uid_source(s)`       | `SeededUids` seeded from the build RNG         |
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = SimRng::new(config.seed);
/// let mut hospital = HospitalBuilder::new(config)
///     .patient_counts(vec![2, 3, 1])
///     .build(&mut rng)?;
/// hospital.run(&mut NoopObserver);
/// ```
pub struct HospitalBuilder {
    config:         SimConfig,
    patient_counts: Option<Vec<u32>>,
    pool_sizes:     [Option<u32>; 3],
    uids:           Option<Box<dyn UidSource>>,
    patient_pool:   bool,
}

impl HospitalBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            patient_counts: None,
            pool_sizes:     [None; 3],
            uids:           None,
            patient_pool:   false,
        }
    }

    /// Patients per cell (must be length `config.cell_count`).
    pub fn patient_counts(mut self, counts: Vec<u32>) -> Self {
        self.patient_counts = Some(counts);
        self
    }

    /// Override the pool size for a personnel kind.
    ///
    /// A pool smaller than the required size cannot cover every cell, and
    /// the build fails with a capacity error.  Patients are not pooled, so
    /// asking for a patient pool fails the build with [`SimError::Config`].
    pub fn pool_size(mut self, kind: AgentKind, n: u32) -> Self {
        match kind.personnel_index() {
            Some(i) => self.pool_sizes[i] = Some(n),
            None => self.patient_pool = true,
        }
        self
    }

    /// Replace the default identity generator.
    pub fn uid_source(mut self, uids: Box<dyn UidSource>) -> Self {
        self.uids = Some(uids);
        self
    }

    /// Populate the hospital and build every personnel schedule.
    ///
    /// Draws come from `rng` in a fixed order (patient counts, uid seed,
    /// then each cell's distribution for Doctor, Nurse, Visitor), so a given
    /// seed always produces the same hospital.
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] if a patient pool size was requested.
    /// - [`SimError::Core`] if `config` fails validation.
    /// - [`SimError::CountMismatch`] if `patient_counts` has the wrong length.
    /// - [`SimError::Schedule`] if a pool cannot cover its requirement.
    pub fn build(self, rng: &mut SimRng) -> SimResult<Hospital> {
        if self.patient_pool {
            return Err(SimError::Config(
                "patients are not pooled; use patient_counts instead".into(),
            ));
        }
        let config = self.config;
        config.validate()?;
        let cell_count = config.cell_count;

        let census = match self.patient_counts {
            Some(counts) => {
                if counts.len() != cell_count {
                    return Err(SimError::CountMismatch {
                        expected: cell_count,
                        got:      counts.len(),
                        what:     "patient_counts",
                    });
                }
                counts
            }
            None => {
                let range = config.patients_per_cell;
                (0..cell_count)
                    .map(|_| rng.gen_range(range.min..=range.max))
                    .collect()
            }
        };

        let mut staffing = Staffing::required(cell_count, &config.presence);
        for kind in AgentKind::PERSONNEL {
            let Some(i) = kind.personnel_index() else { continue };
            let Some(n) = self.pool_sizes[i] else { continue };
            let required = staffing.get(kind);
            if n < required {
                warn!(kind = %kind, requested = n, required, "pool smaller than required");
            }
            staffing.set(kind, n);
        }

        let uid_seed = rng.child_seed(UID_STREAM);
        let mut uids = self
            .uids
            .unwrap_or_else(|| Box::new(SeededUids::new(uid_seed)));

        let mut agents = AgentStoreBuilder::new()
            .pool(AgentKind::Doctor, staffing.doctors)
            .pool(AgentKind::Nurse, staffing.nurses)
            .pool(AgentKind::Visitor, staffing.visitors)
            .census(&census)
            .build(&mut *uids);

        let mut cursors = [PoolCursor::new(); 3];
        for c in 0..cell_count {
            let cell = CellId(c as u32);
            for (cursor, kind) in cursors.iter_mut().zip(AgentKind::PERSONNEL) {
                let mut demand = CellDemand::new(cell, kind, config.presence.for_kind(kind));
                distribute(
                    &mut demand,
                    agents.pool_mut(kind),
                    cursor,
                    kind.max_stay_per_visit(),
                    rng,
                    config.distribute_iteration_cap,
                )?;
            }
        }
        let retired = agents.retire_unscheduled();

        info!(
            cells = cell_count,
            patients = census.iter().map(|&n| u64::from(n)).sum::<u64>(),
            doctors = staffing.doctors,
            nurses = staffing.nurses,
            visitors = staffing.visitors,
            personnel = staffing.total(),
            retired,
            "hospital built"
        );
        Hospital::new(config, agents)
    }
}

impl Hospital {
    /// Build with explicit per-cell patient counts and default pools.
    pub fn build(config: SimConfig, patient_counts: Vec<u32>, rng: &mut SimRng) -> SimResult<Self> {
        HospitalBuilder::new(config).patient_counts(patient_counts).build(rng)
    }
}
