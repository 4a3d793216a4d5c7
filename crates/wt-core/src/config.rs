//! Top-level run configuration.
//!
//! Typically loaded from a JSON file by the application crate (every field
//! has a default, so a partial file is fine) and passed to
//! `HospitalBuilder`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{PresenceRequirements, SimClock, Tick, WtError, WtResult};

/// 2024-01-01T00:00:00Z, the default start of the simulated day.
const DEFAULT_START_UNIX_SECS: i64 = 1_704_067_200;

// ── PatientRange ──────────────────────────────────────────────────────────────

/// Inclusive range from which each cell's initial patient count is drawn
/// when no explicit census is supplied.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientRange {
    pub min: u32,
    pub max: u32,
}

impl Default for PatientRange {
    fn default() -> Self {
        Self { min: 1, max: 4 }
    }
}

// ── ContactPairing ────────────────────────────────────────────────────────────

/// How co-resident pairs are turned into contact records.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContactPairing {
    /// One record per ordered pair: `(a, b)` and `(b, a)`.  Wire-compatible
    /// with earlier contact lists, whose consumers read directed edges.
    #[default]
    Directed,
    /// One record per unordered pair, lower `AgentId` first.
    Unordered,
}

impl ContactPairing {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactPairing::Directed  => "directed",
            ContactPairing::Unordered => "unordered",
        }
    }
}

impl fmt::Display for ContactPairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactPairing {
    type Err = WtError;

    fn from_str(s: &str) -> WtResult<Self> {
        match s.trim() {
            "directed"  => Ok(ContactPairing::Directed),
            "unordered" => Ok(ContactPairing::Unordered),
            other => Err(WtError::Parse(format!(
                "invalid pairing {other:?}: expected \"directed\" or \"unordered\""
            ))),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Everything a run needs apart from the RNG and the patient census.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Calendar instant of tick 0.
    pub start: DateTime<Utc>,

    /// Ticks to simulate.  One simulated day at one tick per second: 86 400.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Number of cells in the hospital.
    pub cell_count: usize,

    /// Range for randomly drawn per-cell patient counts.
    pub patients_per_cell: PatientRange,

    /// Contacts are emitted on ticks where `tick % log_interval_ticks == 0`.
    pub log_interval_ticks: u64,

    /// Seconds the simulated calendar advances on each logging tick.
    pub clock_step_secs: u32,

    /// Per-kind presence requirement table used when building schedules.
    pub presence: PresenceRequirements,

    /// Directed (both orderings) or unordered pair emission.
    pub pairing: ContactPairing,

    /// Hard cap on loop iterations of a single distribute call.
    pub distribute_iteration_cap: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start)
    }

    /// Reject configurations the simulator cannot run.
    pub fn validate(&self) -> WtResult<()> {
        if self.cell_count == 0 {
            return Err(WtError::Config("cell_count must be > 0".into()));
        }
        if self.log_interval_ticks == 0 {
            return Err(WtError::Config("log_interval_ticks must be > 0".into()));
        }
        if self.patients_per_cell.min > self.patients_per_cell.max {
            return Err(WtError::Config(format!(
                "patients_per_cell.min ({}) exceeds max ({})",
                self.patients_per_cell.min, self.patients_per_cell.max
            )));
        }
        if self.distribute_iteration_cap == 0 {
            return Err(WtError::Config("distribute_iteration_cap must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start:                    DateTime::<Utc>::UNIX_EPOCH
                + TimeDelta::seconds(DEFAULT_START_UNIX_SECS),
            total_ticks:              86_400,
            seed:                     42,
            cell_count:               10,
            patients_per_cell:        PatientRange::default(),
            log_interval_ticks:       30,
            clock_step_secs:          30,
            presence:                 PresenceRequirements::default(),
            pairing:                  ContactPairing::Directed,
            distribute_iteration_cap: 1_000_000,
        }
    }
}
