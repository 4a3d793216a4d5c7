//! Agent kinds and their per-kind constants.
//!
//! All kinds share one agent representation; what differs between a doctor
//! and a visitor is looked up here rather than expressed through types.
//!
//! | Kind    | Daily allotment | Max stay / visit | Presence req. per cell |
//! |---------|-----------------|------------------|------------------------|
//! | Doctor  | 8 h (28 800)    | 30 min (1 800)   | 2 h (7 200)            |
//! | Nurse   | 8 h (28 800)    | 1 h (3 600)      | 8 h (28 800)           |
//! | Visitor | 1 h (3 600)     | 15 min (900)     | 3 h (10 800)           |
//! | Patient | —               | —                | 24 h (86 400)          |
//!
//! One tick is one simulated second.

use std::fmt;

const HOUR: u32 = 3_600;

/// What an agent is.  Patients are bound to one cell for the whole run; the
/// other three kinds are personnel with a schedule.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AgentKind {
    Doctor,
    Nurse,
    Visitor,
    Patient,
}

impl AgentKind {
    /// Kinds that receive a visit queue, in distribution and tick order.
    pub const PERSONNEL: [AgentKind; 3] = [AgentKind::Doctor, AgentKind::Nurse, AgentKind::Visitor];

    #[inline]
    pub fn is_personnel(self) -> bool {
        !matches!(self, AgentKind::Patient)
    }

    /// Position in [`Self::PERSONNEL`]; `None` for patients.
    #[inline]
    pub fn personnel_index(self) -> Option<usize> {
        match self {
            AgentKind::Doctor  => Some(0),
            AgentKind::Nurse   => Some(1),
            AgentKind::Visitor => Some(2),
            AgentKind::Patient => None,
        }
    }

    /// Total schedulable ticks per day: the shift for doctors and nurses,
    /// one hour for visitors, zero for patients.
    pub fn daily_allotment(self) -> u32 {
        match self {
            AgentKind::Doctor | AgentKind::Nurse => 8 * HOUR,
            AgentKind::Visitor => HOUR,
            AgentKind::Patient => 0,
        }
    }

    /// Upper bound on a single drawn visit duration.
    pub fn max_stay_per_visit(self) -> u32 {
        match self {
            AgentKind::Doctor  => HOUR / 2,
            AgentKind::Nurse   => HOUR,
            AgentKind::Visitor => HOUR / 4,
            AgentKind::Patient => 0,
        }
    }

    /// How much one pool member can cover in a day.  Used for pool sizing.
    #[inline]
    pub fn per_agent_capacity(self) -> u32 {
        self.daily_allotment()
    }

    /// Default aggregate presence a cell needs from this kind per day.
    pub fn default_presence_requirement(self) -> u32 {
        match self {
            AgentKind::Doctor  => 2 * HOUR,
            AgentKind::Nurse   => 8 * HOUR,
            AgentKind::Visitor => 3 * HOUR,
            AgentKind::Patient => 24 * HOUR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Doctor  => "doctor",
            AgentKind::Nurse   => "nurse",
            AgentKind::Visitor => "visitor",
            AgentKind::Patient => "patient",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PresenceRequirements ──────────────────────────────────────────────────────

/// Per-kind presence requirement table, in ticks per cell per day.
///
/// Seeded from [`AgentKind::default_presence_requirement`]; configurable so a
/// run can, say, drop the visitor requirement for an isolation ward.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PresenceRequirements {
    pub doctor:  u32,
    pub nurse:   u32,
    pub visitor: u32,
    pub patient: u32,
}

impl PresenceRequirements {
    /// A table with every requirement at zero (no personnel get scheduled).
    pub const NONE: PresenceRequirements = PresenceRequirements {
        doctor: 0,
        nurse: 0,
        visitor: 0,
        patient: 0,
    };

    pub fn for_kind(&self, kind: AgentKind) -> u32 {
        match kind {
            AgentKind::Doctor  => self.doctor,
            AgentKind::Nurse   => self.nurse,
            AgentKind::Visitor => self.visitor,
            AgentKind::Patient => self.patient,
        }
    }

    pub fn set(&mut self, kind: AgentKind, ticks: u32) {
        match kind {
            AgentKind::Doctor  => self.doctor = ticks,
            AgentKind::Nurse   => self.nurse = ticks,
            AgentKind::Visitor => self.visitor = ticks,
            AgentKind::Patient => self.patient = ticks,
        }
    }
}

impl Default for PresenceRequirements {
    fn default() -> Self {
        Self {
            doctor:  AgentKind::Doctor.default_presence_requirement(),
            nurse:   AgentKind::Nurse.default_presence_requirement(),
            visitor: AgentKind::Visitor.default_presence_requirement(),
            patient: AgentKind::Patient.default_presence_requirement(),
        }
    }
}
