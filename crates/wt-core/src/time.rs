//! Simulation time model.
//!
//! # Design
//!
//! Two clocks run side by side:
//!
//! - `Tick` — the global step counter.  One tick is one simulated second, so
//!   all visit durations and presence requirements are exact integers.
//! - `SimClock` — the simulated calendar stamped onto contact records.  It
//!   does *not* follow every tick: the orchestrator advances it by a fixed
//!   step on each logging tick only.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// `true` on ticks where `tick mod interval == 0`.  Always `false` for a
    /// zero interval.
    #[inline]
    pub fn is_logging_tick(self, interval: u64) -> bool {
        interval > 0 && self.0.is_multiple_of(interval)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulated calendar: a fixed start instant plus elapsed seconds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Calendar instant of the start of the run.
    pub start: DateTime<Utc>,
    /// Simulated seconds added so far by [`SimClock::advance_secs`].
    pub elapsed_secs: i64,
}

impl SimClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { start, elapsed_secs: 0 }
    }

    /// Current simulated timestamp.
    #[inline]
    pub fn now(&self) -> DateTime<Utc> {
        self.start + TimeDelta::seconds(self.elapsed_secs)
    }

    /// Move the calendar forward by `secs` seconds.
    #[inline]
    pub fn advance_secs(&mut self, secs: u32) {
        self.elapsed_secs += i64::from(secs);
    }

    /// Break elapsed time into (day, hour, minute) components from the start.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs.max(0) as u64;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.now().to_rfc3339(), d, h, m)
    }
}
