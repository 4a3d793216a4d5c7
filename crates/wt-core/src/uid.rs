//! Opaque agent identities written to the contact log.
//!
//! `AgentId` is an arena index and is only meaningful inside one run.  Every
//! agent also carries an `AgentUid` — a v4 UUID — which is what downstream
//! contact-tracing tools see.  UUIDs come from a [`UidSource`] so tests and
//! reproducible runs can draw them from a seeded stream.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Globally unique identity of one agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentUid(pub Uuid);

impl AgentUid {
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AgentUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl std::str::FromStr for AgentUid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(AgentUid)
    }
}

// ── UidSource ─────────────────────────────────────────────────────────────────

/// Produces a fresh, unique [`AgentUid`] per call.
pub trait UidSource {
    fn next_uid(&mut self) -> AgentUid;
}

/// Deterministic v4 UUIDs drawn from a seeded `SmallRng`.
///
/// Two `SeededUids` built from the same seed yield the same sequence, which is
/// what makes whole runs (contact log included) reproducible.
pub struct SeededUids(SmallRng);

impl SeededUids {
    pub fn new(seed: u64) -> Self {
        SeededUids(SmallRng::seed_from_u64(seed))
    }
}

impl UidSource for SeededUids {
    fn next_uid(&mut self) -> AgentUid {
        let bytes: [u8; 16] = self.0.r#gen();
        AgentUid(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

/// Sequential UUIDs (`00000000-0000-0000-0000-000000000001`, …).
///
/// Handy in tests where a readable id beats a random one.
#[derive(Default)]
pub struct SequentialUids {
    next: u128,
}

impl UidSource for SequentialUids {
    fn next_uid(&mut self) -> AgentUid {
        self.next += 1;
        AgentUid(Uuid::from_u128(self.next))
    }
}
