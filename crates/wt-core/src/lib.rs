//! `wt-core` — foundational types for the `ward_trace` hospital contact
//! simulator.
//!
//! This crate is a dependency of every other `wt-*` crate.  It has no `wt-*`
//! dependencies.
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `AgentId`, `CellId` (arena indices)                       |
//! | [`uid`]       | `AgentUid`, `UidSource`, `SeededUids`, `SequentialUids`   |
//! | [`kind`]      | `AgentKind` constant table, `PresenceRequirements`        |
//! | [`time`]      | `Tick`, `SimClock`                                        |
//! | [`config`]    | `SimConfig`, `PatientRange`, `ContactPairing`             |
//! | [`rng`]       | `SimRng`                                                  |
//! | [`error`]     | `WtError`, `WtResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;
pub mod uid;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ContactPairing, PatientRange, SimConfig};
pub use error::{WtError, WtResult};
pub use ids::{AgentId, CellId};
pub use kind::{AgentKind, PresenceRequirements};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
pub use uid::{AgentUid, SeededUids, SequentialUids, UidSource};
