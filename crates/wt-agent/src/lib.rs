//! `wt-agent` — Structure-of-Arrays agent arena for the `ward_trace`
//! simulator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`store`]     | `AgentStore` (SoA arrays, personnel pools)                |
//! | [`builder`]   | `AgentStoreBuilder` (fluent construction)                 |
//! | [`step`]      | `Step`, `AgentStore::step` (per-tick state machine)       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Propagates serde derives to `wt-core` / `wt-schedule` types. |

pub mod builder;
pub mod step;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use step::Step;
pub use store::AgentStore;
