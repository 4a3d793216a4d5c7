//! `wt-schedule` — personnel visit queues and the schedule builder.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`visit`]       | `CellRef`, `Visit`, `VisitQueue`, `AgentSchedule`       |
//! | [`staffing`]    | `required_personnel`, `Staffing`                        |
//! | [`distribute`]  | `CellDemand`, `PoolCursor`, `distribute`                |
//! | [`census`]      | `load_census_csv`, `load_census_reader`                 |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                    |
//!
//! # Build model (summary)
//!
//! ```text
//! pool size(kind)   = ceil(cells × requirement(kind) / capacity(kind))
//! for cell in cells:
//!     for kind in [Doctor, Nurse, Visitor]:
//!         distribute(cell demand, pool(kind))
//! ```
//!
//! Every queue is complete before the first simulation tick.

pub mod census;
pub mod distribute;
pub mod error;
pub mod staffing;
pub mod visit;

#[cfg(test)]
mod tests;

pub use census::{load_census_csv, load_census_reader};
pub use distribute::{CellDemand, PoolCursor, distribute};
pub use error::{ScheduleError, ScheduleResult};
pub use staffing::{Staffing, required_personnel};
pub use visit::{AgentSchedule, CellRef, Visit, VisitQueue};
