//! `wt-sim` — hospital orchestrator for the `ward_trace` simulator.
//!
//! # Tick loop
//!
//! ```text
//! build:
//!   patients enter their home cells
//!   for cell in cells, for kind in [Doctor, Nurse, Visitor]:
//!       distribute(cell demand, pool(kind))
//!
//! for tick in 0..config.total_ticks:
//!   ① Step  — each personnel agent advances its visit queue
//!             (ascending AgentId); moves update cell occupancy.
//!   ② Emit  — on tick % log_interval == 0: clock += clock_step_secs,
//!             then each cell appends one record per co-resident pair.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Builds per-cell contact batches on Rayon's thread pool.   |
//! | `fx-hash`  | FxHash occupancy sets instead of SipHash.                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wt_core::{SimConfig, SimRng};
//! use wt_sim::{HospitalBuilder, NoopObserver};
//!
//! let config = SimConfig::default();
//! let mut rng = SimRng::new(config.seed);
//! let mut hospital = HospitalBuilder::new(config).build(&mut rng)?;
//! hospital.run(&mut NoopObserver);
//! println!("{} contacts", hospital.log.len());
//! ```

pub mod builder;
pub mod cell;
pub mod contact;
pub mod error;
pub mod hospital;
pub mod observer;


pub use builder::HospitalBuilder;
pub use cell::Cell;
pub use contact::{ContactLog, ContactRecord, contacts_of, met_with};
pub use error::{SimError, SimResult};
pub use hospital::{Hospital, TickReport};
pub use observer::{NoopObserver, SimObserver};
