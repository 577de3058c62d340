//! A day-stepped engine for agent-based epidemic simulations driven by recorded mobility.
//!
//! Movement and contact opportunities of the population come from outside, as a stream of
//! activity events. This crate provides the parts that turn them into an epidemic:
//! * The progression engine (`progression`) moves every person through the disease
//!   states once per day, with age-dependent probabilities for severe courses, and
//!   quarantines the traced contacts of detected or symptomatic persons.
//! * The restriction engine (`policy`) decides, once per day, which fraction of every
//!   activity type may still take place. Fractions come from administrative closures,
//!   from observed mobility reductions, or from both.
//! * The day loop (`simulation`) runs policy, contact model and progression in that order
//!   and emits an `InfectionReport` per day.
//!
//! A run is reproducible: all randomness comes from a single seeded stream passed
//! explicitly into the engines, and persons are always processed in id order.
//!
//! The contact model itself, which decides who infects whom, is supplied by the user
//! through the `ContactModel` trait.
pub mod analysis;
pub mod error;
pub mod events;
pub mod hashing;
pub mod log;
#[macro_use]
mod macros;
pub mod numeric;
pub mod params;
pub mod people;
pub mod policy;
pub mod progression;
pub mod random;
pub mod report;
pub mod simulation;

pub use error::EpisimError;
pub use hashing::{HashMap, HashSet};
pub use params::SimulationParams;
pub use people::{DiseaseStatus, Person, PersonId, PersonRegistry, QuarantineStatus};
pub use policy::{AdjustedPolicy, FixedPolicy, PolicyConfig, Restriction, Restrictions, ShutdownPolicy};
pub use random::{RandomSource, SimulationRng};
pub use report::InfectionReport;
pub use simulation::{ContactModel, DayOutcome, Simulation};
