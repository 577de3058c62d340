//! The person registry.
//!
//! Persons are indexed by [`PersonId`], a dense index in `0..population`. Each [`Person`]
//! carries exactly one [`DiseaseStatus`] and one [`QuarantineStatus`], the simulated day on
//! which each status was last entered, an optional age, and a [`TraceLog`] of recent
//! co-presence with other persons.
//!
//! Persons are created at population load and never removed during a run. Their state is
//! mutated by the contact model (infections, trace entries) and once per day by the
//! progression engine. Iteration over the registry is always in id order, which is what
//! makes seeded runs reproducible.

mod person;
mod registry;
mod trace_log;

pub use person::{DiseaseStatus, Person, PersonId, QuarantineStatus};
pub use registry::{PersonRecord, PersonRegistry};
pub use trace_log::{TraceEntry, TraceLog};
