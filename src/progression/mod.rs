//! The progression engine advances every person's disease and quarantine state once per
//! simulated day.
//!
//! Disease course (days since infection):
//!
//! ```text
//! susceptible -> infectedButNotContagious -(4)-> contagious -(6, 80%)-> showingSymptoms
//!                                               \-(16)-> recovered        |
//!                                                       (10, age) seriouslySick <-(20)- critical
//!                                                              |  \-(11, age)-----------^
//!                                                              \-(23)-> recovered
//! ```
//!
//! A contagious person who is detected (tracing on, 10% per day) or develops symptoms goes
//! into home quarantine. With tracing on, everyone in their trace log since the day they
//! became contagious is quarantined too. That cross-person write is not done through the
//! person being advanced: [`advance`] returns the contacts as commands in a
//! [`ProgressionOutcome`], and [`advance_all`] applies them through the registry.

mod age;
mod handlers;

pub use age::{AgeTable, CRITICAL, MAX_AGE, MIN_AGE, SERIOUSLY_SICK};
pub use handlers::{
    CRITICAL_DAY, CRITICAL_STEP_DOWN_DAY, DAYS_TO_CONTAGIOUS, DETECTION_PROBABILITY,
    QUARANTINE_DAYS, RECOVERY_DAY, SERIOUSLY_SICK_DAY, SERIOUSLY_SICK_RECOVERY_DAY, SYMPTOM_DAY,
    SYMPTOM_PROBABILITY,
};

use log::debug;
use serde::Serialize;

use crate::error::EpisimError;
use crate::events::{day_start, SECONDS_PER_DAY};
use crate::people::{DiseaseStatus, Person, PersonId, PersonRegistry};
use crate::random::RandomSource;
use crate::report::InfectionReport;
use handlers::{handler_for, ProgressionStep};

/// Trace entries older than this many days are dropped every day.
pub const TRACE_RETENTION_DAYS: u32 = 7;

/// A disease status change made by the progression engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub person: PersonId,
    pub day: u32,
    pub status: DiseaseStatus,
}

/// What advancing one person produced besides the person's own new state.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProgressionOutcome {
    pub changes: Vec<StatusChange>,
    /// Traced contacts to put into quarantine. May contain duplicates.
    pub quarantine: Vec<PersonId>,
}

/// Advances `person` by one day and prunes their trace log.
///
/// # Errors
///
/// Returns `EpisimError::ImplausibleAge` when an age-dependent transition is evaluated for a
/// person whose age is outside `[0, 120]`, and `EpisimError::MissingInfectionDay` when an
/// infected person has no recorded infection day.
pub fn advance(
    person: &mut Person,
    day: u32,
    rng: &mut dyn RandomSource,
    tracing: bool,
) -> Result<ProgressionOutcome, EpisimError> {
    let handler = handler_for(person.disease_status());
    let mut step = ProgressionStep {
        person,
        day,
        rng,
        tracing,
        outcome: ProgressionOutcome::default(),
    };
    handler.advance(&mut step)?;

    let ProgressionStep { person, outcome, .. } = step;
    let cutoff = day_start(day) - f64::from(TRACE_RETENTION_DAYS) * SECONDS_PER_DAY;
    person.trace_log_mut().prune_before(cutoff);
    Ok(outcome)
}

/// Advances every person in id order, applying quarantine commands as they are produced.
/// Returns all status changes of the day.
///
/// # Errors
///
/// Stops at the first error; see [`advance`].
pub fn advance_all(
    registry: &mut PersonRegistry,
    day: u32,
    rng: &mut dyn RandomSource,
    tracing: bool,
) -> Result<Vec<StatusChange>, EpisimError> {
    let mut changes = Vec::new();
    let mut quarantined = 0_usize;
    for id in registry.ids() {
        let outcome = advance(registry.get_mut(id)?, day, rng, tracing)?;
        for contact in outcome.quarantine {
            if registry.quarantine_contact(contact, day)? {
                quarantined += 1;
            }
        }
        changes.extend(outcome.changes);
    }
    debug!(
        "day {day}: {} status changes, {quarantined} traced contacts quarantined",
        changes.len()
    );
    Ok(changes)
}

/// Whether the simulation still has anything to do.
#[must_use]
pub fn can_progress(report: &InfectionReport) -> bool {
    report.n_total_infected > 0 || report.n_in_quarantine > 0
}
