//! One handler per disease status. Unless noted otherwise, day counts are days since the
//! person entered `InfectedButNotContagious`.

use log::trace;

use crate::error::EpisimError;
use crate::events::{day_start, SECONDS_PER_DAY};
use crate::people::{DiseaseStatus, Person, QuarantineStatus};
use crate::progression::age::{CRITICAL, SERIOUSLY_SICK};
use crate::progression::{ProgressionOutcome, StatusChange};
use crate::random::RandomSource;

/// A quarantined person who never got infected is released after this many days.
pub const QUARANTINE_DAYS: u32 = 14;
pub const DAYS_TO_CONTAGIOUS: u32 = 4;
pub const SYMPTOM_DAY: u32 = 6;
pub const SERIOUSLY_SICK_DAY: u32 = 10;
pub const CRITICAL_DAY: u32 = 11;
pub const RECOVERY_DAY: u32 = 16;
pub const CRITICAL_STEP_DOWN_DAY: u32 = 20;
pub const SERIOUSLY_SICK_RECOVERY_DAY: u32 = 23;
/// Daily chance that a contagious person is tested and detected.
pub const DETECTION_PROBABILITY: f64 = 0.1;
/// Chance that a contagious person develops symptoms on `SYMPTOM_DAY`.
pub const SYMPTOM_PROBABILITY: f64 = 0.8;

/// Everything a handler may touch while advancing one person by one day.
pub(crate) struct ProgressionStep<'a> {
    pub person: &'a mut Person,
    pub day: u32,
    pub rng: &'a mut dyn RandomSource,
    pub tracing: bool,
    pub outcome: ProgressionOutcome,
}

impl ProgressionStep<'_> {
    fn days_since_infection(&self) -> Result<u32, EpisimError> {
        self.person
            .days_since(DiseaseStatus::InfectedButNotContagious, self.day)
            .ok_or(EpisimError::MissingInfectionDay(self.person.id()))
    }

    fn set_status(&mut self, status: DiseaseStatus) {
        trace!(
            "person {} moves from {} to {} on day {}",
            self.person.id(),
            self.person.disease_status(),
            status,
            self.day
        );
        self.person.set_disease_status(status, self.day);
        self.outcome.changes.push(StatusChange {
            person: self.person.id(),
            day: self.day,
            status,
        });
    }

    fn quarantine(&mut self) {
        self.person
            .set_quarantine_status(QuarantineStatus::AtHome, self.day);
    }

    fn release(&mut self) {
        self.person.set_quarantine_status(QuarantineStatus::No, self.day);
    }

    /// Queues quarantine for everyone traced since the person became contagious.
    fn quarantine_traceable_contacts(&mut self) {
        let contagious_days = self
            .person
            .days_since(DiseaseStatus::Contagious, self.day)
            .unwrap_or(0);
        let since = day_start(self.day) - f64::from(contagious_days) * SECONDS_PER_DAY;
        let contacts = self.person.trace_log().contacts_since(since);
        self.outcome.quarantine.extend(contacts);
    }
}

pub(crate) trait StatusHandler: Sync {
    fn advance(&self, step: &mut ProgressionStep<'_>) -> Result<(), EpisimError>;
}

struct Susceptible;
struct InfectedButNotContagious;
struct Contagious;
struct ShowingSymptoms;
struct SeriouslySick;
struct Critical;
struct Recovered;

pub(crate) fn handler_for(status: DiseaseStatus) -> &'static dyn StatusHandler {
    match status {
        DiseaseStatus::Susceptible => &Susceptible,
        DiseaseStatus::InfectedButNotContagious => &InfectedButNotContagious,
        DiseaseStatus::Contagious => &Contagious,
        DiseaseStatus::ShowingSymptoms => &ShowingSymptoms,
        DiseaseStatus::SeriouslySick => &SeriouslySick,
        DiseaseStatus::Critical => &Critical,
        DiseaseStatus::Recovered => &Recovered,
    }
}

impl StatusHandler for Susceptible {
    fn advance(&self, step: &mut ProgressionStep<'_>) -> Result<(), EpisimError> {
        let quarantine_days = step.person.days_since_quarantine(step.day);
        if step.person.is_quarantined() && quarantine_days.is_some_and(|d| d > QUARANTINE_DAYS) {
            step.release();
        }
        Ok(())
    }
}

impl StatusHandler for InfectedButNotContagious {
    fn advance(&self, step: &mut ProgressionStep<'_>) -> Result<(), EpisimError> {
        if step.days_since_infection()? >= DAYS_TO_CONTAGIOUS {
            step.set_status(DiseaseStatus::Contagious);
        }
        Ok(())
    }
}

impl StatusHandler for Contagious {
    fn advance(&self, step: &mut ProgressionStep<'_>) -> Result<(), EpisimError> {
        let days = step.days_since_infection()?;

        if step.tracing && step.rng.next_draw() < DETECTION_PROBABILITY {
            step.quarantine();
            step.quarantine_traceable_contacts();
        }

        if days == SYMPTOM_DAY {
            if step.rng.next_draw() < SYMPTOM_PROBABILITY {
                step.set_status(DiseaseStatus::ShowingSymptoms);
                step.quarantine();
                if step.tracing {
                    step.quarantine_traceable_contacts();
                }
            }
        } else if days >= RECOVERY_DAY {
            step.set_status(DiseaseStatus::Recovered);
        }
        Ok(())
    }
}

impl StatusHandler for ShowingSymptoms {
    fn advance(&self, step: &mut ProgressionStep<'_>) -> Result<(), EpisimError> {
        let days = step.days_since_infection()?;
        if days == SERIOUSLY_SICK_DAY {
            let probability = SERIOUSLY_SICK.probability(step.person)?;
            if step.rng.next_draw() < probability {
                step.set_status(DiseaseStatus::SeriouslySick);
            }
        } else if days >= RECOVERY_DAY {
            step.set_status(DiseaseStatus::Recovered);
        }
        Ok(())
    }
}

impl StatusHandler for SeriouslySick {
    fn advance(&self, step: &mut ProgressionStep<'_>) -> Result<(), EpisimError> {
        let days = step.days_since_infection()?;
        if days == CRITICAL_DAY {
            let probability = CRITICAL.probability(step.person)?;
            if step.rng.next_draw() < probability {
                step.set_status(DiseaseStatus::Critical);
            }
        } else if days >= SERIOUSLY_SICK_RECOVERY_DAY {
            step.set_status(DiseaseStatus::Recovered);
        }
        Ok(())
    }
}

impl StatusHandler for Critical {
    fn advance(&self, step: &mut ProgressionStep<'_>) -> Result<(), EpisimError> {
        // Step-down has to happen before the seriouslySick recovery day.
        if step.days_since_infection()? == CRITICAL_STEP_DOWN_DAY {
            step.set_status(DiseaseStatus::SeriouslySick);
        }
        Ok(())
    }
}

impl StatusHandler for Recovered {
    fn advance(&self, step: &mut ProgressionStep<'_>) -> Result<(), EpisimError> {
        if step.person.is_quarantined() {
            step.release();
        }
        Ok(())
    }
}
