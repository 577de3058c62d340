use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter};

use crate::people::TraceLog;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(usize);

impl PersonId {
    #[must_use]
    pub fn new(index: usize) -> Self {
        PersonId(index)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize, EnumIter,
    EnumCount, strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DiseaseStatus {
    Susceptible,
    InfectedButNotContagious,
    Contagious,
    ShowingSymptoms,
    SeriouslySick,
    Critical,
    Recovered,
}

impl DiseaseStatus {
    /// True for every status between infection and recovery.
    #[must_use]
    pub fn is_infected(self) -> bool {
        !matches!(self, DiseaseStatus::Susceptible | DiseaseStatus::Recovered)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum QuarantineStatus {
    #[default]
    No,
    AtHome,
}

#[derive(Debug, Clone)]
pub struct Person {
    id: PersonId,
    age: Option<i32>,
    disease_status: DiseaseStatus,
    /// Day on which each status was most recently entered, indexed by `DiseaseStatus`.
    status_entered: [Option<u32>; DiseaseStatus::COUNT],
    quarantine_status: QuarantineStatus,
    quarantine_start: Option<u32>,
    trace_log: TraceLog,
}

impl Person {
    #[must_use]
    pub fn new(id: PersonId, age: Option<i32>) -> Self {
        Person {
            id,
            age,
            disease_status: DiseaseStatus::Susceptible,
            status_entered: [None; DiseaseStatus::COUNT],
            quarantine_status: QuarantineStatus::No,
            quarantine_start: None,
            trace_log: TraceLog::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PersonId {
        self.id
    }

    #[must_use]
    pub fn age(&self) -> Option<i32> {
        self.age
    }

    #[must_use]
    pub fn disease_status(&self) -> DiseaseStatus {
        self.disease_status
    }

    pub fn set_disease_status(&mut self, status: DiseaseStatus, day: u32) {
        self.disease_status = status;
        self.status_entered[status.slot()] = Some(day);
    }

    /// The day `status` was most recently entered, if ever.
    #[must_use]
    pub fn entered(&self, status: DiseaseStatus) -> Option<u32> {
        self.status_entered[status.slot()]
    }

    /// Whole days between entering `status` and `day`. Never negative: a `day` before the
    /// entry day counts as zero.
    #[must_use]
    pub fn days_since(&self, status: DiseaseStatus, day: u32) -> Option<u32> {
        self.entered(status).map(|entered| day.saturating_sub(entered))
    }

    #[must_use]
    pub fn quarantine_status(&self) -> QuarantineStatus {
        self.quarantine_status
    }

    #[must_use]
    pub fn is_quarantined(&self) -> bool {
        self.quarantine_status != QuarantineStatus::No
    }

    pub fn set_quarantine_status(&mut self, status: QuarantineStatus, day: u32) {
        self.quarantine_status = status;
        self.quarantine_start = Some(day);
    }

    #[must_use]
    pub fn days_since_quarantine(&self, day: u32) -> Option<u32> {
        self.quarantine_start.map(|start| day.saturating_sub(start))
    }

    #[must_use]
    pub fn trace_log(&self) -> &TraceLog {
        &self.trace_log
    }

    pub fn trace_log_mut(&mut self) -> &mut TraceLog {
        &mut self.trace_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn new_person_is_susceptible_and_free() {
        let person = Person::new(PersonId::new(0), Some(30));
        assert_eq!(person.disease_status(), DiseaseStatus::Susceptible);
        assert_eq!(person.quarantine_status(), QuarantineStatus::No);
        assert_eq!(person.days_since_quarantine(10), None);
        for status in DiseaseStatus::iter() {
            assert_eq!(person.entered(status), None);
        }
    }

    #[test]
    fn status_entry_days_are_kept_per_status() {
        let mut person = Person::new(PersonId::new(0), None);
        person.set_disease_status(DiseaseStatus::InfectedButNotContagious, 3);
        person.set_disease_status(DiseaseStatus::Contagious, 7);
        assert_eq!(person.disease_status(), DiseaseStatus::Contagious);
        assert_eq!(
            person.days_since(DiseaseStatus::InfectedButNotContagious, 10),
            Some(7)
        );
        assert_eq!(person.days_since(DiseaseStatus::Contagious, 10), Some(3));
        assert_eq!(person.days_since(DiseaseStatus::Contagious, 5), Some(0));
        assert_eq!(person.days_since(DiseaseStatus::Critical, 10), None);
    }

    #[test]
    fn status_names_are_camel_case() {
        assert_eq!(
            DiseaseStatus::InfectedButNotContagious.to_string(),
            "infectedButNotContagious"
        );
        assert_eq!(QuarantineStatus::AtHome.to_string(), "atHome");
        assert_eq!(
            serde_json::to_string(&DiseaseStatus::SeriouslySick).unwrap(),
            "\"seriouslySick\""
        );
    }

    #[test]
    fn infected_excludes_susceptible_and_recovered() {
        let infected: Vec<_> = DiseaseStatus::iter().filter(|s| s.is_infected()).collect();
        assert_eq!(infected.len(), 5);
        assert!(!DiseaseStatus::Susceptible.is_infected());
        assert!(!DiseaseStatus::Recovered.is_infected());
    }
}
