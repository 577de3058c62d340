//! Infections per infector, dated on the day the infector became contagious.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::events::EpisimEvent;
use crate::people::{DiseaseStatus, PersonId};
use crate::progression::StatusChange;

#[derive(Debug, Clone, Copy, Default)]
struct Infector {
    infected: usize,
    contagious_day: Option<u32>,
}

/// Mean number of persons infected by the infectors who became contagious on `day`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfectorSummary {
    pub day: u32,
    pub mean_infected: f64,
    pub n_infectors: usize,
}

#[derive(Debug, Clone, Default)]
pub struct InfectorTally {
    infectors: BTreeMap<PersonId, Infector>,
}

impl InfectorTally {
    #[must_use]
    pub fn new() -> Self {
        InfectorTally::default()
    }

    #[must_use]
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a EpisimEvent>) -> Self {
        let mut tally = InfectorTally::new();
        for event in events {
            tally.observe(event);
        }
        tally
    }

    pub fn observe(&mut self, event: &EpisimEvent) {
        match event {
            EpisimEvent::Infection { infector, .. } => self.record_infection(*infector),
            EpisimEvent::PersonStatus {
                person,
                status: DiseaseStatus::Contagious,
                ..
            } => self.record_contagious(*person, event.day()),
            _ => {}
        }
    }

    pub fn observe_change(&mut self, change: &StatusChange) {
        if change.status == DiseaseStatus::Contagious {
            self.record_contagious(change.person, change.day);
        }
    }

    pub fn record_infection(&mut self, infector: PersonId) {
        self.infectors.entry(infector).or_default().infected += 1;
    }

    pub fn record_contagious(&mut self, person: PersonId, day: u32) {
        self.infectors.entry(person).or_default().contagious_day = Some(day);
    }

    /// Persons never seen becoming contagious are not attributed to any day. A day without
    /// infectors has a mean of zero.
    #[must_use]
    pub fn summary(&self, day: u32) -> InfectorSummary {
        let (n_infectors, infected) = self
            .infectors
            .values()
            .filter(|infector| infector.contagious_day == Some(day))
            .fold((0, 0), |(n, infected), infector| {
                (n + 1, infected + infector.infected)
            });
        #[allow(clippy::cast_precision_loss)]
        let mean_infected = if n_infectors == 0 {
            0.0
        } else {
            infected as f64 / n_infectors as f64
        };
        InfectorSummary {
            day,
            mean_infected,
            n_infectors,
        }
    }

    /// Summaries for days `0..=last_day`.
    #[must_use]
    pub fn summaries(&self, last_day: u32) -> Vec<InfectorSummary> {
        (0..=last_day).map(|day| self.summary(day)).collect()
    }
}
