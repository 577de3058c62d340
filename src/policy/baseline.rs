//! Per-weekday activity durations of the unrestricted reference week.

use std::collections::BTreeMap;

use chrono::Weekday;

use crate::events::{EpisimEvent, ReferenceWeek, SECONDS_PER_DAY};
use crate::people::PersonId;
use crate::policy::is_home_activity;
use crate::HashMap;

#[derive(Debug, Clone, Default)]
pub struct BaselineDurations {
    by_weekday: HashMap<Weekday, BTreeMap<String, f64>>,
}

impl BaselineDurations {
    #[must_use]
    pub fn new() -> Self {
        BaselineDurations::default()
    }

    #[must_use]
    pub fn from_reference_week(week: &ReferenceWeek) -> Self {
        let mut baseline = BaselineDurations::new();
        for (weekday, events) in week.iter() {
            baseline.insert_day(weekday, Self::durations_of_day(events));
        }
        baseline
    }

    pub fn insert_day(&mut self, weekday: Weekday, durations: BTreeMap<String, f64>) {
        self.by_weekday.insert(weekday, durations);
    }

    /// Pairs each activity end with the person's last activity start. An end without a
    /// start counts from midnight; a start that is never closed counts until the end of
    /// the day.
    #[must_use]
    pub fn durations_of_day(events: &[EpisimEvent]) -> BTreeMap<String, f64> {
        let mut durations: BTreeMap<String, f64> = BTreeMap::new();
        let mut entered: BTreeMap<PersonId, (f64, &str)> = BTreeMap::new();

        for event in events {
            match event {
                EpisimEvent::ActivityStart {
                    time,
                    person,
                    activity,
                } => {
                    entered.insert(*person, (*time, activity.as_str()));
                }
                EpisimEvent::ActivityEnd {
                    time,
                    person,
                    activity,
                } => {
                    let start = entered.remove(person).map_or(0.0, |(start, _)| start);
                    *durations.entry(activity.clone()).or_insert(0.0) += time - start;
                }
                EpisimEvent::Infection { .. } | EpisimEvent::PersonStatus { .. } => {}
            }
        }

        for (start, activity) in entered.into_values() {
            *durations.entry(activity.to_string()).or_insert(0.0) +=
                (SECONDS_PER_DAY - start).max(0.0);
        }
        durations
    }

    /// Baseline duration of `activity` on `weekday`, zero when never observed.
    #[must_use]
    pub fn duration(&self, weekday: Weekday, activity: &str) -> f64 {
        self.by_weekday
            .get(&weekday)
            .and_then(|durations| durations.get(activity))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of all non-home baseline durations of `weekday`.
    #[must_use]
    pub fn out_of_home_total(&self, weekday: Weekday) -> f64 {
        self.by_weekday.get(&weekday).map_or(0.0, |durations| {
            durations
                .iter()
                .filter(|(activity, _)| !is_home_activity(activity))
                .map(|(_, duration)| duration)
                .sum()
        })
    }

    #[must_use]
    pub fn day(&self, weekday: Weekday) -> Option<&BTreeMap<String, f64>> {
        self.by_weekday.get(&weekday)
    }
}
