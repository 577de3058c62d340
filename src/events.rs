//! Records of the externally supplied event stream.
//!
//! Times are seconds since the start of the simulation; the simulated day of an event is
//! `floor(time / 86400)`.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::people::{DiseaseStatus, PersonId};
use crate::HashMap;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Time in seconds at which `day` starts.
#[must_use]
pub fn day_start(day: u32) -> f64 {
    f64::from(day) * SECONDS_PER_DAY
}

/// Simulated day containing `time`. Negative times belong to day 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn day_of(time: f64) -> u32 {
    (time / SECONDS_PER_DAY).floor().max(0.0) as u32
}

/// Calendar date of simulated `day` for a run starting on `start`.
#[must_use]
pub fn date_of(start: NaiveDate, day: u32) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(u64::from(day)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EpisimEvent {
    ActivityStart {
        time: f64,
        person: PersonId,
        activity: String,
    },
    ActivityEnd {
        time: f64,
        person: PersonId,
        activity: String,
    },
    Infection {
        time: f64,
        infector: PersonId,
        infected: PersonId,
        activity: String,
    },
    PersonStatus {
        time: f64,
        person: PersonId,
        status: DiseaseStatus,
    },
}

impl EpisimEvent {
    #[must_use]
    pub fn time(&self) -> f64 {
        match self {
            EpisimEvent::ActivityStart { time, .. }
            | EpisimEvent::ActivityEnd { time, .. }
            | EpisimEvent::Infection { time, .. }
            | EpisimEvent::PersonStatus { time, .. } => *time,
        }
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        day_of(self.time())
    }

    /// The person the event is about; for infections, the infected person.
    #[must_use]
    pub fn person(&self) -> PersonId {
        match self {
            EpisimEvent::ActivityStart { person, .. }
            | EpisimEvent::ActivityEnd { person, .. }
            | EpisimEvent::PersonStatus { person, .. } => *person,
            EpisimEvent::Infection { infected, .. } => *infected,
        }
    }

    fn with_time(&self, time: f64) -> Self {
        let mut event = self.clone();
        match &mut event {
            EpisimEvent::ActivityStart { time: t, .. }
            | EpisimEvent::ActivityEnd { time: t, .. }
            | EpisimEvent::Infection { time: t, .. }
            | EpisimEvent::PersonStatus { time: t, .. } => *t = time,
        }
        event
    }
}

/// One representative day of events per weekday, with times rebased to seconds since
/// midnight of that day.
#[derive(Debug, Clone, Default)]
pub struct ReferenceWeek {
    days: HashMap<Weekday, Vec<EpisimEvent>>,
}

impl ReferenceWeek {
    #[must_use]
    pub fn new() -> Self {
        ReferenceWeek::default()
    }

    /// Sets the events of `weekday`. Times must already be relative to midnight.
    pub fn insert_day(&mut self, weekday: Weekday, events: Vec<EpisimEvent>) {
        self.days.insert(weekday, events);
    }

    /// Buckets a multi-day stream by the weekday of each event's date. When the stream
    /// covers a weekday more than once, the later occurrence wins.
    #[must_use]
    pub fn from_stream(start: NaiveDate, events: &[EpisimEvent]) -> Self {
        let mut week = ReferenceWeek::new();
        let mut seen_day: HashMap<Weekday, u32> = HashMap::default();
        for event in events {
            let day = event.day();
            let Some(date) = date_of(start, day) else {
                continue;
            };
            let weekday = date.weekday();
            let bucket = week.days.entry(weekday).or_default();
            if seen_day.get(&weekday).is_some_and(|&seen| seen != day) {
                bucket.clear();
            }
            seen_day.insert(weekday, day);
            bucket.push(event.with_time(event.time() - day_start(day)));
        }
        week
    }

    #[must_use]
    pub fn day(&self, weekday: Weekday) -> Option<&[EpisimEvent]> {
        self.days.get(&weekday).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[EpisimEvent])> {
        self.days.iter().map(|(weekday, events)| (*weekday, events.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(time: f64, person: usize, activity: &str) -> EpisimEvent {
        EpisimEvent::ActivityStart {
            time,
            person: PersonId::new(person),
            activity: activity.to_string(),
        }
    }

    #[test]
    fn day_boundaries() {
        assert_eq!(day_of(0.0), 0);
        assert_eq!(day_of(86_399.9), 0);
        assert_eq!(day_of(86_400.0), 1);
        assert_eq!(day_of(-5.0), 0);
        assert_eq!(day_start(3), 259_200.0);
    }

    #[test]
    fn date_of_counts_from_start() {
        let start = NaiveDate::from_ymd_opt(2020, 2, 21).unwrap();
        assert_eq!(
            date_of(start, 10),
            NaiveDate::from_ymd_opt(2020, 3, 2)
        );
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = EpisimEvent::Infection {
            time: 10.0,
            infector: PersonId::new(1),
            infected: PersonId::new(2),
            activity: "work".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"infection\""));
        let back: EpisimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.person(), PersonId::new(2));
    }

    #[test]
    fn reference_week_rebases_times() {
        // 2020-03-02 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();
        let events = vec![start(3600.0, 0, "work"), start(86_400.0 + 7200.0, 1, "leisure")];
        let week = ReferenceWeek::from_stream(monday, &events);

        let mon = week.day(Weekday::Mon).unwrap();
        assert_eq!(mon.len(), 1);
        assert_eq!(mon[0].time(), 3600.0);
        let tue = week.day(Weekday::Tue).unwrap();
        assert_eq!(tue[0].time(), 7200.0);
        assert!(week.day(Weekday::Wed).is_none());
    }

    #[test]
    fn reference_week_keeps_latest_occurrence() {
        let monday = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();
        let events = vec![start(100.0, 0, "work"), start(7.0 * 86_400.0 + 50.0, 1, "work")];
        let week = ReferenceWeek::from_stream(monday, &events);
        let mon = week.day(Weekday::Mon).unwrap();
        assert_eq!(mon.len(), 1);
        assert_eq!(mon[0].person(), PersonId::new(1));
        assert_eq!(mon[0].time(), 50.0);
    }
}
