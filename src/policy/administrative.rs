//! Administratively mandated restrictions.
//!
//! An [`AdministrativeSchedule`] says which fraction of an activity remains from a given
//! date on. [`AdministrativePeriods`] says on which dates an activity is governed by that
//! schedule at all, using lists of boundary dates: an activity is governed on `d` iff an
//! odd number of its boundary dates lie strictly before `d`.

use std::collections::BTreeMap;
use std::io;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::EpisimError;
use crate::numeric::clamp_fraction;

/// Date to activity to remaining fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdministrativeSchedule {
    days: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
}

impl AdministrativeSchedule {
    #[must_use]
    pub fn new() -> Self {
        AdministrativeSchedule::default()
    }

    /// Sets the remaining fraction of `activity` from `date` on.
    pub fn restrict(&mut self, date: NaiveDate, activity: impl Into<String>, fraction: f64) {
        self.days
            .entry(date)
            .or_default()
            .insert(activity.into(), clamp_fraction(fraction));
    }

    /// Reads a table with a header row and the columns `activity, fraction, year, month, day`.
    ///
    /// # Errors
    ///
    /// Returns `EpisimError::CsvError` for malformed rows and `EpisimError::ConfigError`
    /// for dates that do not exist.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, EpisimError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut schedule = AdministrativeSchedule::new();
        for row in reader.deserialize() {
            let (activity, fraction, year, month, day): (String, f64, i32, u32, u32) = row?;
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                EpisimError::ConfigError(format!(
                    "invalid restriction date {year}-{month}-{day} for {activity}"
                ))
            })?;
            schedule.restrict(date, activity, fraction);
        }
        Ok(schedule)
    }

    /// Entries dated exactly on `date`.
    #[must_use]
    pub fn for_day(&self, date: NaiveDate) -> Option<&BTreeMap<String, f64>> {
        self.days.get(&date)
    }

    #[must_use]
    pub fn fraction(&self, date: NaiveDate, activity: &str) -> Option<f64> {
        self.days.get(&date)?.get(activity).copied()
    }

    /// Entries dated on or before `date`, in date order.
    pub fn until(&self, date: NaiveDate) -> impl Iterator<Item = (NaiveDate, &BTreeMap<String, f64>)> {
        self.days.range(..=date).map(|(date, entries)| (*date, entries))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Per-activity boundary dates, sorted and free of duplicates.
#[derive(Debug, Clone, Default)]
pub struct AdministrativePeriods {
    boundaries: BTreeMap<String, Vec<NaiveDate>>,
}

impl AdministrativePeriods {
    /// Normalizes each list. Unsorted or duplicated lists are repaired and odd-length lists
    /// are kept as an open-ended final period; both are reported with a warning.
    #[must_use]
    pub fn new(periods: &BTreeMap<String, Vec<NaiveDate>>) -> Self {
        let mut boundaries = BTreeMap::new();
        for (activity, dates) in periods {
            let mut sorted = dates.clone();
            sorted.sort_unstable();
            sorted.dedup();
            if sorted.as_slice() != dates.as_slice() {
                warn!("administrative boundaries of {activity} were unsorted or repeated; using {sorted:?}");
            }
            if sorted.len() % 2 == 1 {
                warn!(
                    "administrative boundaries of {activity} have odd length; the period from {} stays open",
                    sorted[sorted.len() - 1]
                );
            }
            boundaries.insert(activity.clone(), sorted);
        }
        AdministrativePeriods { boundaries }
    }

    /// Number of boundary dates of `activity` strictly before `date`, if it has any list.
    #[must_use]
    pub fn boundaries_before(&self, activity: &str, date: NaiveDate) -> Option<usize> {
        let dates = self.boundaries.get(activity)?;
        Some(dates.partition_point(|boundary| *boundary < date))
    }

    #[must_use]
    pub fn is_restricted(&self, activity: &str, date: NaiveDate) -> bool {
        self.boundaries_before(activity, date)
            .is_some_and(|count| count % 2 == 1)
    }

    #[must_use]
    pub fn boundaries(&self, activity: &str) -> Option<&[NaiveDate]> {
        self.boundaries.get(activity).map(Vec::as_slice)
    }
}
