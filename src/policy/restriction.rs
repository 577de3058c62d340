use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::numeric::clamp_fraction;

/// The share of an activity's normal contact opportunities that remains, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restriction {
    remaining_fraction: f64,
}

impl Restriction {
    /// An unrestricted activity.
    #[must_use]
    pub fn none() -> Self {
        Restriction {
            remaining_fraction: 1.0,
        }
    }

    /// A restriction leaving `remaining_fraction` of the activity, clamped to `[0, 1]`.
    #[must_use]
    pub fn of(remaining_fraction: f64) -> Self {
        Restriction {
            remaining_fraction: clamp_fraction(remaining_fraction),
        }
    }

    #[must_use]
    pub fn remaining_fraction(&self) -> f64 {
        self.remaining_fraction
    }

    pub fn set_remaining_fraction(&mut self, remaining_fraction: f64) {
        self.remaining_fraction = clamp_fraction(remaining_fraction);
    }
}

impl Default for Restriction {
    fn default() -> Self {
        Restriction::none()
    }
}

/// Activities whose name contains `home` are never restricted by mobility data.
#[must_use]
pub fn is_home_activity(activity: &str) -> bool {
    activity.contains("home")
}

/// One restriction per activity type, ordered by activity name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Restrictions(BTreeMap<String, Restriction>);

impl Restrictions {
    #[must_use]
    pub fn new() -> Self {
        Restrictions::default()
    }

    /// Unrestricted entries for each of `activities`.
    pub fn for_activities<I, S>(activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Restrictions(
            activities
                .into_iter()
                .map(|activity| (activity.into(), Restriction::none()))
                .collect(),
        )
    }

    pub fn insert(&mut self, activity: impl Into<String>, restriction: Restriction) {
        self.0.insert(activity.into(), restriction);
    }

    #[must_use]
    pub fn get(&self, activity: &str) -> Option<&Restriction> {
        self.0.get(activity)
    }

    pub fn get_mut(&mut self, activity: &str) -> Option<&mut Restriction> {
        self.0.get_mut(activity)
    }

    /// Remaining fraction of `activity`; unknown activities are unrestricted.
    #[must_use]
    pub fn remaining_fraction(&self, activity: &str) -> f64 {
        self.0
            .get(activity)
            .map_or(1.0, Restriction::remaining_fraction)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Restriction)> {
        self.0.iter().map(|(activity, r)| (activity.as_str(), r))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Restriction)> {
        self.0.iter_mut().map(|(activity, r)| (activity.as_str(), r))
    }

    pub fn activities(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Activity name to remaining fraction, for output.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.0
            .iter()
            .map(|(activity, r)| (activity.clone(), r.remaining_fraction()))
            .collect()
    }
}
