//! Age-dependent transition probabilities.

use crate::error::EpisimError;
use crate::people::Person;

/// Ages outside `MIN_AGE..=MAX_AGE` have no defined probability and abort the run.
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 120;

/// A step function over age. `bands` holds `(upper bound, probability)` pairs in
/// increasing order of the exclusive upper bound; ages at or beyond the last bound use
/// `oldest`.
#[derive(Debug, Clone, Copy)]
pub struct AgeTable {
    bands: &'static [(i32, f64)],
    oldest: f64,
    unknown: f64,
}

/// Probability of moving from `showingSymptoms` to `seriouslySick`.
pub const SERIOUSLY_SICK: AgeTable = AgeTable {
    bands: &[
        (10, 0.0006),
        (20, 0.0019),
        (30, 0.0077),
        (40, 0.0206),
        (50, 0.0316),
        (60, 0.0657),
        (70, 0.1069),
        (80, 0.1565),
    ],
    oldest: 0.1758,
    unknown: 0.05625,
};

/// Probability of moving from `seriouslySick` to `critical`.
pub const CRITICAL: AgeTable = AgeTable {
    bands: &[
        (40, 0.05),
        (50, 0.063),
        (60, 0.122),
        (70, 0.274),
        (80, 0.432),
    ],
    oldest: 0.709,
    unknown: 0.25,
};

impl AgeTable {
    /// Looks up the probability for a known age, or `None` if the age is implausible.
    #[must_use]
    pub fn for_age(&self, age: i32) -> Option<f64> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return None;
        }
        let probability = self
            .bands
            .iter()
            .find(|(upper, _)| age < *upper)
            .map_or(self.oldest, |(_, probability)| *probability);
        Some(probability)
    }

    /// Probability for `person`. A person without an age gets the table's default.
    ///
    /// # Errors
    ///
    /// Returns `EpisimError::ImplausibleAge` if the person's age is outside `[0, 120]`.
    pub fn probability(&self, person: &Person) -> Result<f64, EpisimError> {
        match person.age() {
            None => Ok(self.unknown),
            Some(age) => self.for_age(age).ok_or(EpisimError::ImplausibleAge {
                person: person.id(),
                age,
            }),
        }
    }
}
