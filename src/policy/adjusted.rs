//! Mobility-adjusted policy.
//!
//! Administratively governed activities follow their schedule. Schedule entries only take
//! effect on days the activity is governed, that is strictly after an opening boundary of
//! one of its periods. All other out-of-home activities share the reduction in observed
//! out-of-home time relative to the reference date of the same weekday. When administrative
//! closures already account for part of the baseline out-of-home time, the observed
//! reduction is renormalized by the share those closures removed:
//!
//! ```text
//! reduction = 1 - observed(d) / observed(reference(weekday(d)))
//! reduction = reduction / (1 - remaining_out_of_home / base_out_of_home)
//! remaining_fraction = 1 - reduction
//! ```
//!
//! A day on which any of these quantities is missing or a denominator is zero keeps the
//! previous mobility-governed fractions.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use log::{debug, info, warn};

use crate::error::EpisimError;
use crate::events::ReferenceWeek;
use crate::numeric::guarded_div;
use crate::policy::{
    is_home_activity, AdministrativePeriods, AdministrativeSchedule, BaselineDurations,
    FixedPolicy, PolicyConfig, Restrictions, ShutdownPolicy,
};
use crate::report::InfectionReport;
use crate::HashMap;

#[derive(Debug, Clone)]
pub struct AdjustedPolicy {
    out_of_home: BTreeMap<NaiveDate, f64>,
    base_days: HashMap<Weekday, NaiveDate>,
    periods: AdministrativePeriods,
    administrative: AdministrativeSchedule,
    baseline: BaselineDurations,
}

impl AdjustedPolicy {
    /// Builds the policy from its configuration and a week of unrestricted activity.
    #[must_use]
    pub fn new(config: PolicyConfig, reference_week: &ReferenceWeek) -> Self {
        AdjustedPolicy::with_baseline(config, BaselineDurations::from_reference_week(reference_week))
    }

    #[must_use]
    pub fn with_baseline(config: PolicyConfig, baseline: BaselineDurations) -> Self {
        AdjustedPolicy {
            periods: AdministrativePeriods::new(&config.periods),
            out_of_home: config.out_of_home,
            base_days: config.base_days,
            administrative: config.administrative,
            baseline,
        }
    }

    #[must_use]
    pub fn periods(&self) -> &AdministrativePeriods {
        &self.periods
    }

    #[must_use]
    pub fn baseline(&self) -> &BaselineDurations {
        &self.baseline
    }

    /// Observed reduction of out-of-home time on `date` relative to its reference date.
    #[must_use]
    pub fn observed_reduction(&self, date: NaiveDate) -> Option<f64> {
        let observed = self.out_of_home.get(&date)?;
        let reference_date = self.base_days.get(&date.weekday())?;
        let reference = self.out_of_home.get(reference_date)?;
        guarded_div(*observed, *reference).map(|ratio| 1.0 - ratio)
    }
}

impl ShutdownPolicy for AdjustedPolicy {
    fn init(&mut self, start: NaiveDate, restrictions: &mut Restrictions) -> Result<(), EpisimError> {
        info!(
            "adjusted policy starting on {start} with {} observed days and {} governed activities",
            self.out_of_home.len(),
            restrictions
                .activities()
                .filter(|activity| self.periods.boundaries(activity).is_some())
                .count()
        );
        FixedPolicy::apply_until(&self.administrative, start, restrictions);
        Ok(())
    }

    fn update_restrictions(
        &mut self,
        report: &InfectionReport,
        restrictions: &mut Restrictions,
    ) -> Result<(), EpisimError> {
        let today = report.date;
        let weekday = today.weekday();
        let base_duration = self.baseline.out_of_home_total(weekday);
        let mut out_of_home_duration = base_duration;
        let mut administrative = BTreeSet::new();

        for (activity, restriction) in restrictions.iter_mut() {
            if !self.periods.is_restricted(activity, today) {
                continue;
            }
            if let Some(fraction) = self.administrative.fraction(today, activity) {
                restriction.set_remaining_fraction(fraction);
            }
            out_of_home_duration -=
                (1.0 - restriction.remaining_fraction()) * self.baseline.duration(weekday, activity);
            administrative.insert(activity.to_string());
        }

        let Some(mut reduction) = self.observed_reduction(today) else {
            warn!("no usable out-of-home observation for {today}; keeping previous fractions");
            return Ok(());
        };

        let Some(remaining_share) = guarded_div(out_of_home_duration, base_duration) else {
            warn!("baseline out-of-home duration for {weekday} is zero; keeping previous fractions");
            return Ok(());
        };

        if !administrative.is_empty() {
            match guarded_div(reduction, 1.0 - remaining_share) {
                Some(renormalized) => reduction = renormalized,
                None => {
                    warn!(
                        "administrative closures on {today} remove no out-of-home time; keeping previous fractions"
                    );
                    return Ok(());
                }
            }
        }

        debug!(
            "{today}: reduction {reduction:.4}, {} administratively governed",
            administrative.len()
        );
        for (activity, restriction) in restrictions.iter_mut() {
            if administrative.contains(activity) || is_home_activity(activity) {
                continue;
            }
            restriction.set_remaining_fraction(1.0 - reduction);
        }
        Ok(())
    }
}
