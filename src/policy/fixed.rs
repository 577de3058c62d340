use chrono::NaiveDate;
use log::{info, warn};

use crate::error::EpisimError;
use crate::policy::{AdministrativeSchedule, Restrictions, ShutdownPolicy};
use crate::report::InfectionReport;

/// Applies an externally supplied schedule of fractions as is.
#[derive(Debug, Clone, Default)]
pub struct FixedPolicy {
    schedule: AdministrativeSchedule,
}

impl FixedPolicy {
    #[must_use]
    pub fn new(schedule: AdministrativeSchedule) -> Self {
        FixedPolicy { schedule }
    }

    #[must_use]
    pub fn schedule(&self) -> &AdministrativeSchedule {
        &self.schedule
    }

    /// Applies every entry dated on or before `start`, oldest first.
    pub(crate) fn apply_until(
        schedule: &AdministrativeSchedule,
        start: NaiveDate,
        restrictions: &mut Restrictions,
    ) {
        for (date, entries) in schedule.until(start) {
            for (activity, fraction) in entries {
                apply(restrictions, date, activity, *fraction);
            }
        }
    }

    pub(crate) fn apply_day(
        schedule: &AdministrativeSchedule,
        date: NaiveDate,
        restrictions: &mut Restrictions,
    ) {
        if let Some(entries) = schedule.for_day(date) {
            for (activity, fraction) in entries {
                apply(restrictions, date, activity, *fraction);
            }
        }
    }
}

fn apply(restrictions: &mut Restrictions, date: NaiveDate, activity: &str, fraction: f64) {
    match restrictions.get_mut(activity) {
        Some(restriction) => restriction.set_remaining_fraction(fraction),
        None => warn!("restriction for unknown activity {activity} on {date} ignored"),
    }
}

impl ShutdownPolicy for FixedPolicy {
    fn init(&mut self, start: NaiveDate, restrictions: &mut Restrictions) -> Result<(), EpisimError> {
        info!("fixed policy starting on {start}");
        FixedPolicy::apply_until(&self.schedule, start, restrictions);
        Ok(())
    }

    fn update_restrictions(
        &mut self,
        report: &InfectionReport,
        restrictions: &mut Restrictions,
    ) -> Result<(), EpisimError> {
        FixedPolicy::apply_day(&self.schedule, report.date, restrictions);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, day).unwrap()
    }

    fn report(date: NaiveDate) -> InfectionReport {
        InfectionReport {
            date,
            ..InfectionReport::default()
        }
    }

    fn schedule() -> AdministrativeSchedule {
        let mut schedule = AdministrativeSchedule::new();
        schedule.restrict(march(1), "work", 0.8);
        schedule.restrict(march(3), "work", 0.6);
        schedule.restrict(march(10), "work", 0.2);
        schedule.restrict(march(10), "school", 0.0);
        schedule
    }

    #[test]
    fn init_applies_past_entries_in_order() {
        let mut policy = FixedPolicy::new(schedule());
        let mut restrictions = Restrictions::for_activities(["work", "school"]);
        policy.init(march(5), &mut restrictions).unwrap();
        assert_eq!(restrictions.remaining_fraction("work"), 0.6);
        assert_eq!(restrictions.remaining_fraction("school"), 1.0);
    }

    #[test]
    fn updates_only_on_scheduled_days() {
        let mut policy = FixedPolicy::new(schedule());
        let mut restrictions = Restrictions::for_activities(["work", "school", "leisure"]);
        policy.init(march(5), &mut restrictions).unwrap();

        policy
            .update_restrictions(&report(march(9)), &mut restrictions)
            .unwrap();
        assert_eq!(restrictions.remaining_fraction("work"), 0.6);

        policy
            .update_restrictions(&report(march(10)), &mut restrictions)
            .unwrap();
        assert_eq!(restrictions.remaining_fraction("work"), 0.2);
        assert_eq!(restrictions.remaining_fraction("school"), 0.0);

        policy
            .update_restrictions(&report(march(11)), &mut restrictions)
            .unwrap();
        assert_eq!(restrictions.remaining_fraction("work"), 0.2);
        assert_eq!(restrictions.remaining_fraction("leisure"), 1.0);
    }

    #[test]
    fn unknown_activities_are_ignored() {
        let mut policy = FixedPolicy::new(schedule());
        let mut restrictions = Restrictions::for_activities(["leisure"]);
        policy.init(march(31), &mut restrictions).unwrap();
        assert_eq!(restrictions.len(), 1);
        assert_eq!(restrictions.remaining_fraction("leisure"), 1.0);
    }
}
