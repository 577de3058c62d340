//! The restriction engine.
//!
//! Once per simulated day, before any contacts are processed, a [`ShutdownPolicy`] sets
//! the remaining fraction of every activity type. Two policies exist:
//!
//! * [`FixedPolicy`] applies a date-indexed table of fractions.
//! * [`AdjustedPolicy`] combines administrative closures with the reduction in
//!   out-of-home time observed in mobility data.
//!
//! Policies only see the day's [`InfectionReport`] and the restriction map; they keep no
//! other state about the population.

mod adjusted;
mod administrative;
mod baseline;
mod config;
mod fixed;
mod restriction;

use chrono::NaiveDate;

use crate::error::EpisimError;
use crate::report::InfectionReport;

pub use adjusted::AdjustedPolicy;
pub use administrative::{AdministrativePeriods, AdministrativeSchedule};
pub use baseline::BaselineDurations;
pub use config::PolicyConfig;
pub use fixed::FixedPolicy;
pub use restriction::{is_home_activity, Restriction, Restrictions};

pub trait ShutdownPolicy {
    /// Sets the restrictions in force on the first simulated day.
    ///
    /// # Errors
    ///
    /// Implementations may fail on inconsistent configuration.
    fn init(&mut self, start: NaiveDate, restrictions: &mut Restrictions) -> Result<(), EpisimError>;

    /// Updates `restrictions` for the day described by `report`.
    ///
    /// # Errors
    ///
    /// Implementations may fail on inconsistent configuration.
    fn update_restrictions(
        &mut self,
        report: &InfectionReport,
        restrictions: &mut Restrictions,
    ) -> Result<(), EpisimError>;
}
