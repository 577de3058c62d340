//! The day loop.
//!
//! Each simulated day runs three stages in order:
//!
//! 1. the [`ShutdownPolicy`] sets today's restrictions from the report of the population
//!    as it enters the day,
//! 2. the [`ContactModel`] replays today's activity under those restrictions, recording
//!    contacts and infections in the registry,
//! 3. the progression engine advances every person and prunes trace logs.
//!
//! All randomness comes from the one [`SimulationRng`] owned by the simulation, and
//! persons are always visited in id order, so a run is reproducible from its seed.

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::error::EpisimError;
use crate::events::{date_of, EpisimEvent};
use crate::params::SimulationParams;
use crate::people::{DiseaseStatus, PersonId, PersonRegistry};
use crate::policy::{Restrictions, ShutdownPolicy};
use crate::progression::{advance_all, can_progress, StatusChange};
use crate::random::{RandomSource, SimulationRng};
use crate::report::InfectionReport;

/// Produces contacts and infections from the day's activity.
pub trait ContactModel {
    /// Processes the events of `day`. Implementations record co-presence with
    /// [`PersonRegistry::record_contact`], infect with [`PersonRegistry::infect`], and
    /// return one [`EpisimEvent::Infection`] per new infection.
    ///
    /// # Errors
    ///
    /// Any error aborts the run.
    fn process_day(
        &mut self,
        day: u32,
        registry: &mut PersonRegistry,
        restrictions: &Restrictions,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<EpisimEvent>, EpisimError>;
}

/// Everything produced by one simulated day.
#[derive(Debug, Clone)]
pub struct DayOutcome {
    pub day: u32,
    pub date: NaiveDate,
    /// Counts at the end of the day.
    pub report: InfectionReport,
    pub infections: Vec<EpisimEvent>,
    pub changes: Vec<StatusChange>,
}

pub struct Simulation<P, C> {
    params: SimulationParams,
    registry: PersonRegistry,
    restrictions: Restrictions,
    policy: P,
    contacts: C,
    rng: SimulationRng,
    day: u32,
}

impl<P: ShutdownPolicy, C: ContactModel> Simulation<P, C> {
    /// Initializes the policy for the start date and seeds the initial infections.
    ///
    /// # Errors
    ///
    /// Returns an `EpisimError` if the policy rejects its configuration.
    pub fn new(
        params: SimulationParams,
        registry: PersonRegistry,
        mut restrictions: Restrictions,
        mut policy: P,
        contacts: C,
    ) -> Result<Self, EpisimError> {
        policy.init(params.start_date, &mut restrictions)?;
        let rng = SimulationRng::new(params.seed);
        let mut simulation = Simulation {
            params,
            registry,
            restrictions,
            policy,
            contacts,
            rng,
            day: 0,
        };
        let seeded = simulation.seed_infections(simulation.params.initial_infections)?;
        info!(
            "simulation of {} persons starting {} with {} seeded infections (seed {})",
            simulation.registry.len(),
            simulation.params.start_date,
            seeded.len(),
            simulation.rng.seed()
        );
        Ok(simulation)
    }

    /// Infects up to `n` susceptible persons, drawn with the run's random stream, on the
    /// current day. Returns the infected ids.
    ///
    /// # Errors
    ///
    /// Returns `EpisimError::UnknownPerson` only on an inconsistent registry.
    pub fn seed_infections(&mut self, n: usize) -> Result<Vec<PersonId>, EpisimError> {
        let mut candidates: Vec<PersonId> = self
            .registry
            .iter()
            .filter(|person| person.disease_status() == DiseaseStatus::Susceptible)
            .map(|person| person.id())
            .collect();
        if n > candidates.len() {
            warn!(
                "asked to seed {n} infections but only {} persons are susceptible",
                candidates.len()
            );
        }

        let mut seeded = Vec::with_capacity(n.min(candidates.len()));
        while seeded.len() < n && !candidates.is_empty() {
            let index = self.rng.next_index(candidates.len());
            let id = candidates.swap_remove(index);
            self.registry.infect(id, self.day)?;
            seeded.push(id);
        }
        Ok(seeded)
    }

    /// Runs the next day.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the policy, the contact model or the progression
    /// engine. The day counter is not advanced in that case.
    pub fn run_day(&mut self) -> Result<DayOutcome, EpisimError> {
        let day = self.day;
        let date = date_of(self.params.start_date, day).ok_or_else(|| {
            EpisimError::ConfigError(format!("day {day} is outside the calendar"))
        })?;

        let morning = InfectionReport::collect(&self.registry, day, date);
        self.policy
            .update_restrictions(&morning, &mut self.restrictions)?;

        let infections =
            self.contacts
                .process_day(day, &mut self.registry, &self.restrictions, &mut self.rng)?;
        let changes = advance_all(&mut self.registry, day, &mut self.rng, self.params.tracing)?;
        let report = InfectionReport::collect(&self.registry, day, date);

        debug!(
            "day {day} ({date}): {} new infections, {} infected, {} in quarantine",
            infections.len(),
            report.n_total_infected,
            report.n_in_quarantine
        );
        self.day += 1;
        Ok(DayOutcome {
            day,
            date,
            report,
            infections,
            changes,
        })
    }

    /// Runs days until nobody is infected or quarantined, or `max_days` days have run.
    /// `on_day` sees each outcome with the restrictions that were in force.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`Simulation::run_day`] or `on_day`.
    pub fn run<F>(&mut self, mut on_day: F) -> Result<u32, EpisimError>
    where
        F: FnMut(&DayOutcome, &Restrictions) -> Result<(), EpisimError>,
    {
        while self.day < self.params.max_days {
            let outcome = self.run_day()?;
            on_day(&outcome, &self.restrictions)?;
            if !can_progress(&outcome.report) {
                info!("epidemic over after day {}", outcome.day);
                break;
            }
        }
        Ok(self.day)
    }

    /// Number of days run so far.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub fn registry(&self) -> &PersonRegistry {
        &self.registry
    }

    #[must_use]
    pub fn restrictions(&self) -> &Restrictions {
        &self.restrictions
    }

    #[must_use]
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }
}
