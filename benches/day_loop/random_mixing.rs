use episim::events::{day_start, EpisimEvent};
use episim::policy::{is_home_activity, Restrictions};
use episim::{ContactModel, DiseaseStatus, EpisimError, PersonId, PersonRegistry, RandomSource};

/// Attendees of each activity meet in groups of `GROUP_SIZE`, in id order.
pub struct RandomMixing {
    pub transmission_probability: f64,
}

const GROUP_SIZE: usize = 8;

impl ContactModel for RandomMixing {
    fn process_day(
        &mut self,
        day: u32,
        registry: &mut PersonRegistry,
        restrictions: &Restrictions,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<EpisimEvent>, EpisimError> {
        let mut infections = Vec::new();
        let activities: Vec<(String, f64)> = restrictions
            .iter()
            .filter(|(activity, _)| !is_home_activity(activity))
            .map(|(activity, r)| (activity.to_string(), r.remaining_fraction()))
            .collect();

        for (slot, (activity, fraction)) in activities.iter().enumerate() {
            let time = day_start(day) + 3600.0 * (8.0 + slot as f64);
            let attendees: Vec<PersonId> = registry
                .iter()
                .filter(|person| !person.is_quarantined())
                .map(|person| person.id())
                .filter(|_| rng.next_draw() < *fraction)
                .collect();

            for group in attendees.chunks(GROUP_SIZE) {
                for (i, &a) in group.iter().enumerate() {
                    for &b in &group[i + 1..] {
                        registry.record_contact(a, b, time)?;
                    }
                }
                let infectors: Vec<PersonId> = group
                    .iter()
                    .copied()
                    .filter(|id| {
                        registry
                            .get(*id)
                            .is_ok_and(|p| p.disease_status() == DiseaseStatus::Contagious)
                    })
                    .collect();
                for infector in infectors {
                    for &id in group {
                        if registry.get(id)?.disease_status() == DiseaseStatus::Susceptible
                            && rng.next_draw() < self.transmission_probability
                        {
                            registry.infect(id, day)?;
                            infections.push(EpisimEvent::Infection {
                                time,
                                infector,
                                infected: id,
                                activity: activity.clone(),
                            });
                        }
                    }
                }
            }
        }
        Ok(infections)
    }
}
