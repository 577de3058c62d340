use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use episim::policy::AdministrativeSchedule;
use episim::{FixedPolicy, PersonRegistry, Restrictions, Simulation, SimulationParams};

mod random_mixing;

use random_mixing::RandomMixing;

static POPULATION: usize = 2000;
static SEED: u64 = 123;
static MAX_DAYS: u32 = 60;
static INITIAL_INFECTIONS: usize = 10;

fn day_loop() -> u32 {
    let start_date = NaiveDate::from_ymd_opt(2020, 2, 21).expect("valid start date");
    let params = SimulationParams {
        start_date,
        seed: SEED,
        max_days: MAX_DAYS,
        tracing: true,
        initial_infections: INITIAL_INFECTIONS,
    };

    let mut registry = PersonRegistry::new();
    for i in 0..POPULATION {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        registry.add_person(Some((i % 90) as i32));
    }

    let mut schedule = AdministrativeSchedule::new();
    schedule.restrict(start_date + chrono::Days::new(20), "educ_school", 0.1);
    schedule.restrict(start_date + chrono::Days::new(20), "leisure", 0.4);

    let mut simulation = Simulation::new(
        params,
        registry,
        Restrictions::for_activities(["home", "work", "educ_school", "leisure"]),
        FixedPolicy::new(schedule),
        RandomMixing {
            transmission_probability: 0.05,
        },
    )
    .expect("failed to set up simulation");

    simulation
        .run(|_, _| Ok(()))
        .expect("simulation failed")
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("day loop random-mixing", |bencher| bencher.iter(day_loop));
}

criterion_group!(day_loop_benches, criterion_benchmark);
criterion_main!(day_loop_benches);
