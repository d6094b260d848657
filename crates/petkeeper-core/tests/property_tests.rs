//! Property tests for the vital-range and level-threshold invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use petkeeper_core::decay::apply_decay;
use petkeeper_core::progression::gain_xp;
use petkeeper_core::{
    Action, DecayRates, EngineConfig, ManualClock, MemoryRepository, Pet, PetEngine, Species,
    StatsUpdate,
};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn assert_invariants(pet: &Pet) -> Result<(), TestCaseError> {
    prop_assert!(pet.hunger <= 100);
    prop_assert!(pet.hygiene <= 100);
    prop_assert!(pet.health <= 100);
    prop_assert!(pet.happiness <= 100);
    prop_assert!(pet.level >= 1);
    prop_assert!((pet.xp as u64) < pet.level as u64 * 50, "xp {} at level {}", pet.xp, pet.level);
    Ok(())
}

#[derive(Debug, Clone)]
enum Op {
    Wait(i64),
    Act(Action),
    Set(Option<i64>, Option<i64>),
    Get,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-3_600i64..200_000).prop_map(Op::Wait),
        prop_oneof![Just(Action::Feed), Just(Action::Clean), Just(Action::Play)].prop_map(Op::Act),
        (
            proptest::option::of(-500i64..500),
            proptest::option::of(-500i64..500)
        )
            .prop_map(|(a, b)| Op::Set(a, b)),
        Just(Op::Get),
    ]
}

proptest! {
    #[test]
    fn xp_grant_always_settles_below_threshold(
        start_level in 1u32..20,
        grant in 0u32..100_000,
    ) {
        let mut pet = Pet::new(Uuid::new_v4(), "P".to_string(), Species::Dog, epoch());
        pet.level = start_level;
        let gained = gain_xp(&mut pet, grant, 50);
        prop_assert_eq!(pet.level, start_level + gained);
        assert_invariants(&pet)?;
    }

    #[test]
    fn decay_stays_in_range_and_never_raises(
        hunger in 0u8..=100,
        hygiene in 0u8..=100,
        health in 0u8..=100,
        seconds in -86_400i64..1_000_000,
    ) {
        let mut pet = Pet::new(Uuid::new_v4(), "P".to_string(), Species::Cat, epoch());
        pet.hunger = hunger;
        pet.hygiene = hygiene;
        pet.health = health;

        apply_decay(&mut pet, epoch() + Duration::seconds(seconds), &DecayRates::default());

        prop_assert!(pet.hunger <= hunger);
        prop_assert!(pet.hygiene <= hygiene);
        prop_assert!(pet.health <= health);
        prop_assert!(pet.last_updated >= epoch());
        assert_invariants(&pet)?;
    }

    #[test]
    fn decay_twice_within_a_minute_is_noop(
        hours in 0i64..100,
        gap in 0i64..60,
    ) {
        let rates = DecayRates::default();
        let mut pet = Pet::new(Uuid::new_v4(), "P".to_string(), Species::Duck, epoch());
        let first = epoch() + Duration::hours(hours) + Duration::seconds(90);
        apply_decay(&mut pet, first, &rates);
        let snapshot = pet.clone();
        apply_decay(&mut pet, first + Duration::seconds(gap), &rates);
        prop_assert_eq!(pet, snapshot);
    }

    #[test]
    fn any_operation_sequence_keeps_invariants(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let engine = PetEngine::with_clock(
            MemoryRepository::new(),
            ManualClock::new(epoch()),
            EngineConfig::default(),
        );
        let group = Uuid::new_v4();
        engine.create(group, "Prop", Species::Dragon).unwrap();
        let mut last_seen = epoch();

        for op in ops {
            let pet = match op {
                Op::Wait(secs) => {
                    engine.clock().advance(Duration::seconds(secs));
                    continue;
                }
                Op::Act(action) => engine.perform(group, action).unwrap(),
                Op::Set(hunger, happiness) => engine
                    .set_stats(group, &StatsUpdate { hunger, happiness, ..Default::default() })
                    .unwrap(),
                Op::Get => engine.get(group).unwrap(),
            };
            assert_invariants(&pet)?;
            prop_assert!(pet.last_updated >= last_seen, "last_updated moved backward");
            last_seen = pet.last_updated;
        }
    }
}
