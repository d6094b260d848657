use serde::{Deserialize, Serialize};

use crate::models::Pet;
use crate::vitals::clamp_vital;

/// Administrative override of any subset of the four vitals.
///
/// Values are taken as wide signed integers and clamped into range when
/// applied, so an out-of-range request saturates instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsUpdate {
    pub hunger: Option<i64>,
    pub hygiene: Option<i64>,
    pub health: Option<i64>,
    pub happiness: Option<i64>,
}

impl StatsUpdate {
    pub fn is_empty(&self) -> bool {
        self.hunger.is_none()
            && self.hygiene.is_none()
            && self.health.is_none()
            && self.happiness.is_none()
    }

    /// Overwrite the provided vitals, discarding any decay they still owed.
    /// Does not touch XP or timestamps.
    pub fn apply_to(&self, pet: &mut Pet) {
        if let Some(v) = self.hunger {
            pet.hunger = clamp_vital(v);
            pet.decay_carry.hunger = 0.0;
        }
        if let Some(v) = self.hygiene {
            pet.hygiene = clamp_vital(v);
            pet.decay_carry.hygiene = 0.0;
        }
        if let Some(v) = self.health {
            pet.health = clamp_vital(v);
            pet.decay_carry.health = 0.0;
        }
        if let Some(v) = self.happiness {
            pet.happiness = clamp_vital(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Species;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_partial_update_leaves_other_vitals() {
        let mut pet = Pet::new(Uuid::new_v4(), "Rex".to_string(), Species::Dog, Utc::now());
        let update = StatsUpdate {
            hunger: Some(30),
            ..Default::default()
        };
        update.apply_to(&mut pet);
        assert_eq!(pet.hunger, 30);
        assert_eq!(pet.hygiene, 100);
        assert_eq!(pet.health, 100);
        assert_eq!(pet.happiness, 100);
    }

    #[test]
    fn test_each_field_clamped_independently() {
        let mut pet = Pet::new(Uuid::new_v4(), "Rex".to_string(), Species::Cat, Utc::now());
        let update = StatsUpdate {
            hunger: Some(-20),
            hygiene: Some(250),
            health: Some(42),
            happiness: Some(0),
        };
        update.apply_to(&mut pet);
        assert_eq!(pet.hunger, 0);
        assert_eq!(pet.hygiene, 100);
        assert_eq!(pet.health, 42);
        assert_eq!(pet.happiness, 0);
        assert_eq!(pet.xp, 0);
    }

    #[test]
    fn test_override_clears_only_that_carry() {
        let mut pet = Pet::new(Uuid::new_v4(), "Rex".to_string(), Species::Dog, Utc::now());
        pet.decay_carry.hunger = -0.4;
        pet.decay_carry.health = 0.3;
        StatsUpdate { hunger: Some(60), ..Default::default() }.apply_to(&mut pet);
        assert_eq!(pet.decay_carry.hunger, 0.0);
        assert_eq!(pet.decay_carry.health, 0.3);
    }

    #[test]
    fn test_is_empty() {
        assert!(StatsUpdate::default().is_empty());
        assert!(!StatsUpdate { happiness: Some(1), ..Default::default() }.is_empty());
    }
}
