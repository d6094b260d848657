use serde::{Deserialize, Serialize};

use crate::config::ActionEffects;
use crate::models::Pet;
use crate::progression::gain_xp;
use crate::vitals::{raise, settle_carry};

/// A caller-initiated care action. Each raises vitals and grants XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Feed,
    Clean,
    Play,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Feed => "feed",
            Action::Clean => "clean",
            Action::Play => "play",
        }
    }

    /// Apply this action's own effect and return the number of levels gained.
    /// Decay must already have been applied.
    pub fn apply(&self, pet: &mut Pet, effects: &ActionEffects, xp_per_level: u32) -> u32 {
        let carry = &mut pet.decay_carry;
        match self {
            Action::Feed => {
                pet.hunger = raise(pet.hunger, effects.feed_hunger);
                carry.hunger = settle_carry(pet.hunger, carry.hunger);
            }
            Action::Clean => {
                pet.hygiene = raise(pet.hygiene, effects.clean_hygiene);
                carry.hygiene = settle_carry(pet.hygiene, carry.hygiene);
            }
            Action::Play => {
                pet.happiness = raise(pet.happiness, effects.play_happiness);
                pet.health = raise(pet.health, effects.play_health);
                carry.health = settle_carry(pet.health, carry.health);
            }
        }
        gain_xp(pet, effects.xp_per_action, xp_per_level)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
