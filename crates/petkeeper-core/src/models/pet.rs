use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PetError, Result};
use crate::vitals::VITAL_MAX;

/// Longest accepted pet name, in characters.
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    Dragon,
    Duck,
}

impl Species {
    pub const ALL: [Species; 4] = [Species::Dog, Species::Cat, Species::Dragon, Species::Duck];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Dragon => "dragon",
            Species::Duck => "duck",
        }
    }

    /// Parse a species name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dog" => Ok(Species::Dog),
            "cat" => Ok(Species::Cat),
            "dragon" => Ok(Species::Dragon),
            "duck" => Ok(Species::Duck),
            _ => Err(PetError::UnknownSpecies(s.to_string())),
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Species {
    type Err = PetError;

    fn from_str(s: &str) -> Result<Self> {
        Species::parse(s)
    }
}

/// Sub-point decay owed by each decaying vital.
///
/// The stored vital is the rounded value; `vital + carry` is the exact one.
/// Each carry stays within half a point of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DecayCarry {
    pub hunger: f64,
    pub hygiene: f64,
    pub health: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    pub species: Species,
    pub level: u32,
    pub xp: u32,
    // Vitals, always within 0..=100
    pub hunger: u8,
    pub hygiene: u8,
    pub health: u8,
    pub happiness: u8,
    #[serde(default)]
    pub decay_carry: DecayCarry,
    pub last_updated: DateTime<Utc>,
}

impl Pet {
    /// A freshly adopted pet: level 1, no XP, every vital full.
    pub fn new(group_id: Uuid, name: String, species: Species, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            name,
            species,
            level: 1,
            xp: 0,
            hunger: VITAL_MAX,
            hygiene: VITAL_MAX,
            health: VITAL_MAX,
            happiness: VITAL_MAX,
            decay_carry: DecayCarry::default(),
            last_updated: now,
        }
    }

    /// Advance `last_updated` to `now` unless that would move it backward.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_updated {
            self.last_updated = now;
        }
    }
}

/// Trim a candidate name and check it is non-empty and not too long.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PetError::InvalidName("name must not be empty".to_string()));
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(PetError::InvalidName(format!(
            "name is {} characters, limit is {}",
            len, MAX_NAME_LEN
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_pet_defaults() {
        let group = Uuid::new_v4();
        let pet = Pet::new(group, "Rex".to_string(), Species::Dog, t0());
        assert_eq!(pet.group_id, group);
        assert_eq!(pet.level, 1);
        assert_eq!(pet.xp, 0);
        assert_eq!(pet.hunger, 100);
        assert_eq!(pet.hygiene, 100);
        assert_eq!(pet.health, 100);
        assert_eq!(pet.happiness, 100);
        assert_eq!(pet.last_updated, t0());
    }

    #[test]
    fn test_species_parse() {
        assert_eq!(Species::parse("dog").unwrap(), Species::Dog);
        assert_eq!(Species::parse(" Dragon ").unwrap(), Species::Dragon);
        assert_eq!("DUCK".parse::<Species>().unwrap(), Species::Duck);
        assert!(matches!(Species::parse("hamster"), Err(PetError::UnknownSpecies(_))));
    }

    #[test]
    fn test_species_round_trips_through_as_str() {
        for species in Species::ALL {
            assert_eq!(Species::parse(species.as_str()).unwrap(), species);
        }
    }

    #[test]
    fn test_species_serializes_lowercase() {
        let json = serde_json::to_string(&Species::Cat).unwrap();
        assert_eq!(json, "\"cat\"");
    }

    #[test]
    fn test_touch_never_moves_backward() {
        let mut pet = Pet::new(Uuid::new_v4(), "Rex".to_string(), Species::Dog, t0());
        pet.touch(t0() - Duration::hours(2));
        assert_eq!(pet.last_updated, t0());
        pet.touch(t0() + Duration::minutes(5));
        assert_eq!(pet.last_updated, t0() + Duration::minutes(5));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Fluffy ").unwrap(), "Fluffy");
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }
}
