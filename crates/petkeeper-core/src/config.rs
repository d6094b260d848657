//! Tunable engine parameters.
//!
//! Defaults reproduce the live service: hunger, hygiene and health drain at
//! 8, 6 and 4 points per hour, each action is worth 10 XP, and a level costs
//! `level * 50` XP. A TOML file may override any subset, e.g.
//!
//! ```toml
//! xp_per_level = 50
//!
//! [decay]
//! hunger_per_hour = 12.0
//!
//! [actions]
//! feed_hunger = 25
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PetError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayRates {
    pub hunger_per_hour: f64,
    pub hygiene_per_hour: f64,
    pub health_per_hour: f64,
    /// Elapsed time at or below this is ignored entirely.
    pub grace_minutes: f64,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            hunger_per_hour: 8.0,
            hygiene_per_hour: 6.0,
            health_per_hour: 4.0,
            grace_minutes: 1.0,
        }
    }
}

impl DecayRates {
    pub fn grace_hours(&self) -> f64 {
        self.grace_minutes / 60.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionEffects {
    pub feed_hunger: u8,
    pub clean_hygiene: u8,
    pub play_happiness: u8,
    pub play_health: u8,
    pub xp_per_action: u32,
}

impl Default for ActionEffects {
    fn default() -> Self {
        Self {
            feed_hunger: 20,
            clean_hygiene: 20,
            play_happiness: 15,
            play_health: 8,
            xp_per_action: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub decay: DecayRates,
    pub actions: ActionEffects,
    /// XP cost of level N is `N * xp_per_level`.
    pub xp_per_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decay: DecayRates::default(),
            actions: ActionEffects::default(),
            xp_per_level: 50,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(s).map_err(|e| PetError::Config(format!("invalid engine config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    /// Like [`EngineConfig::load`], but logs and falls back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to load {} ({}). Falling back to defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("decay.hunger_per_hour", self.decay.hunger_per_hour),
            ("decay.hygiene_per_hour", self.decay.hygiene_per_hour),
            ("decay.health_per_hour", self.decay.health_per_hour),
            ("decay.grace_minutes", self.decay.grace_minutes),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(PetError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.xp_per_level == 0 {
            return Err(PetError::Config("xp_per_level must be at least 1".to_string()));
        }
        Ok(())
    }
}
