//! Passive vital loss.
//!
//! Decay is a pure function of the pet's last stored state and the time
//! elapsed since `last_updated`. Nothing runs in the background: callers
//! apply it whenever a pet is read or acted upon, then persist the result
//! so the same interval is never charged twice.
//!
//! Vitals are whole numbers but decay is not. The part of a loss that does
//! not show in the rounded vital is kept in [`DecayCarry`], so many short
//! intervals drain exactly as much as one long one.

use chrono::{DateTime, Utc};

use crate::config::DecayRates;
use crate::models::{DecayCarry, Pet};
use crate::vitals::{clamp_vital_f64, VITAL_MAX, VITAL_MIN};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecayOutcome {
    /// Elapsed time was within the grace window; the pet is untouched.
    Skipped,
    /// Vitals were reduced and `last_updated` moved to `now`.
    Applied { elapsed_hours: f64 },
}

impl DecayOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DecayOutcome::Applied { .. })
    }
}

/// Hours from `since` to `now`. Negative spans (clock skew) count as zero.
pub fn elapsed_hours(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - since).num_milliseconds();
    if millis <= 0 {
        0.0
    } else {
        millis as f64 / MILLIS_PER_HOUR
    }
}

/// Decay one vital, returning the rounded value and its new carry.
fn decayed(value: u8, carry: f64, rate_per_hour: f64, hours: f64) -> (u8, f64) {
    let exact = (value as f64 + carry - rate_per_hour * hours)
        .clamp(VITAL_MIN as f64, VITAL_MAX as f64);
    if !exact.is_finite() {
        return (clamp_vital_f64(value as f64), 0.0);
    }
    let shown = clamp_vital_f64(exact);
    (shown, exact - shown as f64)
}

/// Apply decay for the time elapsed since `pet.last_updated`.
///
/// Happiness never decays. Each decaying vital floors at zero on its own.
pub fn apply_decay(pet: &mut Pet, now: DateTime<Utc>, rates: &DecayRates) -> DecayOutcome {
    let hours = elapsed_hours(pet.last_updated, now);
    if hours <= rates.grace_hours() {
        return DecayOutcome::Skipped;
    }

    let carry = pet.decay_carry;
    let (hunger, hunger_carry) = decayed(pet.hunger, carry.hunger, rates.hunger_per_hour, hours);
    let (hygiene, hygiene_carry) =
        decayed(pet.hygiene, carry.hygiene, rates.hygiene_per_hour, hours);
    let (health, health_carry) = decayed(pet.health, carry.health, rates.health_per_hour, hours);

    pet.hunger = hunger;
    pet.hygiene = hygiene;
    pet.health = health;
    pet.decay_carry = DecayCarry {
        hunger: hunger_carry,
        hygiene: hygiene_carry,
        health: health_carry,
    };
    pet.last_updated = now;

    log::debug!(
        "Decayed pet {} over {:.3}h: hunger={} hygiene={} health={}",
        pet.id,
        hours,
        pet.hunger,
        pet.hygiene,
        pet.health
    );

    DecayOutcome::Applied { elapsed_hours: hours }
}
