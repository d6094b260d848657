//! The pet state engine: every operation a caller can perform on a pet.
//!
//! Each mutation is a read-decay-apply-write sequence. Sequences for the same
//! group run under that group's lock, so concurrent actions on one pet are
//! serialized while different groups proceed independently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::actions::Action;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::decay::apply_decay;
use crate::error::{PetError, Result};
use crate::models::pet::validate_name;
use crate::models::{Pet, Species, StatsUpdate};
use crate::repository::PetRepository;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Result of a feed, clean or play.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub pet: Pet,
    pub levels_gained: u32,
}

pub struct PetEngine<R, C = SystemClock> {
    repo: R,
    clock: C,
    config: EngineConfig,
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl<R: PetRepository> PetEngine<R, SystemClock> {
    /// Engine on the wall clock with default tuning.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock, EngineConfig::default())
    }
}

impl<R: PetRepository, C: Clock> PetEngine<R, C> {
    pub fn with_clock(repo: R, clock: C, config: EngineConfig) -> Self {
        Self {
            repo,
            clock,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn group_lock(&self, group_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(group_id).or_default().clone()
    }

    /// Run `f` while holding the lock for `group_id`.
    ///
    /// The table entry is dropped once no other caller holds or waits on it.
    fn serialized<T>(&self, group_id: Uuid, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock = self.group_lock(group_id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            f()
        };

        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        drop(lock);
        if locks
            .get(&group_id)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(&group_id);
        }
        result
    }

    #[cfg(test)]
    fn lock_table_len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn load(&self, group_id: Uuid) -> Result<Pet> {
        self.repo
            .find_by_group_id(group_id)?
            .ok_or_else(|| PetError::group_not_found(group_id))
    }

    /// Load, decay, run `effect`, stamp and persist. Caller holds the group lock.
    fn mutate<T>(&self, group_id: Uuid, effect: impl FnOnce(&mut Pet) -> T) -> Result<(Pet, T)> {
        let mut pet = self.load(group_id)?;
        let now = self.clock.now();
        apply_decay(&mut pet, now, &self.config.decay);
        let out = effect(&mut pet);
        pet.touch(now);
        self.repo.update(&pet)?;
        Ok((pet, out))
    }

    /// Bring a stored pet up to date, persisting only if decay was applied.
    fn refresh(&self, group_id: Uuid, now: DateTime<Utc>) -> Result<Pet> {
        let mut pet = self.load(group_id)?;
        if apply_decay(&mut pet, now, &self.config.decay).is_applied() {
            self.repo.update(&pet)?;
        }
        Ok(pet)
    }

    /// Adopt a pet for a group. Fails with `Conflict` if the group already has one.
    pub fn create(&self, group_id: Uuid, name: &str, species: Species) -> Result<Pet> {
        let name = validate_name(name)?;
        self.serialized(group_id, || {
            if self.repo.find_by_group_id(group_id)?.is_some() {
                return Err(PetError::Conflict(group_id));
            }
            let pet = Pet::new(group_id, name, species, self.clock.now());
            self.repo.save(&pet)?;
            log::info!(
                "Created {} '{}' ({}) for group {}",
                pet.species,
                pet.name,
                pet.id,
                group_id
            );
            Ok(pet)
        })
    }

    /// The group's pet with decay applied up to now.
    pub fn get(&self, group_id: Uuid) -> Result<Pet> {
        self.serialized(group_id, || self.refresh(group_id, self.clock.now()))
    }

    /// Look a pet up by its own id, with decay applied.
    pub fn get_by_id(&self, pet_id: Uuid) -> Result<Pet> {
        let pet = self
            .repo
            .find_by_id(pet_id)?
            .ok_or_else(|| PetError::pet_not_found(pet_id))?;
        self.get(pet.group_id)
    }

    /// A page of pets, each brought up to date.
    pub fn list(&self, offset: usize, limit: usize) -> Result<Vec<Pet>> {
        let page = self.repo.list(offset, limit)?;
        let now = self.clock.now();
        page.into_iter()
            .map(|p| self.serialized(p.group_id, || self.refresh(p.group_id, now)))
            .collect()
    }

    pub fn perform(&self, group_id: Uuid, action: Action) -> Result<Pet> {
        self.perform_action(group_id, action).map(|outcome| outcome.pet)
    }

    /// Like [`perform`](Self::perform), also reporting how many levels the action's XP bought.
    pub fn perform_action(&self, group_id: Uuid, action: Action) -> Result<ActionOutcome> {
        let effects = &self.config.actions;
        let xp_per_level = self.config.xp_per_level;
        let (pet, levels_gained) = self.serialized(group_id, || {
            self.mutate(group_id, |pet| action.apply(pet, effects, xp_per_level))
        })?;
        log::debug!("{} on pet {} -> level {} xp {}", action, pet.id, pet.level, pet.xp);
        Ok(ActionOutcome { pet, levels_gained })
    }

    pub fn feed(&self, group_id: Uuid) -> Result<Pet> {
        self.perform(group_id, Action::Feed)
    }

    pub fn clean(&self, group_id: Uuid) -> Result<Pet> {
        self.perform(group_id, Action::Clean)
    }

    pub fn play(&self, group_id: Uuid) -> Result<Pet> {
        self.perform(group_id, Action::Play)
    }

    pub fn rename(&self, group_id: Uuid, name: &str) -> Result<Pet> {
        let name = validate_name(name)?;
        self.serialized(group_id, || {
            self.mutate(group_id, |pet| pet.name = name).map(|(pet, ())| pet)
        })
    }

    /// Overwrite vitals directly. No decay is run and no XP is granted.
    pub fn set_stats(&self, group_id: Uuid, update: &StatsUpdate) -> Result<Pet> {
        self.serialized(group_id, || {
            let mut pet = self.load(group_id)?;
            update.apply_to(&mut pet);
            pet.touch(self.clock.now());
            self.repo.update(&pet)?;
            Ok(pet)
        })
    }
}
