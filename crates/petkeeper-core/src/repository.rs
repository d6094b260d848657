//! Storage seam for pet snapshots.
//!
//! The engine only ever loads, inserts and overwrites whole snapshots; how
//! they are stored is up to the implementation. [`crate::Database`] keeps
//! them in SQLite, [`MemoryRepository`] in process memory.

use std::sync::Mutex;

use uuid::Uuid;

use crate::error::{PetError, Result};
use crate::models::Pet;

pub trait PetRepository {
    fn find_by_group_id(&self, group_id: Uuid) -> Result<Option<Pet>>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>>;

    /// Page through all pets in creation order.
    fn list(&self, offset: usize, limit: usize) -> Result<Vec<Pet>>;

    /// Insert a new pet. Fails with `Conflict` if its group already has one.
    fn save(&self, pet: &Pet) -> Result<()>;

    /// Overwrite the stored snapshot with the same id.
    fn update(&self, pet: &Pet) -> Result<()>;
}

/// In-process repository.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    pets: Mutex<Vec<Pet>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Pet>> {
        self.pets.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PetRepository for MemoryRepository {
    fn find_by_group_id(&self, group_id: Uuid) -> Result<Option<Pet>> {
        Ok(self.lock().iter().find(|p| p.group_id == group_id).cloned())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>> {
        Ok(self.lock().iter().find(|p| p.id == id).cloned())
    }

    fn list(&self, offset: usize, limit: usize) -> Result<Vec<Pet>> {
        Ok(self.lock().iter().skip(offset).take(limit).cloned().collect())
    }

    fn save(&self, pet: &Pet) -> Result<()> {
        let mut pets = self.lock();
        if pets.iter().any(|p| p.group_id == pet.group_id) {
            return Err(PetError::Conflict(pet.group_id));
        }
        if pets.iter().any(|p| p.id == pet.id) {
            return Err(PetError::Data(format!("duplicate pet id {}", pet.id)));
        }
        pets.push(pet.clone());
        Ok(())
    }

    fn update(&self, pet: &Pet) -> Result<()> {
        let mut pets = self.lock();
        let slot = pets
            .iter_mut()
            .find(|p| p.id == pet.id)
            .ok_or_else(|| PetError::pet_not_found(pet.id))?;
        *slot = pet.clone();
        Ok(())
    }
}
