use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PetError {
    #[error("Pet not found: {0}")]
    NotFound(String),

    #[error("Group {0} already has a pet")]
    Conflict(Uuid),

    #[error("Invalid pet name: {0}")]
    InvalidName(String),

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(String),
}

impl PetError {
    pub fn group_not_found(group_id: Uuid) -> Self {
        PetError::NotFound(format!("no pet for group {}", group_id))
    }

    pub fn pet_not_found(pet_id: Uuid) -> Self {
        PetError::NotFound(format!("no pet with id {}", pet_id))
    }
}

pub type Result<T> = std::result::Result<T, PetError>;
