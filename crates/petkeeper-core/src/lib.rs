pub mod actions;
pub mod clock;
pub mod config;
pub mod db;
pub mod decay;
pub mod engine;
pub mod error;
pub mod models;
pub mod progression;
pub mod repository;
pub mod vitals;

pub use actions::Action;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ActionEffects, DecayRates, EngineConfig};
pub use db::Database;
pub use decay::{apply_decay, DecayOutcome};
pub use engine::{ActionOutcome, PetEngine};
pub use error::{PetError, Result};
pub use models::{DecayCarry, Pet, Species, StatsUpdate};
pub use repository::{MemoryRepository, PetRepository};
