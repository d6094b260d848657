pub mod pet;
pub mod stats;

pub use pet::{DecayCarry, Pet, Species, MAX_NAME_LEN};
pub use stats::StatsUpdate;
