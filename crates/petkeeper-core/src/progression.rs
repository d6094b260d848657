//! XP and level progression.

use crate::models::Pet;

/// XP needed to advance from `level` to `level + 1`.
pub fn level_threshold(level: u32, xp_per_level: u32) -> u64 {
    level as u64 * xp_per_level as u64
}

/// Add XP and resolve every level-up it pays for. Returns the number of
/// levels gained. Afterwards `xp < level * xp_per_level` holds.
pub fn gain_xp(pet: &mut Pet, amount: u32, xp_per_level: u32) -> u32 {
    let per_level = xp_per_level.max(1);
    let mut xp = pet.xp as u64 + amount as u64;
    let mut gained = 0;

    while xp >= level_threshold(pet.level, per_level) {
        xp -= level_threshold(pet.level, per_level);
        pet.level = pet.level.saturating_add(1);
        gained += 1;
    }
    // Below the current threshold, which itself fits in u64; the level count
    // keeps it far under u32::MAX for any reachable level.
    pet.xp = xp.min(u32::MAX as u64) as u32;

    if gained > 0 {
        log::info!("Pet {} reached level {} (+{})", pet.id, pet.level, gained);
    }
    gained
}
