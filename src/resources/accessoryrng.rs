//! Random source for accessory timing jitter.
//!
//! Random delays only make blinking look natural, so any generator will do.
//! Seeding is exposed so headless runs and tests are reproducible.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug, Clone)]
pub struct AccessoryRng {
    pub rng: Rng,
}

impl Default for AccessoryRng {
    fn default() -> Self {
        Self { rng: Rng::new() }
    }
}

impl AccessoryRng {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    /// Uniform integer in `[min, max]`; a reversed range is swapped.
    pub fn between(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.u32(lo..=hi)
    }
}
