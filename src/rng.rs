use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::types::Player;

/// Seedable RNG for the starting-player draw.
///
/// One generator lives for the whole session so that every reset is a
/// fresh draw, while the same seed replays the same sequence.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeds from the wall clock. Works in the browser and natively.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(nanos)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Each player with probability 1/2.
    pub fn starting_player(&mut self) -> Player {
        if self.inner.gen_bool(0.5) {
            Player::One
        } else {
            Player::Two
        }
    }
}
