//! Injected sources of randomness and time

use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform integer draws
pub trait RandomSource: Send + Sync {
    /// Draws an integer uniformly from `[0, upper_exclusive)`
    fn draw(&self, upper_exclusive: u32) -> u32;
}

/// Draws from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self, upper_exclusive: u32) -> u32 {
        rand::thread_rng().gen_range(0..upper_exclusive)
    }
}

/// Reproducible draws from a seeded generator
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Creates a generator from a fixed seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn draw(&self, upper_exclusive: u32) -> u32 {
        // A poisoned lock still holds a usable generator
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.gen_range(0..upper_exclusive)
    }
}

/// Wall clock in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    /// Current time
    fn now_millis(&self) -> i64;
}

/// System time via `chrono`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
