use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use num_traits::AsPrimitive;

use crate::noise::{self, SeedType, SEED};

/// Bumped on every time-based seed so two generators created within the
/// same clock tick still diverge.
static SEED_UNIQUIFIER: AtomicU64 = AtomicU64::new(0x2545_F491_4F6C_DD1D);

/// Mixes the wall clock with the process-wide uniquifier.
pub fn entropy_seed() -> SeedType {
    let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    let nanos: SeedType = since_epoch.subsec_nanos().as_();
    let secs: SeedType = since_epoch.as_secs();
    let unique = SEED_UNIQUIFIER.fetch_add(noise::BITS[1], Ordering::Relaxed);
    noise::get_fast_1d_noise(secs ^ nanos ^ unique, SEED)
}

/// Single-owner generator. Each call to [`Rng::rand`] advances the state
/// through the full noise hash.
#[repr(align(64))]
#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: SeedType,
    seed: SeedType,
}

impl Default for Rng {
    fn default() -> Self {
        Self::from_seed(entropy_seed())
    }
}

impl Rng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: impl AsPrimitive<SeedType>) -> Self {
        let seed = seed.as_();
        Self { state: noise::get_fast_1d_noise(seed, SEED), seed }
    }

    pub fn state(&self) -> SeedType {
        self.state
    }

    pub fn seed(&self) -> SeedType {
        self.seed
    }

    #[inline]
    pub fn rand(&mut self) -> f64 {
        self.state = noise::step(self.state, self.seed);
        noise::to_unit(self.state)
    }
}

/// Generator whose state can be advanced through a shared reference.
///
/// Sits on its own cache line so contention measured between workers is
/// contention on this state and nothing else.
#[repr(align(64))]
#[derive(Debug)]
pub struct AtomicRng {
    state: AtomicU64,
    seed: SeedType,
}

impl AtomicRng {
    pub fn from_seed(seed: impl AsPrimitive<SeedType>) -> Self {
        let seed = seed.as_();
        Self { state: AtomicU64::new(noise::get_fast_1d_noise(seed, SEED)), seed }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(entropy_seed())
    }

    pub fn state(&self) -> SeedType {
        self.state.load(Ordering::Relaxed)
    }

    /// Advances with a compare-and-swap loop. Every caller observes a
    /// distinct state transition.
    #[inline]
    pub fn next_synchronized(&self) -> f64 {
        let mut current = self.state.load(Ordering::Relaxed);
        loop {
            let next = noise::step(current, self.seed);
            match self.state.compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return noise::to_unit(next),
                Err(actual) => current = actual,
            }
        }
    }

    /// Advances with a plain load then store. Concurrent callers race:
    /// updates may be lost and two callers may receive the same value.
    /// The race is on the generator's logical state only; every access is
    /// atomic.
    #[inline]
    pub fn next_racy(&self) -> f64 {
        let next = noise::step(self.state.load(Ordering::Relaxed), self.seed);
        self.state.store(next, Ordering::Relaxed);
        noise::to_unit(next)
    }
}
