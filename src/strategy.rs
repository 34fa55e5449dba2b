use std::fmt;

use once_cell::sync::Lazy;
use rand::Rng as _;

use crate::rng::{AtomicRng, Rng};

/// Process-wide generator behind [`Strategy::GlobalShared`].
static GLOBAL_RNG: Lazy<AtomicRng> = Lazy::new(AtomicRng::from_entropy);

/// The four ways of producing a random double that the benchmark compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One global generator shared by every thread, synchronized internally.
    GlobalShared,
    /// One instance per run, shared by every worker with no synchronization.
    SharedInstance,
    /// The runtime's per-thread generator.
    ThreadLocal,
    /// A freshly seeded generator on every call.
    PerCallInstance,
}

impl Strategy {
    /// CSV column order.
    pub const ALL: [Strategy; 4] = [
        Strategy::GlobalShared,
        Strategy::SharedInstance,
        Strategy::ThreadLocal,
        Strategy::PerCallInstance,
    ];

    /// Column label in the CSV header.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::GlobalShared => "Math.random()",
            Strategy::SharedInstance => "Random.nextDouble()",
            Strategy::ThreadLocal => "ThreadLocalRandom.nextDouble()",
            Strategy::PerCallInstance => "new Random().nextDouble()",
        }
    }

    /// Builds the state one run needs. Only [`Strategy::SharedInstance`]
    /// allocates anything here.
    pub fn prepare(self) -> Generator {
        match self {
            Strategy::GlobalShared => Generator::GlobalShared,
            Strategy::SharedInstance => Generator::SharedInstance(AtomicRng::from_entropy()),
            Strategy::ThreadLocal => Generator::ThreadLocal,
            Strategy::PerCallInstance => Generator::PerCallInstance,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::GlobalShared => "global-shared",
            Strategy::SharedInstance => "shared-instance",
            Strategy::ThreadLocal => "thread-local",
            Strategy::PerCallInstance => "per-call-instance",
        };
        f.write_str(name)
    }
}

/// A [`Strategy`] ready to be called from many threads for one run.
#[derive(Debug)]
pub enum Generator {
    GlobalShared,
    SharedInstance(AtomicRng),
    ThreadLocal,
    PerCallInstance,
}

impl Generator {
    pub fn strategy(&self) -> Strategy {
        match self {
            Generator::GlobalShared => Strategy::GlobalShared,
            Generator::SharedInstance(_) => Strategy::SharedInstance,
            Generator::ThreadLocal => Strategy::ThreadLocal,
            Generator::PerCallInstance => Strategy::PerCallInstance,
        }
    }

    /// Produces one value in [0, 1).
    #[inline]
    pub fn next_f64(&self) -> f64 {
        match self {
            Generator::GlobalShared => GLOBAL_RNG.next_synchronized(),
            Generator::SharedInstance(rng) => rng.next_racy(),
            Generator::ThreadLocal => rand::thread_rng().gen::<f64>(),
            Generator::PerCallInstance => Rng::new().rand(),
        }
    }
}
