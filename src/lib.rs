//! Throughput comparison of random-double generation strategies across
//! thread counts.

pub mod error;
pub mod latch;
pub mod logging;
pub mod noise;
pub mod rng;
pub mod runner;
pub mod strategy;
pub mod sweep;

pub use error::BenchError;
pub use latch::{CountDown, Latch};
pub use logging::init_logging;
pub use rng::{AtomicRng, Rng};
pub use runner::{measure, run, RunConfig, RunResult};
pub use strategy::{Generator, Strategy};
pub use sweep::{run_sweep, SweepConfig, HEADER};
