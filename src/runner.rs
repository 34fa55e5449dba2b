use std::hint::black_box;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use num_format::{Locale, ToFormattedString};
use tracing::{debug, warn};

use crate::error::BenchError;
use crate::latch::Latch;
use crate::strategy::Strategy;

/// One measured run: `threads` workers each drawing
/// `per_thread_iterations` values from `strategy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub threads: usize,
    pub per_thread_iterations: usize,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub config: RunConfig,
    pub elapsed: Duration,
    /// Workers joined after the completion latch opened.
    pub workers_joined: usize,
    /// Values the workers report having drawn.
    pub completed_draws: u64,
}

impl RunResult {
    /// Elapsed wall-clock time in whole milliseconds.
    pub fn millis(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Values drawn across all workers.
    pub fn draws(&self) -> u64 {
        self.completed_draws
    }

    pub fn draws_per_sec(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.draws() as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Times one run and returns the elapsed whole milliseconds.
pub fn measure(threads: usize, per_thread_iterations: usize, strategy: Strategy) -> Result<u64, BenchError> {
    let config = RunConfig { threads, per_thread_iterations, strategy };
    Ok(run(&config)?.millis())
}

/// Spawns the workers, holds them at a start gate, then times from opening
/// the gate until the last worker counts the completion latch down.
///
/// Thread creation is outside the timed window. Every worker has been
/// joined by the time this returns, whether it succeeds or not.
pub fn run(config: &RunConfig) -> Result<RunResult, BenchError> {
    run_with(config, &AtomicUsize::new(0), &RunHooks::default())
}

/// Seams into [`run`] used by the tests.
#[derive(Default)]
struct RunHooks<'a> {
    /// Called once every worker is spawned, before the start instant.
    before_start: Option<&'a dyn Fn()>,
    /// Treat spawning this worker as refused by the OS.
    refuse_spawn_at: Option<usize>,
}

/// `entered` counts workers that got past the gate and began drawing.
fn run_with(config: &RunConfig, entered: &AtomicUsize, hooks: &RunHooks<'_>) -> Result<RunResult, BenchError> {
    if config.threads == 0 {
        return Err(BenchError::NoThreads);
    }

    let generator = config.strategy.prepare();
    let start_gate = Latch::new(1);
    let done = Latch::new(config.threads);
    let abandoned = AtomicBool::new(false);
    let iterations = config.per_thread_iterations;

    let (elapsed, joined) = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(config.threads);

        for worker in 0..config.threads {
            let spawned = if hooks.refuse_spawn_at == Some(worker) {
                Err(io::Error::new(io::ErrorKind::WouldBlock, "thread limit reached"))
            } else {
                thread::Builder::new().name(format!("rng-worker-{worker}")).spawn_scoped(scope, || {
                    let _countdown = done.guard();
                    start_gate.wait();
                    if abandoned.load(Ordering::Acquire) {
                        return 0;
                    }
                    entered.fetch_add(1, Ordering::Relaxed);
                    let mut drawn = 0;
                    for _ in 0..iterations {
                        black_box(generator.next_f64());
                        drawn += 1;
                    }
                    drawn
                })
            };

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    warn!(worker, threads = config.threads, error = %source, "worker spawn failed, abandoning run");
                    abandoned.store(true, Ordering::Release);
                    start_gate.count_down();
                    if let Err(error) = join_workers(handles) {
                        warn!(%error, "abandoned worker failed");
                    }
                    return Err(BenchError::Spawn { worker, source });
                }
            }
        }

        if let Some(before_start) = hooks.before_start {
            before_start();
        }

        let start = Instant::now();
        start_gate.count_down();
        done.wait();
        let elapsed = start.elapsed();

        Ok((elapsed, join_workers(handles)?))
    })?;

    let result = RunResult { config: *config, elapsed, workers_joined: joined.workers, completed_draws: joined.draws };
    debug!(
        threads = config.threads,
        strategy = %config.strategy,
        elapsed_ms = result.millis(),
        draws = %result.draws().to_formatted_string(&Locale::en),
        rate = %result.draws_per_sec().to_formatted_string(&Locale::en),
        "run finished"
    );
    Ok(result)
}

struct Joined {
    workers: usize,
    draws: u64,
}

/// Joins every handle before reporting the first panicked worker.
fn join_workers(handles: Vec<ScopedJoinHandle<'_, usize>>) -> Result<Joined, BenchError> {
    let mut joined = Joined { workers: 0, draws: 0 };
    let mut panicked = None;
    for (worker, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(drawn) => {
                joined.workers += 1;
                joined.draws += drawn as u64;
            }
            Err(_) if panicked.is_none() => panicked = Some(worker),
            Err(_) => {}
        }
    }
    match panicked {
        Some(worker) => Err(BenchError::WorkerPanicked { worker }),
        None => Ok(joined),
    }
}
