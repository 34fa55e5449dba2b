use std::io::Write;
use std::ops::RangeInclusive;
use std::time::Instant;

use num_format::{Locale, ToFormattedString};
use tracing::info;

use crate::error::BenchError;
use crate::runner::measure;
use crate::strategy::Strategy;

/// Draws split across the workers of every run.
pub const DEFAULT_TOTAL_SIZE: usize = 10_000_000;
pub const DEFAULT_THREADS: RangeInclusive<usize> = 1..=15;

pub const HEADER: &str =
    "Threads, Math.random(), Random.nextDouble(), ThreadLocalRandom.nextDouble(), new Random().nextDouble()";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    pub total_size: usize,
    pub threads: RangeInclusive<usize>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { total_size: DEFAULT_TOTAL_SIZE, threads: DEFAULT_THREADS }
    }
}

impl SweepConfig {
    /// Each worker's share. The remainder of the integer division is not
    /// drawn by anyone. Zero threads get zero work; the runner rejects them.
    pub fn per_thread_iterations(&self, threads: usize) -> usize {
        self.total_size.checked_div(threads).unwrap_or(0)
    }
}

/// Times every strategy at every thread count and writes one CSV row per
/// thread count, flushing after each row.
pub fn run_sweep<W: Write>(config: &SweepConfig, out: &mut W) -> Result<(), BenchError> {
    info!(
        total_size = %config.total_size.to_formatted_string(&Locale::en),
        threads = ?config.threads,
        "sweep started"
    );
    let started = Instant::now();

    writeln!(out, "{HEADER}")?;
    out.flush()?;

    for threads in config.threads.clone() {
        let iterations = config.per_thread_iterations(threads);
        let mut row = threads.to_string();
        for strategy in Strategy::ALL {
            let millis = measure(threads, iterations, strategy)?;
            row.push_str(&format!(", {millis}"));
        }
        writeln!(out, "{row}")?;
        out.flush()?;
    }

    info!(elapsed_ms = started.elapsed().as_millis() as u64, "sweep finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::one(1, 10_000_000)]
    #[case::three(3, 3_333_333)]
    #[case::seven(7, 1_428_571)]
    #[case::fifteen(15, 666_666)]
    fn test_per_thread_iterations_drop_remainder(#[case] threads: usize, #[case] expected: usize) {
        assert_eq!(SweepConfig::default().per_thread_iterations(threads), expected);
    }

    #[test]
    fn test_header_matches_strategy_labels() {
        let labels: Vec<_> = Strategy::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(HEADER, format!("Threads, {}", labels.join(", ")));
    }

    #[test]
    fn test_zero_in_thread_range_fails() {
        let config = SweepConfig { total_size: 100, threads: 0..=1 };
        let mut out = Vec::new();
        assert!(matches!(run_sweep(&config, &mut out), Err(BenchError::NoThreads)));
    }
}
