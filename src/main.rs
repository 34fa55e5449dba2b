use std::io;

use rngbench::{init_logging, run_sweep, BenchError, SweepConfig};

fn main() -> Result<(), BenchError> {
    init_logging();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_sweep(&SweepConfig::default(), &mut out)
}
