use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Thread count must be at least 1")]
    NoThreads,

    #[error("Failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },

    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
