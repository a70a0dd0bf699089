//! Clock adapters

mod tokio_clock;

pub use tokio_clock::TokioClock;
