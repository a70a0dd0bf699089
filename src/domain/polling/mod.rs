//! Polling domain module

mod duration;
mod policy;

pub use duration::{Duration, DEFAULT_POLL_INTERVAL_SECS};
pub use policy::{MaxAttempts, PollPolicy};
