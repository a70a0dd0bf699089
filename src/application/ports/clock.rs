//! Clock port interface

use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Port for reading time and sleeping between polls
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;

    /// Suspend the current task for the given duration
    async fn sleep(&self, duration: Duration);
}
