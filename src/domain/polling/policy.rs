//! Poll policy value object

use std::num::NonZeroU32;
use std::str::FromStr;

use super::Duration;
use crate::domain::error::MaxAttemptsParseError;

/// Upper bound on the number of status polls for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxAttempts(NonZeroU32);

impl MaxAttempts {
    pub const fn new(attempts: NonZeroU32) -> Self {
        Self(attempts)
    }

    pub const fn get(&self) -> u32 {
        self.0.get()
    }
}

impl FromStr for MaxAttempts {
    type Err = MaxAttemptsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<NonZeroU32>()
            .map(Self)
            .map_err(|_| MaxAttemptsParseError {
                input: s.to_string(),
            })
    }
}

/// How the transcript status endpoint is polled.
///
/// The default polls every 3 seconds with no attempt limit and no deadline,
/// so a job is followed until the service reports a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollPolicy {
    interval: Duration,
    max_attempts: Option<MaxAttempts>,
    timeout: Option<Duration>,
}

impl PollPolicy {
    /// Create a policy with the given interval and no limits
    pub const fn every(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            timeout: None,
        }
    }

    /// Limit the number of status polls
    pub fn with_max_attempts(mut self, max_attempts: Option<MaxAttempts>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Bound the whole workflow by a deadline measured from its start
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn max_attempts(&self) -> Option<MaxAttempts> {
        self.max_attempts
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether another poll may follow the given number of completed polls
    pub fn allows_another(&self, polls_made: u32) -> bool {
        self.max_attempts.map_or(true, |max| polls_made < max.get())
    }
}
