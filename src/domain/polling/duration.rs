//! Duration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default pause between status polls (3 seconds)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

/// Unit suffixes and their length in milliseconds.
/// `ms` comes before `m` so the longer suffix wins.
const UNITS: &[(&str, u64)] = &[("ms", 1), ("s", 1_000), ("m", 60_000)];

/// Positive, millisecond-precision span of time as written on the command
/// line or in the config file ("500ms", "3s", "2m30s").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(StdDuration);

impl Duration {
    pub const fn from_millis(ms: u64) -> Self {
        Self(StdDuration::from_millis(ms))
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(StdDuration::from_secs(secs))
    }

    /// Default pause between status polls
    pub const fn default_poll_interval() -> Self {
        Self::from_secs(DEFAULT_POLL_INTERVAL_SECS)
    }

    /// Whole seconds, truncated
    pub const fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }

    pub fn as_millis(&self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }

    pub const fn as_std(&self) -> StdDuration {
        self.0
    }
}

/// Split the leading run of ASCII digits off `s`
fn take_number(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// Split a known unit suffix off `s`, returning its size in milliseconds
fn take_unit(s: &str) -> Option<(u64, &str)> {
    UNITS
        .iter()
        .find_map(|(suffix, ms)| s.strip_prefix(suffix).map(|rest| (*ms, rest)))
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Sum of `<number><unit>` parts, e.g. "90s", "1m30s", "1s500ms".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError {
            input: s.to_string(),
        };

        let normalized = s.trim().to_ascii_lowercase();
        let mut rest = normalized.as_str();
        let mut total_ms: u64 = 0;

        while !rest.is_empty() {
            let (value, after_number) = take_number(rest).ok_or_else(invalid)?;
            let (unit_ms, after_unit) = take_unit(after_number).ok_or_else(invalid)?;

            total_ms = value
                .checked_mul(unit_ms)
                .and_then(|ms| total_ms.checked_add(ms))
                .ok_or_else(invalid)?;
            rest = after_unit;
        }

        if total_ms == 0 {
            return Err(invalid());
        }
        Ok(Self::from_millis(total_ms))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.as_millis();
        if ms % 1000 != 0 {
            return write!(f, "{}ms", ms);
        }

        match (self.as_secs() / 60, self.as_secs() % 60) {
            (0, secs) => write!(f, "{}s", secs),
            (mins, 0) => write!(f, "{}m", mins),
            (mins, secs) => write!(f, "{}m{}s", mins, secs),
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_poll_interval()
    }
}
