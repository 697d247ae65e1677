use chrono::{DateTime, Duration, Utc};
use domain::telemetry::TimeRange;

use crate::error::AnalysisError;

/// Upper bound on the number of windows a single analysis may aggregate into
pub const MAX_WINDOWS: i32 = 100_000;

/// Reject intervals that are not positive or that split `[start, end)` into
/// more than [`MAX_WINDOWS`] windows
pub fn validate_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Duration,
) -> Result<(), AnalysisError> {
    if interval <= Duration::zero() {
        return Err(AnalysisError::InvalidInput(format!(
            "aggregation interval must be positive, got {interval}"
        )));
    }
    if start >= end {
        return Ok(());
    }
    match interval.checked_mul(MAX_WINDOWS) {
        Some(covered) if covered < end - start => Err(AnalysisError::InvalidInput(format!(
            "aggregation interval {interval} yields more than {MAX_WINDOWS} windows"
        ))),
        _ => Ok(()),
    }
}

/// Successive half-open windows `[s, s + interval)` covering `[start, end)`
///
/// The last window is clipped to `end`. An empty range yields no windows.
#[derive(Debug, Clone)]
pub struct TimeWindows {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Duration,
}

impl TimeWindows {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: Duration,
    ) -> Result<Self, AnalysisError> {
        validate_interval(start, end, interval)?;
        Ok(Self {
            cursor: start,
            end,
            interval,
        })
    }

    pub fn over(range: TimeRange, interval: Duration) -> Result<Self, AnalysisError> {
        Self::new(range.start(), range.end(), interval)
    }
}

impl Iterator for TimeWindows {
    type Item = TimeRange;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.end {
            return None;
        }
        let window_end = self
            .cursor
            .checked_add_signed(self.interval)
            .map_or(self.end, |t| t.min(self.end));
        let window = TimeRange::new(self.cursor, window_end).ok()?;
        self.cursor = window_end;
        Some(window)
    }
}
