use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// Half-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(DomainError::validation(format!(
                "time range ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// The `duration` leading up to `end`
    pub fn ending_at(end: DateTime<Utc>, duration: Duration) -> Result<Self> {
        let start = end.checked_sub_signed(duration).ok_or_else(|| {
            DomainError::validation(format!(
                "time range of {duration} before {end} is out of bounds"
            ))
        })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        Self {
            start: epoch,
            end: epoch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_half_open() {
        let end = Utc::now();
        let range = TimeRange::ending_at(end, Duration::hours(24)).unwrap();
        assert!(range.contains(range.start()));
        assert!(!range.contains(end));
        assert_eq!(range.duration(), Duration::hours(24));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let now = Utc::now();
        assert!(TimeRange::new(now, now - Duration::seconds(1)).is_err());
    }

    #[test]
    fn test_unrepresentable_start_rejected() {
        assert!(matches!(
            TimeRange::ending_at(Utc::now(), Duration::MAX),
            Err(DomainError::Validation(_))
        ));
    }
}
