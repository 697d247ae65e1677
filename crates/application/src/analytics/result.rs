use chrono::{DateTime, Utc};
use domain::telemetry::TimeRange;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Uniform envelope around every analysis payload
///
/// A failed analysis still carries a payload: the zero value of `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult<T> {
    pub subject_id: String,
    pub window: TimeRange,
    pub payload: T,
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<AnalysisError>,
    pub generated_at: DateTime<Utc>,
}

impl<T: Default> AnalysisResult<T> {
    pub fn succeeded(subject_id: impl Into<String>, window: TimeRange, payload: T) -> Self {
        Self {
            subject_id: subject_id.into(),
            window,
            payload,
            success: true,
            message: None,
            error: None,
            generated_at: Utc::now(),
        }
    }

    /// Successful outcome for a period without readings
    pub fn no_data(
        subject_id: impl Into<String>,
        window: TimeRange,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::succeeded(subject_id, window, T::default())
        }
    }

    pub fn failed(subject_id: impl Into<String>, window: TimeRange, error: AnalysisError) -> Self {
        Self {
            subject_id: subject_id.into(),
            window,
            payload: T::default(),
            success: false,
            message: Some(error.to_string()),
            error: Some(error),
            generated_at: Utc::now(),
        }
    }

    /// Fold a computation outcome into a result; `Ok(None)` means no data
    pub fn from_outcome(
        subject_id: impl Into<String>,
        window: TimeRange,
        outcome: Result<Option<T>, AnalysisError>,
        no_data_message: &str,
    ) -> Self {
        match outcome {
            Ok(Some(payload)) => Self::succeeded(subject_id, window, payload),
            Ok(None) => Self::no_data(subject_id, window, no_data_message),
            Err(error) => Self::failed(subject_id, window, error),
        }
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }
}
