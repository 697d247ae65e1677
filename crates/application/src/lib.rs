//! Application layer - Building analytics
//!
//! - `analytics`: pure computations (trend, anomalies, recommendations, KPIs, insights)
//! - `service`: async use cases that collect readings and wrap every outcome
//!   in an `AnalysisResult`

pub mod analytics;
pub mod error;
pub mod service;

pub use analytics::AnalysisResult;
pub use error::AnalysisError;
pub use service::AnalyticsService;
