//! Infrastructure layer - Adapters for the domain boundary traits
//!
//! - Reading sources (in-memory series, deterministic simulator)
//! - Building repository with optimistic version checks
//! - Event publishers
//! - Configuration loading and tracing setup

pub mod config;
pub mod messaging;
pub mod readings;
pub mod repositories;
pub mod telemetry;

pub use config::AnalyticsConfig;
pub use messaging::composite_publisher::CompositeEventPublisher;
pub use messaging::logging_publisher::LoggingEventPublisher;
pub use messaging::recording_publisher::RecordingEventPublisher;
pub use readings::{InMemoryReadingSource, SimulatedReadingSource, SimulatorConfig};
pub use repositories::InMemoryBuildingRepository;
