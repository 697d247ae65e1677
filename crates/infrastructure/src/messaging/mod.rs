pub mod composite_publisher;
pub mod logging_publisher;
pub mod recording_publisher;
