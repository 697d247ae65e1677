use async_trait::async_trait;
use domain::DomainEvent;
use domain::event::{EventPublisher, PublishError};
use tracing::info;

/// Writes every accepted event to the tracing pipeline as JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventPublisher;

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError> {
        let payload =
            serde_json::to_string(event).map_err(|e| PublishError::Encoding(e.to_string()))?;
        info!(
            building_id = %event.building_id(),
            event_type = event.event_type(),
            "📣 {}",
            payload
        );
        Ok(())
    }
}
