use crate::DomainEvent;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PublishError {
    #[error("Failed to encode event: {0}")]
    Encoding(String),

    #[error("Event sink rejected the event: {0}")]
    Sink(String),
}

/// Downstream consumer of accepted building events
///
/// Events arrive in log order; a batch holds the events appended by one save.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError>;

    async fn publish_batch(&self, events: &[DomainEvent]) -> Result<(), PublishError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
