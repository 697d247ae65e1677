use async_trait::async_trait;
use domain::DomainEvent;
use domain::event::{EventPublisher, PublishError};
use std::sync::Arc;
use tracing::error;

/// Fans events out to several publishers
///
/// A failing publisher is logged and skipped so the others still receive the
/// events. The call only fails when every publisher failed.
pub struct CompositeEventPublisher {
    publishers: Vec<Arc<dyn EventPublisher>>,
}

impl CompositeEventPublisher {
    pub fn new(publishers: Vec<Arc<dyn EventPublisher>>) -> Self {
        Self { publishers }
    }

    fn settle(&self, outcomes: Vec<Result<(), PublishError>>) -> Result<(), PublishError> {
        let mut last_failure = None;
        let mut delivered = 0;
        for outcome in outcomes {
            match outcome {
                Ok(()) => delivered += 1,
                Err(e) => {
                    error!("Failed to publish to one of the publishers: {}", e);
                    last_failure = Some(e);
                }
            }
        }
        match last_failure {
            Some(e) if delivered == 0 => Err(e),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl EventPublisher for CompositeEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError> {
        let mut outcomes = Vec::with_capacity(self.publishers.len());
        for publisher in &self.publishers {
            outcomes.push(publisher.publish(event).await);
        }
        self.settle(outcomes)
    }

    async fn publish_batch(&self, events: &[DomainEvent]) -> Result<(), PublishError> {
        let mut outcomes = Vec::with_capacity(self.publishers.len());
        for publisher in &self.publishers {
            outcomes.push(publisher.publish_batch(events).await);
        }
        self.settle(outcomes)
    }
}
