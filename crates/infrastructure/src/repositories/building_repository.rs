use async_trait::async_trait;
use domain::building::BuildingRepository;
use domain::event::EventPublisher;
use domain::{Building, BuildingId, DomainError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Version-checked store of the latest accepted building per id
///
/// A save replaces the stored building only when its version still matches
/// the caller's `expected_version`; the events appended since that version
/// are then handed to the publisher. Publishing failures are logged and do
/// not undo the save.
pub struct InMemoryBuildingRepository {
    buildings: RwLock<HashMap<BuildingId, Building>>,
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl InMemoryBuildingRepository {
    pub fn new() -> Self {
        Self {
            buildings: RwLock::new(HashMap::new()),
            publisher: None,
        }
    }

    pub fn with_publisher(publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            buildings: RwLock::new(HashMap::new()),
            publisher: Some(publisher),
        }
    }
}

impl Default for InMemoryBuildingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BuildingRepository for InMemoryBuildingRepository {
    async fn load(&self, id: BuildingId) -> Result<Option<Building>, DomainError> {
        Ok(self.buildings.read().await.get(&id).cloned())
    }

    async fn save(&self, building: &Building, expected_version: u64) -> Result<(), DomainError> {
        if building.version() < expected_version {
            return Err(DomainError::InvalidState(format!(
                "building {} is at version {}, older than the expected {}",
                building.id(),
                building.version(),
                expected_version
            )));
        }

        {
            let mut buildings = self.buildings.write().await;
            let actual = buildings.get(&building.id()).map_or(0, Building::version);
            if actual != expected_version {
                warn!(
                    building_id = %building.id(),
                    expected_version,
                    actual,
                    "⚠️ Rejected stale building save"
                );
                return Err(DomainError::ConcurrencyConflict {
                    expected: expected_version,
                    actual,
                });
            }
            buildings.insert(building.id(), building.clone());
        }

        let new_events = building.events_since(expected_version);
        info!(
            building_id = %building.id(),
            version = building.version(),
            new_events = new_events.len(),
            "💾 Building saved"
        );

        if let Some(publisher) = &self.publisher {
            if new_events.is_empty() {
                return Ok(());
            }
            if let Err(e) = publisher.publish_batch(&new_events).await {
                warn!(building_id = %building.id(), "Failed to publish building events: {}", e);
            }
        } else {
            debug!(building_id = %building.id(), "No publisher configured");
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<BuildingId>, DomainError> {
        let mut ids: Vec<BuildingId> = self.buildings.read().await.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}
