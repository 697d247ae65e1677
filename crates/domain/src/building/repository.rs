use super::Building;
use crate::DomainError;
use crate::ids::BuildingId;
use async_trait::async_trait;

/// Holder of the current accepted version of each building
///
/// `save` is a compare-and-swap: it only succeeds when the stored version
/// still equals `expected_version`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildingRepository: Send + Sync {
    async fn load(&self, id: BuildingId) -> Result<Option<Building>, DomainError>;

    async fn save(&self, building: &Building, expected_version: u64) -> Result<(), DomainError>;

    async fn list(&self) -> Result<Vec<BuildingId>, DomainError>;
}
