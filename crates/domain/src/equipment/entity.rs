use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EquipmentStatus, EquipmentType};
use crate::error::{DomainError, Result};
use crate::ids::EquipmentId;
use crate::value::{
    EquipmentMetrics, MaintenanceSchedule, OperatingRange, WarrantyInfo, check_non_negative,
    check_not_blank,
};

/// A piece of equipment installed in a room
///
/// Every state change returns a new `Equipment`; the receiver is left as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    id: EquipmentId,
    name: String,
    model: String,
    manufacturer: String,
    equipment_type: EquipmentType,
    status: EquipmentStatus,
    power_consumption_watts: f64,
    metrics: EquipmentMetrics,
    maintenance_schedule: Option<MaintenanceSchedule>,
    operating_range: Option<OperatingRange>,
    warranty: Option<WarrantyInfo>,
    installed_at: DateTime<Utc>,
    last_maintenance: Option<DateTime<Utc>>,
}

impl Equipment {
    /// Create new operational equipment installed now
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        manufacturer: impl Into<String>,
        equipment_type: EquipmentType,
        power_consumption_watts: f64,
    ) -> Result<Self> {
        Ok(Self {
            id: EquipmentId::new(),
            name: check_not_blank("equipment name", name)?,
            model: check_not_blank("equipment model", model)?,
            manufacturer: check_not_blank("equipment manufacturer", manufacturer)?,
            equipment_type,
            status: EquipmentStatus::default(),
            power_consumption_watts: check_non_negative(
                "power consumption",
                power_consumption_watts,
            )?,
            metrics: EquipmentMetrics::default(),
            maintenance_schedule: None,
            operating_range: None,
            warranty: None,
            installed_at: Utc::now(),
            last_maintenance: None,
        })
    }

    pub fn with_operating_range(mut self, range: OperatingRange) -> Self {
        self.operating_range = Some(range);
        self
    }

    pub fn with_warranty(mut self, warranty: WarrantyInfo) -> Self {
        self.warranty = Some(warranty);
        self
    }

    pub fn with_installed_at(mut self, installed_at: DateTime<Utc>) -> Self {
        self.installed_at = installed_at;
        self
    }

    // Getters
    pub fn id(&self) -> EquipmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn equipment_type(&self) -> EquipmentType {
        self.equipment_type
    }

    pub fn status(&self) -> EquipmentStatus {
        self.status
    }

    pub fn power_consumption_watts(&self) -> f64 {
        self.power_consumption_watts
    }

    pub fn metrics(&self) -> &EquipmentMetrics {
        &self.metrics
    }

    pub fn maintenance_schedule(&self) -> Option<&MaintenanceSchedule> {
        self.maintenance_schedule.as_ref()
    }

    pub fn operating_range(&self) -> Option<&OperatingRange> {
        self.operating_range.as_ref()
    }

    pub fn warranty(&self) -> Option<&WarrantyInfo> {
        self.warranty.as_ref()
    }

    pub fn installed_at(&self) -> DateTime<Utc> {
        self.installed_at
    }

    pub fn last_maintenance(&self) -> Option<DateTime<Utc>> {
        self.last_maintenance
    }

    /// Move to `next` along a legal edge of the status state machine
    ///
    /// Entering `Maintenance` stamps the last-maintenance date.
    pub fn set_status(&self, next: EquipmentStatus) -> Result<Self> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }

        let mut updated = self.clone();
        updated.status = next;
        if next == EquipmentStatus::Maintenance {
            updated.last_maintenance = Some(Utc::now());
        }
        Ok(updated)
    }

    /// Plan the next maintenance; the date must not lie in the past
    pub fn schedule_maintenance(
        &self,
        date: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Result<Self> {
        if date < Utc::now() {
            return Err(DomainError::PastDate(date.to_rfc3339()));
        }
        Ok(Self {
            maintenance_schedule: Some(MaintenanceSchedule::new(date, description)?),
            ..self.clone()
        })
    }

    pub fn update_metrics(&self, metrics: EquipmentMetrics) -> Self {
        Self {
            metrics,
            ..self.clone()
        }
    }

    pub fn requires_maintenance(&self) -> bool {
        self.requires_maintenance_at(Utc::now())
    }

    pub fn requires_maintenance_at(&self, now: DateTime<Utc>) -> bool {
        self.status == EquipmentStatus::Failed
            || self
                .maintenance_schedule
                .as_ref()
                .is_some_and(|schedule| schedule.is_due_at(now))
    }

    pub fn is_under_warranty_at(&self, now: DateTime<Utc>) -> bool {
        self.warranty
            .as_ref()
            .is_some_and(|warranty| warranty.is_active_at(now))
    }
}
