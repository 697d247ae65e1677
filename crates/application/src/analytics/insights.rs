use chrono::{DateTime, Utc};
use domain::telemetry::{EnergyReading, EnvironmentalReading};
use domain::{Building, EquipmentStatus};
use infrastructure::config::ComfortConfig;
use serde::{Deserialize, Serialize};

use super::anomaly::ConsumptionAnomaly;
use super::comfort::comfort_score;
use super::statistics::mean;
use super::trend::calculate_consumption_trend;

/// Subject area of an insight; declaration order breaks priority ties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InsightCategory {
    Energy,
    Environmental,
    Equipment,
    Operational,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub title: String,
    pub description: String,
    /// 0-100, higher is more urgent
    pub impact_score: f64,
    pub recommended_action: Option<String>,
}

impl Insight {
    pub fn new(
        category: InsightCategory,
        title: impl Into<String>,
        description: impl Into<String>,
        impact_score: f64,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            description: description.into(),
            impact_score: impact_score.clamp(0.0, 100.0),
            recommended_action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.recommended_action = Some(action.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub insights: Vec<Insight>,
}

/// Inputs shared by all insight generators
pub struct InsightContext<'a> {
    pub building: &'a Building,
    pub energy: &'a [EnergyReading],
    pub anomalies: &'a [ConsumptionAnomaly],
    pub environment: &'a [EnvironmentalReading],
    pub comfort: &'a ComfortConfig,
    pub now: DateTime<Utc>,
}

pub trait InsightGenerator: Send + Sync {
    fn category(&self) -> InsightCategory;

    fn generate(&self, context: &InsightContext<'_>) -> Vec<Insight>;
}

/// Trend change (in percent) worth reporting
const SIGNIFICANT_TREND_PERCENT: f64 = 10.0;

pub struct EnergyInsights;

impl InsightGenerator for EnergyInsights {
    fn category(&self) -> InsightCategory {
        InsightCategory::Energy
    }

    fn generate(&self, context: &InsightContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();
        let values: Vec<f64> = context.energy.iter().map(|r| r.kwh).collect();

        match calculate_consumption_trend(&values) {
            Some(trend) if trend > SIGNIFICANT_TREND_PERCENT => insights.push(
                Insight::new(
                    self.category(),
                    "Rising energy consumption",
                    format!("Consumption grew {trend:.1}% over the period"),
                    trend,
                )
                .with_action("Review schedules and setpoints of the largest loads"),
            ),
            Some(trend) if trend < -SIGNIFICANT_TREND_PERCENT => insights.push(Insight::new(
                self.category(),
                "Falling energy consumption",
                format!("Consumption dropped {:.1}% over the period", trend.abs()),
                30.0,
            )),
            _ => {}
        }

        if !context.anomalies.is_empty() {
            let count = context.anomalies.len();
            insights.push(
                Insight::new(
                    self.category(),
                    "Unusual consumption",
                    format!("{count} readings deviate strongly from the average"),
                    20.0 + 10.0 * count as f64,
                )
                .with_action("Check the flagged periods for faults or unexpected usage"),
            );
        }

        insights
    }
}

pub struct EnvironmentalInsights;

impl InsightGenerator for EnvironmentalInsights {
    fn category(&self) -> InsightCategory {
        InsightCategory::Environmental
    }

    fn generate(&self, context: &InsightContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(score) =
            comfort_score(context.environment, context.comfort).filter(|s| *s < 80.0)
        {
            insights.push(
                Insight::new(
                    self.category(),
                    "Comfort band frequently missed",
                    format!("Only {score:.0}% of readings were within the comfort band"),
                    100.0 - score,
                )
                .with_action("Tune HVAC setpoints and schedules"),
            );
        }

        let co2: Vec<f64> = context
            .environment
            .iter()
            .map(|r| r.conditions.co2_ppm())
            .collect();
        if let Some(average) = mean(&co2).filter(|avg| *avg > context.comfort.co2_max_ppm) {
            insights.push(
                Insight::new(
                    self.category(),
                    "Poor ventilation",
                    format!(
                        "Average CO2 of {average:.0} ppm exceeds {:.0} ppm",
                        context.comfort.co2_max_ppm
                    ),
                    70.0,
                )
                .with_action("Increase fresh air supply"),
            );
        }

        insights
    }
}

pub struct EquipmentInsights;

impl InsightGenerator for EquipmentInsights {
    fn category(&self) -> InsightCategory {
        InsightCategory::Equipment
    }

    fn generate(&self, context: &InsightContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();
        let equipment = context.building.all_equipment();

        let failed = equipment
            .iter()
            .filter(|e| e.status() == EquipmentStatus::Failed)
            .count();
        if failed > 0 {
            insights.push(
                Insight::new(
                    self.category(),
                    "Failed equipment",
                    format!("{failed} equipment items are out of order"),
                    40.0 + 15.0 * failed as f64,
                )
                .with_action("Dispatch repairs"),
            );
        }

        let due = equipment
            .iter()
            .filter(|e| e.status() != EquipmentStatus::Failed)
            .filter(|e| e.requires_maintenance_at(context.now))
            .count();
        if due > 0 {
            insights.push(Insight::new(
                self.category(),
                "Maintenance due",
                format!("{due} equipment items have reached their maintenance date"),
                50.0,
            ));
        }

        let uncalibrated = context
            .building
            .all_sensors()
            .into_iter()
            .filter(|s| s.requires_calibration_at(context.now))
            .count();
        if uncalibrated > 0 {
            insights.push(Insight::new(
                self.category(),
                "Sensors need calibration",
                format!("{uncalibrated} sensors are past their calibration interval"),
                35.0,
            ));
        }

        insights
    }
}

pub struct OperationalInsights;

impl InsightGenerator for OperationalInsights {
    fn category(&self) -> InsightCategory {
        InsightCategory::Operational
    }

    fn generate(&self, context: &InsightContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        if context.building.is_in_maintenance() {
            insights.push(Insight::new(
                self.category(),
                "Building in maintenance mode",
                "Structural changes are locked until maintenance ends",
                60.0,
            ));
        }

        let rooms = context.building.all_rooms();
        let consumed: f64 = context.energy.iter().map(|r| r.kwh).sum();
        if !rooms.is_empty() && consumed > 0.0 && rooms.iter().all(|r| !r.is_occupied()) {
            insights.push(
                Insight::new(
                    self.category(),
                    "Energy used while unoccupied",
                    format!("{consumed:.1} kWh consumed with no occupied rooms"),
                    45.0,
                )
                .with_action("Align building services with occupancy"),
            );
        }

        insights
    }
}

/// The four built-in generators in category order
pub fn default_generators() -> Vec<Box<dyn InsightGenerator>> {
    vec![
        Box::new(EnergyInsights),
        Box::new(EnvironmentalInsights),
        Box::new(EquipmentInsights),
        Box::new(OperationalInsights),
    ]
}

/// Order by impact (highest first), then category, then generation order
pub fn prioritize(mut insights: Vec<Insight>) -> Vec<Insight> {
    insights.sort_by(|a, b| {
        b.impact_score
            .total_cmp(&a.impact_score)
            .then(a.category.cmp(&b.category))
    });
    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(category: InsightCategory, title: &str, impact: f64) -> Insight {
        Insight::new(category, title, "", impact)
    }

    #[test]
    fn test_prioritize_by_impact_then_category_then_order() {
        let insights = vec![
            insight(InsightCategory::Operational, "op", 50.0),
            insight(InsightCategory::Energy, "energy-a", 50.0),
            insight(InsightCategory::Equipment, "equipment", 90.0),
            insight(InsightCategory::Energy, "energy-b", 50.0),
            insight(InsightCategory::Environmental, "env", 10.0),
        ];

        let titles: Vec<String> = prioritize(insights).into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["equipment", "energy-a", "energy-b", "op", "env"]);
    }

    #[test]
    fn test_impact_is_clamped() {
        assert_eq!(insight(InsightCategory::Energy, "x", 180.0).impact_score, 100.0);
        assert_eq!(insight(InsightCategory::Energy, "x", -3.0).impact_score, 0.0);
    }

    #[test]
    fn test_default_generators_cover_every_category() {
        let categories: Vec<InsightCategory> =
            default_generators().iter().map(|g| g.category()).collect();
        assert_eq!(
            categories,
            vec![
                InsightCategory::Energy,
                InsightCategory::Environmental,
                InsightCategory::Equipment,
                InsightCategory::Operational,
            ]
        );
    }
}
