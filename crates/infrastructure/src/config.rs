use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Outlier detection settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnomalyConfig {
    pub enabled: bool,
    /// Multiplier applied to the standard deviation
    pub threshold: f64,
    /// Series shorter than this are not analysed
    pub min_points: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 2.0,
            min_points: 10,
        }
    }
}

/// Thresholds of the efficiency recommendation rules
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EfficiencyConfig {
    pub peak_load_factor: f64,
    pub anomaly_investigation_count: usize,
    pub upgrade_threshold_kwh: f64,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            peak_load_factor: 1.5,
            anomaly_investigation_count: 5,
            upgrade_threshold_kwh: 150.0,
        }
    }
}

/// Indoor comfort band
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ComfortConfig {
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub co2_max_ppm: f64,
}

impl Default for ComfortConfig {
    fn default() -> Self {
        Self {
            temperature_min_c: 20.0,
            temperature_max_c: 24.0,
            humidity_min: 30.0,
            humidity_max: 60.0,
            co2_max_ppm: 1000.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub anomaly: AnomalyConfig,
    pub efficiency: EfficiencyConfig,
    pub comfort: ComfortConfig,
    /// KPIs computed when the caller does not name any
    pub kpis: Vec<String>,
    pub log_filter: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            anomaly: AnomalyConfig::default(),
            efficiency: EfficiencyConfig::default(),
            comfort: ComfortConfig::default(),
            kpis: vec![
                "energy_intensity".to_string(),
                "peak_demand".to_string(),
                "occupancy_utilization".to_string(),
                "equipment_availability".to_string(),
                "sensor_health".to_string(),
                "thermal_comfort".to_string(),
            ],
            log_filter: "info,application=debug".to_string(),
        }
    }
}

impl AnalyticsConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Shared settings, e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Per-environment overrides
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. TWIN__ANOMALY__THRESHOLD=3.0)
            .add_source(
                Environment::with_prefix("TWIN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert!(config.anomaly.enabled);
        assert_eq!(config.anomaly.min_points, 10);
        assert_eq!(config.efficiency.peak_load_factor, 1.5);
        assert_eq!(config.efficiency.upgrade_threshold_kwh, 150.0);
        assert_eq!(config.kpis.len(), 6);
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AnalyticsConfig =
            serde_json::from_str(r#"{"anomaly": {"threshold": 3.0}}"#).unwrap();
        assert_eq!(config.anomaly.threshold, 3.0);
        assert!(config.anomaly.enabled);
        assert_eq!(config.comfort, ComfortConfig::default());
    }
}
