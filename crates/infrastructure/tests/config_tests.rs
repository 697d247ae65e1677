use infrastructure::AnalyticsConfig;
use std::fs;

#[test]
fn test_missing_config_dir_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnalyticsConfig::load(dir.path().join("absent").to_str().unwrap()).unwrap();
    assert_eq!(config.anomaly, AnalyticsConfig::default().anomaly);
    assert_eq!(config.kpis.len(), 6);
}

#[test]
fn test_default_file_overrides_selected_keys() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        r#"
kpis = ["energy_intensity", "thermal_comfort"]

[anomaly]
threshold = 3.0
min_points = 20

[comfort]
co2_max_ppm = 800.0
"#,
    )
    .unwrap();

    let config = AnalyticsConfig::load(dir.path().to_str().unwrap()).unwrap();

    assert_eq!(config.anomaly.threshold, 3.0);
    assert_eq!(config.anomaly.min_points, 20);
    assert!(config.anomaly.enabled);
    assert_eq!(config.comfort.co2_max_ppm, 800.0);
    assert_eq!(config.comfort.temperature_min_c, 20.0);
    assert_eq!(config.kpis, vec!["energy_intensity", "thermal_comfort"]);
}

#[test]
fn test_invalid_value_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        "[anomaly]\nthreshold = \"very high\"\n",
    )
    .unwrap();

    assert!(AnalyticsConfig::load(dir.path().to_str().unwrap()).is_err());
}
