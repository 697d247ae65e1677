use serde::{Deserialize, Serialize};

/// Kind of measurement a sensor produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    Temperature,
    Humidity,
    Co2,
    Occupancy,
    Light,
    Motion,
    Power,
    Energy,
    Pressure,
    Vibration,
    Smoke,
    WaterLeak,
    AirQuality,
    Sound,
}

impl SensorType {
    pub const ALL: [SensorType; 14] = [
        Self::Temperature,
        Self::Humidity,
        Self::Co2,
        Self::Occupancy,
        Self::Light,
        Self::Motion,
        Self::Power,
        Self::Energy,
        Self::Pressure,
        Self::Vibration,
        Self::Smoke,
        Self::WaterLeak,
        Self::AirQuality,
        Self::Sound,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Co2 => "CO2",
            Self::Occupancy => "Occupancy",
            Self::Light => "Light",
            Self::Motion => "Motion",
            Self::Power => "Power",
            Self::Energy => "Energy",
            Self::Pressure => "Pressure",
            Self::Vibration => "Vibration",
            Self::Smoke => "Smoke",
            Self::WaterLeak => "WaterLeak",
            Self::AirQuality => "AirQuality",
            Self::Sound => "Sound",
        }
    }

    /// Engineering unit of the readings
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%RH",
            Self::Co2 => "ppm",
            Self::Occupancy => "people",
            Self::Light => "lux",
            Self::Motion | Self::Smoke | Self::WaterLeak => "bool",
            Self::Power => "W",
            Self::Energy => "kWh",
            Self::Pressure => "kPa",
            Self::Vibration => "mm/s",
            Self::AirQuality => "AQI",
            Self::Sound => "dB",
        }
    }

    /// Plausible raw range `(min, max)` used when simulating readings
    pub fn simulated_range(&self) -> (f64, f64) {
        match self {
            Self::Temperature => (18.0, 26.0),
            Self::Humidity => (30.0, 60.0),
            Self::Co2 => (400.0, 1200.0),
            Self::Occupancy => (0.0, 50.0),
            Self::Light => (100.0, 1000.0),
            Self::Motion | Self::Smoke | Self::WaterLeak => (0.0, 1.0),
            Self::Power => (100.0, 5000.0),
            Self::Energy => (0.0, 100.0),
            Self::Pressure => (95.0, 105.0),
            Self::Vibration => (0.0, 10.0),
            Self::AirQuality => (0.0, 150.0),
            Self::Sound => (30.0, 80.0),
        }
    }
}

impl std::fmt::Display for SensorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
