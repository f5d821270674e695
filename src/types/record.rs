use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Charging state of the device battery, rendered as text in exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatteryState {
    Charging,
    Full,
    Unplugged,
    #[default]
    Unknown,
}

impl fmt::Display for BatteryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BatteryState::Charging => "Charging",
            BatteryState::Full => "Full",
            BatteryState::Unplugged => "Unplugged",
            BatteryState::Unknown => "Unknown",
        };
        f.write_str(text)
    }
}

/// Motion activity classification, rendered as text in exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Activity {
    Driving,
    Running,
    Walking,
    Cycling,
    Stationary,
    #[default]
    Unknown,
    /// Activity classification is not supported by the platform
    NotAvailable,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Activity::Driving => "Driving",
            Activity::Running => "Running",
            Activity::Walking => "Walking",
            Activity::Cycling => "Cycling",
            Activity::Stationary => "Stationary",
            Activity::Unknown => "Unknown",
            Activity::NotAvailable => "NotAvailable",
        };
        f.write_str(text)
    }
}

/// One fully-formed snapshot of every sensor value at a sampling tick
///
/// A record is immutable once built: the sampler constructs it in a single
/// expression and no partially-filled record is ever observable. Optional
/// fields stay absent in JSON output so that decoding reproduces the record
/// field-for-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    /// Degrees; 0.0 when no fix has ever arrived
    pub latitude: f64,
    /// Degrees; 0.0 when no fix has ever arrived
    pub longitude: f64,
    /// Meters above sea level
    pub altitude: f64,
    /// Meters per second, never negative (raw sensor speed is clamped)
    pub speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration_z: Option<f64>,
    /// Relative humidity in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Degrees Celsius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Human-readable connectivity, e.g. "Wi-Fi - Orange" or "4G - Orange"
    pub network: String,
    /// 0.0..=1.0 when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f32>,
    pub battery_state: BatteryState,
    pub activity: Activity,
}
