//! Sensor preferences and the configuration store contract.
//!
//! Preferences are persisted as TOML next to the rest of the application data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key holding the transport selector.
pub const SENSOR_TYPE_KEY: &str = "sensor_type";
/// Key holding the BLE heart rate monitor address.
pub const BLE_HRM_SENSOR_ID_KEY: &str = "ble_hrm_sensor_id";
/// Key holding the BLE speed/cadence sensor address.
pub const BLE_CSC_SENSOR_ID_KEY: &str = "ble_csc_sensor_id";

/// Selector value meaning no sensor is configured.
pub const SENSOR_TYPE_DEFAULT: &str = "none";
/// Default BLE address (none configured).
pub const BLUETOOTH_SENSOR_DEFAULT: &str = "";

/// Read-only view of persisted settings.
///
/// Absent and blank values are treated the same by consumers.
pub trait ConfigStore {
    /// Get a string value, or `default` when the key is absent.
    fn get_string(&self, key: &str, default: &str) -> String;
}

impl ConfigStore for HashMap<String, String> {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key).cloned().unwrap_or_else(|| default.to_string())
    }
}

/// Persisted sensor selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorPreferences {
    /// Transport selector (`ant`, `zephyr`, `neurosky`, `polar`, `ble`, `none`)
    pub sensor_type: String,
    /// BLE heart rate monitor address
    pub ble_hrm_sensor_id: String,
    /// BLE speed/cadence sensor address
    pub ble_csc_sensor_id: String,
}

impl Default for SensorPreferences {
    fn default() -> Self {
        Self {
            sensor_type: SENSOR_TYPE_DEFAULT.to_string(),
            ble_hrm_sensor_id: BLUETOOTH_SENSOR_DEFAULT.to_string(),
            ble_csc_sensor_id: BLUETOOTH_SENSOR_DEFAULT.to_string(),
        }
    }
}

impl SensorPreferences {
    /// Preferences selecting a transport that needs no device address.
    pub fn with_sensor_type(sensor_type: impl Into<String>) -> Self {
        Self {
            sensor_type: sensor_type.into(),
            ..Default::default()
        }
    }

    /// Preferences selecting BLE with the given role addresses.
    pub fn bluetooth_le(hrm: impl Into<String>, csc: impl Into<String>) -> Self {
        Self {
            sensor_type: crate::sensors::TransportKind::BluetoothLe
                .config_value()
                .to_string(),
            ble_hrm_sensor_id: hrm.into(),
            ble_csc_sensor_id: csc.into(),
        }
    }
}

impl ConfigStore for SensorPreferences {
    fn get_string(&self, key: &str, default: &str) -> String {
        match key {
            SENSOR_TYPE_KEY => self.sensor_type.clone(),
            BLE_HRM_SENSOR_ID_KEY => self.ble_hrm_sensor_id.clone(),
            BLE_CSC_SENSOR_ID_KEY => self.ble_csc_sensor_id.clone(),
            _ => default.to_string(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "sensorarbiter", "SensorArbiter")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the sensor preferences file path.
///
/// Hosts pass this to [`load_preferences_from`] and [`save_preferences_to`].
pub fn get_preferences_path() -> PathBuf {
    get_data_dir().join("sensors.toml")
}

/// Load sensor preferences from `path`, falling back to defaults if it does not exist.
pub fn load_preferences_from(path: &Path) -> Result<SensorPreferences, ConfigError> {
    if !path.exists() {
        tracing::debug!("No sensor preferences at {}, using defaults", path.display());
        return Ok(SensorPreferences::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Save sensor preferences to `path`.
pub fn save_preferences_to(path: &Path, prefs: &SensorPreferences) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(prefs).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    tracing::info!("Saved sensor preferences to {}", path.display());

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
