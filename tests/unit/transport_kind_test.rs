//! Unit tests for transport selector decoding.

use sensor_arbiter::sensors::types::{SensorRole, TransportKind};
use sensor_arbiter::storage::config::{BLE_CSC_SENSOR_ID_KEY, BLE_HRM_SENSOR_ID_KEY};

#[test]
fn test_every_kind_has_distinct_selector() {
    let mut values: Vec<&str> = TransportKind::ALL.iter().map(|k| k.config_value()).collect();
    values.sort();
    values.dedup();
    assert_eq!(values.len(), TransportKind::ALL.len());
}

#[test]
fn test_display_labels() {
    assert_eq!(TransportKind::Ant.to_string(), "ANT+");
    assert_eq!(TransportKind::BluetoothLe.to_string(), "Bluetooth LE");
    assert_eq!(SensorRole::CadenceSpeed.to_string(), "Speed/Cadence");
}

#[test]
fn test_role_address_keys() {
    assert_eq!(SensorRole::HeartRate.address_key(), BLE_HRM_SENSOR_ID_KEY);
    assert_eq!(SensorRole::CadenceSpeed.address_key(), BLE_CSC_SENSOR_ID_KEY);
}

#[test]
fn test_serde_names() {
    let json = serde_json::to_string(&TransportKind::BluetoothLe).unwrap();
    assert_eq!(json, "\"bluetooth_le\"");
    let role: SensorRole = serde_json::from_str("\"cadence_speed\"").unwrap();
    assert_eq!(role, SensorRole::CadenceSpeed);
}
