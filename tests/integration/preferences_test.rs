//! Integration tests driving the arbitrator from persisted preferences.

use sensor_arbiter::sensors::simulated::SimulatedFactory;
use sensor_arbiter::sensors::types::{SensorRole, TransportKind};
use sensor_arbiter::sensors::SensorArbitrator;
use sensor_arbiter::storage::config::{load_preferences_from, save_preferences_to, SensorPreferences};
use tempfile::TempDir;

#[test]
fn test_saved_ble_preferences_select_cadence_sensor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sensors.toml");
    save_preferences_to(&path, &SensorPreferences::bluetooth_le("", "11:22:33:44:55:66")).unwrap();

    let prefs = load_preferences_from(&path).unwrap();
    let mut arb = SensorArbitrator::new(SimulatedFactory::new());
    let handle = arb.acquire_system(&prefs).unwrap().unwrap();

    assert_eq!(handle.transport(), TransportKind::BluetoothLe);
    assert_eq!(handle.role(), Some(SensorRole::CadenceSpeed));
    assert_eq!(handle.address(), Some("11:22:33:44:55:66"));
}

#[test]
fn test_hand_written_preferences_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sensors.toml");
    std::fs::write(
        &path,
        "sensor_type = \"ble\"\nble_hrm_sensor_id = \"AA:BB\"\nble_csc_sensor_id = \"CC:DD\"\n",
    )
    .unwrap();

    let prefs = load_preferences_from(&path).unwrap();
    let mut arb = SensorArbitrator::new(SimulatedFactory::new());
    let handle = arb.acquire_system(&prefs).unwrap().unwrap();

    assert_eq!(handle.role(), Some(SensorRole::HeartRate));
    assert_eq!(handle.address(), Some("AA:BB"));
}

#[test]
fn test_missing_preferences_yield_no_sensor() {
    let dir = TempDir::new().unwrap();
    let prefs = load_preferences_from(&dir.path().join("absent.toml")).unwrap();

    let mut arb = SensorArbitrator::new(SimulatedFactory::new());
    assert!(arb.acquire_system(&prefs).unwrap().is_none());
}
