//! Unit tests for transport resolution.

use sensor_arbiter::sensors::resolver::{select_binding, TransportResolver};
use sensor_arbiter::sensors::simulated::{SimulatedFactory, TransportCall};
use sensor_arbiter::sensors::types::{HandleState, SensorRole, TransportBinding, TransportKind};
use sensor_arbiter::storage::config::{SensorPreferences, SENSOR_TYPE_KEY};
use std::collections::HashMap;

#[test]
fn test_ble_prefers_heart_rate_when_both_set() {
    let prefs = SensorPreferences::bluetooth_le("AA:BB", "CC:DD");
    assert_eq!(
        select_binding(&prefs),
        Some(TransportBinding::bluetooth_le("AA:BB", SensorRole::HeartRate))
    );
}

#[test]
fn test_ble_falls_back_to_cadence() {
    let prefs = SensorPreferences::bluetooth_le("", "CC:DD");
    assert_eq!(
        select_binding(&prefs),
        Some(TransportBinding::bluetooth_le("CC:DD", SensorRole::CadenceSpeed))
    );
}

#[test]
fn test_ble_with_no_addresses() {
    let prefs = SensorPreferences::bluetooth_le("", " ");
    assert_eq!(select_binding(&prefs), None);
}

#[test]
fn test_absent_selector() {
    let config: HashMap<String, String> = HashMap::new();
    assert_eq!(select_binding(&config), None);
}

#[test]
fn test_unknown_selector() {
    let mut config = HashMap::new();
    config.insert(SENSOR_TYPE_KEY.to_string(), "garmin".to_string());
    assert_eq!(select_binding(&config), None);
}

#[test]
fn test_ble_addresses_absent_from_map() {
    let mut config = HashMap::new();
    config.insert(SENSOR_TYPE_KEY.to_string(), "ble".to_string());
    assert_eq!(select_binding(&config), None);
}

#[test]
fn test_dedicated_kinds() {
    for kind in [
        TransportKind::Ant,
        TransportKind::Zephyr,
        TransportKind::Neurosky,
        TransportKind::Polar,
    ] {
        let prefs = SensorPreferences::with_sensor_type(kind.config_value());
        assert_eq!(select_binding(&prefs), Some(TransportBinding::dedicated(kind)));
    }
}

#[test]
fn test_dedicated_kind_ignores_ble_addresses() {
    let prefs = SensorPreferences {
        sensor_type: "ant".to_string(),
        ble_hrm_sensor_id: "AA:BB".to_string(),
        ble_csc_sensor_id: String::new(),
    };
    assert_eq!(
        select_binding(&prefs),
        Some(TransportBinding::dedicated(TransportKind::Ant))
    );
}

#[test]
fn test_resolve_builds_stopped_handle() {
    let factory = SimulatedFactory::new();
    let journal = factory.journal().clone();
    let resolver = TransportResolver::new(factory);

    let handle = resolver
        .resolve(&SensorPreferences::bluetooth_le("AA:BB", ""))
        .unwrap();

    assert_eq!(handle.state(), HandleState::Stopped);
    assert_eq!(handle.transport(), TransportKind::BluetoothLe);
    assert_eq!(handle.address(), Some("AA:BB"));
    assert_eq!(handle.role(), Some(SensorRole::HeartRate));
    assert_eq!(journal.calls_for(handle.id()), vec![TransportCall::Created]);
}

#[test]
fn test_resolve_constructs_nothing_without_config() {
    let factory = SimulatedFactory::new();
    let journal = factory.journal().clone();
    let resolver = TransportResolver::new(factory);

    assert!(resolver.resolve(&SensorPreferences::default()).is_none());
    assert!(journal.entries().is_empty());
}
