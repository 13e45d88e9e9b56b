//! Transport selection from configuration.
//!
//! Resolution is a pure function of the configuration snapshot. A missing or
//! unrecognized selector, or a BLE selection with no usable address, yields no
//! handle rather than an error.

use crate::sensors::handle::{SensorHandle, TransportFactory};
use crate::sensors::types::{SensorRole, TransportBinding, TransportKind};
use crate::storage::config::{
    ConfigStore, BLUETOOTH_SENSOR_DEFAULT, SENSOR_TYPE_DEFAULT, SENSOR_TYPE_KEY,
};

/// Decide which transport and device the configuration asks for.
pub fn select_binding(config: &dyn ConfigStore) -> Option<TransportBinding> {
    let selector = config.get_string(SENSOR_TYPE_KEY, SENSOR_TYPE_DEFAULT);

    let Some(kind) = TransportKind::from_config_value(&selector) else {
        tracing::debug!("No usable sensor type configured ({:?})", selector);
        return None;
    };

    match kind {
        TransportKind::Ant
        | TransportKind::Zephyr
        | TransportKind::Neurosky
        | TransportKind::Polar => Some(TransportBinding::dedicated(kind)),
        TransportKind::BluetoothLe => select_ble_device(config),
    }
}

/// Pick the first role with a non-blank configured address.
fn select_ble_device(config: &dyn ConfigStore) -> Option<TransportBinding> {
    let binding = SensorRole::PRIORITY.into_iter().find_map(|role| {
        let address = config.get_string(role.address_key(), BLUETOOTH_SENSOR_DEFAULT);
        let address = address.trim();
        (!address.is_empty()).then(|| TransportBinding::bluetooth_le(address, role))
    });

    if binding.is_none() {
        tracing::debug!("Bluetooth LE selected but no device address configured");
    }

    binding
}

/// Builds unstarted handles for the configured transport.
pub struct TransportResolver<F> {
    factory: F,
}

impl<F: TransportFactory> TransportResolver<F> {
    /// Create a resolver backed by the given factory.
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// Factory used to construct handles.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Resolve the configuration into a stopped handle, if any.
    pub fn resolve(&self, config: &dyn ConfigStore) -> Option<Box<dyn SensorHandle>> {
        let binding = select_binding(config)?;

        tracing::info!(
            "Resolved {} sensor (address: {:?}, role: {:?})",
            binding.transport,
            binding.address,
            binding.role
        );

        Some(self.factory.create(&binding))
    }
}
