//! Sensor transport types and errors.
//!
//! Transport selection is decoded once from the configured selector string
//! into a closed [`TransportKind`], so every dispatch over it is exhaustive.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical transport used to reach a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// ANT+ radio via USB stick
    Ant,
    /// Zephyr HxM over Bluetooth serial
    Zephyr,
    /// Neurosky headset over Bluetooth serial
    Neurosky,
    /// Polar WearLink over Bluetooth serial
    Polar,
    /// Bluetooth Low Energy, one device per sensor role
    BluetoothLe,
}

impl TransportKind {
    /// All transport kinds, in selector order.
    pub const ALL: [TransportKind; 5] = [
        TransportKind::Ant,
        TransportKind::Zephyr,
        TransportKind::Neurosky,
        TransportKind::Polar,
        TransportKind::BluetoothLe,
    ];

    /// Decode the configured selector value.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. Blank,
    /// `none` and unrecognized values yield `None`.
    pub fn from_config_value(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.config_value().eq_ignore_ascii_case(value))
    }

    /// Selector value stored in configuration for this kind.
    pub fn config_value(&self) -> &'static str {
        match self {
            TransportKind::Ant => "ant",
            TransportKind::Zephyr => "zephyr",
            TransportKind::Neurosky => "neurosky",
            TransportKind::Polar => "polar",
            TransportKind::BluetoothLe => "ble",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Ant => write!(f, "ANT+"),
            TransportKind::Zephyr => write!(f, "Zephyr"),
            TransportKind::Neurosky => write!(f, "Neurosky"),
            TransportKind::Polar => write!(f, "Polar"),
            TransportKind::BluetoothLe => write!(f, "Bluetooth LE"),
        }
    }
}

/// Sensor function advertised by a BLE device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorRole {
    /// Heart Rate Service (0x180D)
    HeartRate,
    /// Cycling Speed and Cadence Service (0x1816)
    CadenceSpeed,
}

impl SensorRole {
    /// Order in which configured BLE roles are tried.
    pub const PRIORITY: [SensorRole; 2] = [SensorRole::HeartRate, SensorRole::CadenceSpeed];

    /// Configuration key holding the device address for this role.
    pub fn address_key(&self) -> &'static str {
        match self {
            SensorRole::HeartRate => crate::storage::config::BLE_HRM_SENSOR_ID_KEY,
            SensorRole::CadenceSpeed => crate::storage::config::BLE_CSC_SENSOR_ID_KEY,
        }
    }
}

impl std::fmt::Display for SensorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorRole::HeartRate => write!(f, "Heart Rate"),
            SensorRole::CadenceSpeed => write!(f, "Speed/Cadence"),
        }
    }
}

/// Lifecycle state of a sensor handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleState {
    /// Constructed or stopped
    #[default]
    Stopped,
    /// Transport opened
    Started,
}

impl std::fmt::Display for HandleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleState::Stopped => write!(f, "Stopped"),
            HandleState::Started => write!(f, "Started"),
        }
    }
}

/// What a handle should be bound to, as decided from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportBinding {
    /// Transport to open
    pub transport: TransportKind,
    /// Device address, only for multi-role transports
    pub address: Option<String>,
    /// Sensor role, only for multi-role transports
    pub role: Option<SensorRole>,
}

impl TransportBinding {
    /// Binding for a transport that needs no device address.
    pub fn dedicated(transport: TransportKind) -> Self {
        Self {
            transport,
            address: None,
            role: None,
        }
    }

    /// Binding for a BLE device serving one role.
    pub fn bluetooth_le(address: impl Into<String>, role: SensorRole) -> Self {
        Self {
            transport: TransportKind::BluetoothLe,
            address: Some(address.into()),
            role: Some(role),
        }
    }
}

/// Which arbitrator slot a handle occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Long-lived connection used while recording
    System,
    /// Short-lived probe used while no system connection exists
    Temporary,
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotKind::System => write!(f, "system"),
            SlotKind::Temporary => write!(f, "temporary"),
        }
    }
}

/// Transport faults raised while starting or stopping a handle.
#[derive(Debug, Error)]
pub enum SensorError {
    /// Opening the transport failed
    #[error("Failed to start {transport} sensor: {message}")]
    StartFailed {
        transport: TransportKind,
        message: String,
    },

    /// Closing the transport failed
    #[error("Failed to stop {transport} sensor: {message}")]
    StopFailed {
        transport: TransportKind,
        message: String,
    },
}

impl SensorError {
    /// Transport the fault originated from.
    pub fn transport(&self) -> TransportKind {
        match self {
            SensorError::StartFailed { transport, .. }
            | SensorError::StopFailed { transport, .. } => *transport,
        }
    }
}
