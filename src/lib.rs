//! Sensor Arbiter - exclusive ownership of fitness sensor transports
//!
//! Selects the configured sensor transport (ANT+, Bluetooth LE, or a
//! dedicated serial protocol), builds a connection for it, and arbitrates
//! between a long-lived system connection and short-lived probing connections
//! so the radio is never opened twice.

pub mod logging;
pub mod sensors;
pub mod storage;

// Re-export commonly used types
pub use sensors::arbitrator::SensorArbitrator;
pub use sensors::handle::{SensorHandle, TransportFactory};
pub use sensors::types::{SensorError, SensorRole, TransportKind};
pub use storage::config::{ConfigStore, SensorPreferences};
