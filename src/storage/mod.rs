//! Persisted sensor configuration.

pub mod config;

pub use config::{ConfigError, ConfigStore, SensorPreferences};
