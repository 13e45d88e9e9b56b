//! Sensor transport arbitration.
//!
//! Resolves the configured transport into a handle and guarantees that only
//! one connection at a time owns the underlying radio.

pub mod arbitrator;
pub mod handle;
pub mod resolver;
pub mod simulated;
pub mod types;
pub mod usage;

pub use arbitrator::SensorArbitrator;
pub use handle::{SensorHandle, TransportFactory};
pub use resolver::{select_binding, TransportResolver};
pub use simulated::{
    JournalEntry, SimulatedFactory, SimulatedHandle, TransportCall, TransportJournal,
};
pub use types::{HandleState, SensorError, SensorRole, SlotKind, TransportBinding, TransportKind};
pub use usage::{ChannelUsageSink, NoopUsageSink, UsageEvent, UsageSink};
