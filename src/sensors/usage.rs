//! Usage tracking for transport selection.
//!
//! Recording is fire-and-forget: sinks never report failure to the caller.

use crate::sensors::types::TransportKind;
use chrono::{DateTime, Utc};
use crossbeam::channel::{Receiver, Sender};

/// A transport was selected for the system connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEvent {
    /// Selected transport
    pub transport: TransportKind,
    /// When the selection happened
    pub recorded_at: DateTime<Utc>,
}

/// Receives usage events.
pub trait UsageSink: Send {
    /// Record that a transport was selected. Must not block.
    fn record_transport_selected(&self, transport: TransportKind);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUsageSink;

impl UsageSink for NoopUsageSink {
    fn record_transport_selected(&self, _transport: TransportKind) {}
}

/// Forwards events over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelUsageSink {
    tx: Sender<UsageEvent>,
}

impl ChannelUsageSink {
    /// Wrap an existing sender.
    pub fn new(tx: Sender<UsageEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiving end.
    pub fn channel() -> (Self, Receiver<UsageEvent>) {
        let (tx, rx) = crossbeam::channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl UsageSink for ChannelUsageSink {
    fn record_transport_selected(&self, transport: TransportKind) {
        let event = UsageEvent {
            transport,
            recorded_at: Utc::now(),
        };
        if self.tx.send(event).is_err() {
            tracing::trace!("Usage receiver dropped, discarding {} selection", transport);
        }
    }
}
