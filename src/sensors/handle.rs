//! Lifecycle contract shared by every transport connection.

use crate::sensors::types::{HandleState, SensorError, SensorRole, TransportBinding, TransportKind};
use uuid::Uuid;

/// A live connection to one sensor transport.
///
/// Handles are created stopped. Only the arbitrator starts and stops them.
pub trait SensorHandle: Send {
    /// Identifier of this connection instance
    fn id(&self) -> Uuid;

    /// Transport this handle talks over
    fn transport(&self) -> TransportKind;

    /// Device address, for transports bound to a specific device
    fn address(&self) -> Option<&str>;

    /// Sensor role, for multi-role transports
    fn role(&self) -> Option<SensorRole>;

    /// Current lifecycle state
    fn state(&self) -> HandleState;

    /// Open the transport and begin receiving data.
    fn start(&mut self) -> Result<(), SensorError>;

    /// Close the transport.
    fn stop(&mut self) -> Result<(), SensorError>;

    fn is_started(&self) -> bool {
        self.state() == HandleState::Started
    }
}

impl std::fmt::Debug for dyn SensorHandle + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorHandle")
            .field("id", &self.id())
            .field("transport", &self.transport())
            .field("address", &self.address())
            .field("role", &self.role())
            .field("state", &self.state())
            .finish()
    }
}

/// Constructs transport-specific handles.
///
/// Hosts supply the implementation wired to their real drivers.
pub trait TransportFactory: Send {
    /// Build a stopped handle for the binding.
    fn create(&self, binding: &TransportBinding) -> Box<dyn SensorHandle>;
}
