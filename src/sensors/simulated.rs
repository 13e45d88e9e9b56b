//! In-process transport implementations.
//!
//! Used by hosts without sensor hardware attached and by tests. Every
//! lifecycle call is appended to a shared [`TransportJournal`] so callers can
//! check the order of start/stop transitions.

use crate::sensors::handle::{SensorHandle, TransportFactory};
use crate::sensors::types::{HandleState, SensorError, SensorRole, TransportBinding, TransportKind};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Lifecycle call made on a simulated handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCall {
    /// Handle constructed by the factory
    Created,
    /// Transport opened successfully
    Started,
    /// Transport closed successfully
    Stopped,
}

/// One recorded lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// Handle the call was made on
    pub handle_id: Uuid,
    /// Transport of that handle
    pub transport: TransportKind,
    /// Device address, for multi-role transports
    pub address: Option<String>,
    /// Sensor role, for multi-role transports
    pub role: Option<SensorRole>,
    /// Lifecycle call
    pub call: TransportCall,
}

/// Shared, ordered record of lifecycle calls.
#[derive(Debug, Clone, Default)]
pub struct TransportJournal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl TransportJournal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<JournalEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, entry: JournalEntry) {
        self.lock().push(entry);
    }

    /// Snapshot of all entries in call order.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.lock().clone()
    }

    /// Calls recorded for one handle.
    pub fn calls_for(&self, handle_id: Uuid) -> Vec<TransportCall> {
        self.lock()
            .iter()
            .filter(|e| e.handle_id == handle_id)
            .map(|e| e.call)
            .collect()
    }

    /// Number of handles started and not yet successfully stopped.
    pub fn open_connections(&self) -> usize {
        let mut open = HashSet::new();
        for entry in self.lock().iter() {
            match entry.call {
                TransportCall::Started => {
                    open.insert(entry.handle_id);
                }
                TransportCall::Stopped => {
                    open.remove(&entry.handle_id);
                }
                TransportCall::Created => {}
            }
        }
        open.len()
    }
}

/// Transports whose lifecycle calls should fail.
#[derive(Debug, Default)]
struct FaultPlan {
    start: HashSet<TransportKind>,
    stop: HashSet<TransportKind>,
}

/// Fault plan shared between a factory and every handle it built.
#[derive(Debug, Clone, Default)]
struct SharedFaults(Arc<Mutex<FaultPlan>>);

impl SharedFaults {
    fn lock(&self) -> MutexGuard<'_, FaultPlan> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Simulated connection that follows the handle lifecycle.
#[derive(Debug)]
pub struct SimulatedHandle {
    id: Uuid,
    binding: TransportBinding,
    state: HandleState,
    faults: SharedFaults,
    journal: TransportJournal,
}

impl SimulatedHandle {
    fn new(binding: TransportBinding, faults: SharedFaults, journal: TransportJournal) -> Self {
        let handle = Self {
            id: Uuid::new_v4(),
            binding,
            state: HandleState::Stopped,
            faults,
            journal,
        };
        handle.record(TransportCall::Created);
        handle
    }

    fn record(&self, call: TransportCall) {
        self.journal.push(JournalEntry {
            handle_id: self.id,
            transport: self.binding.transport,
            address: self.binding.address.clone(),
            role: self.binding.role,
            call,
        });
    }
}

impl SensorHandle for SimulatedHandle {
    fn id(&self) -> Uuid {
        self.id
    }

    fn transport(&self) -> TransportKind {
        self.binding.transport
    }

    fn address(&self) -> Option<&str> {
        self.binding.address.as_deref()
    }

    fn role(&self) -> Option<SensorRole> {
        self.binding.role
    }

    fn state(&self) -> HandleState {
        self.state
    }

    fn start(&mut self) -> Result<(), SensorError> {
        if self.faults.lock().start.contains(&self.binding.transport) {
            return Err(SensorError::StartFailed {
                transport: self.binding.transport,
                message: "simulated radio unavailable".to_string(),
            });
        }
        self.state = HandleState::Started;
        self.record(TransportCall::Started);
        tracing::debug!("Simulated {} sensor {} started", self.binding.transport, self.id);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SensorError> {
        // A failed stop leaves the radio open.
        if self.faults.lock().stop.contains(&self.binding.transport) {
            return Err(SensorError::StopFailed {
                transport: self.binding.transport,
                message: "simulated driver fault".to_string(),
            });
        }
        self.state = HandleState::Stopped;
        self.record(TransportCall::Stopped);
        tracing::debug!("Simulated {} sensor {} stopped", self.binding.transport, self.id);
        Ok(())
    }
}

/// Factory producing [`SimulatedHandle`]s.
#[derive(Debug, Clone, Default)]
pub struct SimulatedFactory {
    journal: TransportJournal,
    faults: SharedFaults,
}

impl SimulatedFactory {
    /// Create a factory with an empty journal and no faults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `start` fail for handles on this transport.
    pub fn failing_start(self, transport: TransportKind) -> Self {
        self.faults.lock().start.insert(transport);
        self
    }

    /// Make `stop` fail for handles on this transport.
    pub fn failing_stop(self, transport: TransportKind) -> Self {
        self.faults.lock().stop.insert(transport);
        self
    }

    /// Let every handle, including ones already built, start and stop normally.
    pub fn clear_faults(&self) {
        let mut faults = self.faults.lock();
        faults.start.clear();
        faults.stop.clear();
    }

    /// Journal shared by every handle this factory builds.
    pub fn journal(&self) -> &TransportJournal {
        &self.journal
    }
}

impl TransportFactory for SimulatedFactory {
    fn create(&self, binding: &TransportBinding) -> Box<dyn SensorHandle> {
        Box::new(SimulatedHandle::new(
            binding.clone(),
            self.faults.clone(),
            self.journal.clone(),
        ))
    }
}
