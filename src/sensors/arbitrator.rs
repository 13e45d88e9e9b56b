//! Exclusive ownership of the sensor transport.
//!
//! The arbitrator holds at most one system connection and, only while no
//! system connection exists, at most one temporary connection. Every
//! replacement stops the previous handle before a new one is started, so two
//! handles never contend for the same radio.
//!
//! The arbitrator is not synchronized. It expects to be driven from a single
//! control thread; hosts sharing it across threads must wrap it in a mutex.

use crate::sensors::handle::{SensorHandle, TransportFactory};
use crate::sensors::resolver::TransportResolver;
use crate::sensors::types::{SensorError, SlotKind};
use crate::sensors::usage::{NoopUsageSink, UsageSink};
use crate::storage::config::ConfigStore;

/// Owner of the system and temporary sensor slots.
pub struct SensorArbitrator<F: TransportFactory> {
    resolver: TransportResolver<F>,
    usage: Box<dyn UsageSink>,
    system: Option<Box<dyn SensorHandle>>,
    temporary: Option<Box<dyn SensorHandle>>,
}

impl<F: TransportFactory> SensorArbitrator<F> {
    /// Create an arbitrator that does not record usage.
    pub fn new(factory: F) -> Self {
        Self::with_usage_sink(factory, NoopUsageSink)
    }

    /// Create an arbitrator reporting system transport selections to `usage`.
    pub fn with_usage_sink(factory: F, usage: impl UsageSink + 'static) -> Self {
        Self {
            resolver: TransportResolver::new(factory),
            usage: Box::new(usage),
            system: None,
            temporary: None,
        }
    }

    /// Factory used to construct handles.
    pub fn factory(&self) -> &F {
        self.resolver.factory()
    }

    /// Replace any current connection with a started system connection.
    ///
    /// Returns `Ok(None)` when the configuration selects no sensor. If the new
    /// handle fails to start it is still kept in the system slot and the fault
    /// is returned; call [`release_system`](Self::release_system) to discard it.
    pub fn acquire_system(
        &mut self,
        config: &dyn ConfigStore,
    ) -> Result<Option<&dyn SensorHandle>, SensorError> {
        self.release_temporary()?;
        self.release_system()?;

        let Some(handle) = self.resolver.resolve(config) else {
            tracing::info!("No system sensor configured");
            return Ok(None);
        };

        self.usage.record_transport_selected(handle.transport());

        self.install(SlotKind::System, handle).map(Some)
    }

    /// Stop and discard the system connection, if any.
    ///
    /// If the stop fails the handle remains the system connection and the
    /// fault is returned.
    pub fn release_system(&mut self) -> Result<(), SensorError> {
        self.release(SlotKind::System)
    }

    /// Replace the temporary connection with a newly started one.
    ///
    /// Returns `Ok(None)` without touching configuration while a system
    /// connection is held. Start faults behave as in
    /// [`acquire_system`](Self::acquire_system).
    pub fn acquire_temporary(
        &mut self,
        config: &dyn ConfigStore,
    ) -> Result<Option<&dyn SensorHandle>, SensorError> {
        self.release_temporary()?;

        if let Some(system) = &self.system {
            tracing::debug!(
                "Temporary sensor refused, {} system sensor {} holds the transport",
                system.transport(),
                system.id()
            );
            return Ok(None);
        }

        let Some(handle) = self.resolver.resolve(config) else {
            tracing::info!("No temporary sensor configured");
            return Ok(None);
        };

        self.install(SlotKind::Temporary, handle).map(Some)
    }

    /// Stop and discard the temporary connection, if any.
    pub fn release_temporary(&mut self) -> Result<(), SensorError> {
        self.release(SlotKind::Temporary)
    }

    /// Release both slots.
    ///
    /// Both stops are attempted; the first fault is returned and any handle
    /// that failed to stop is kept.
    pub fn shutdown(&mut self) -> Result<(), SensorError> {
        tracing::info!("Shutting down sensor arbitrator");
        let temporary = self.release_temporary();
        let system = self.release_system();
        temporary.and(system)
    }

    /// Current system connection.
    pub fn system(&self) -> Option<&dyn SensorHandle> {
        self.system.as_deref()
    }

    /// Current temporary connection.
    pub fn temporary(&self) -> Option<&dyn SensorHandle> {
        self.temporary.as_deref()
    }

    /// Which slot currently holds a handle.
    pub fn occupied_slot(&self) -> Option<SlotKind> {
        match (&self.system, &self.temporary) {
            (Some(_), _) => Some(SlotKind::System),
            (None, Some(_)) => Some(SlotKind::Temporary),
            (None, None) => None,
        }
    }

    fn slot_mut(&mut self, slot: SlotKind) -> &mut Option<Box<dyn SensorHandle>> {
        match slot {
            SlotKind::System => &mut self.system,
            SlotKind::Temporary => &mut self.temporary,
        }
    }

    /// Start `handle` and store it in `slot`, which must be empty.
    fn install(
        &mut self,
        slot: SlotKind,
        mut handle: Box<dyn SensorHandle>,
    ) -> Result<&dyn SensorHandle, SensorError> {
        debug_assert!(self.slot_mut(slot).is_none());

        let started = handle.start();
        let stored = self.slot_mut(slot).insert(handle);

        match started {
            Ok(()) => {
                tracing::info!(
                    "Started {} {} sensor {}",
                    slot,
                    stored.transport(),
                    stored.id()
                );
                Ok(&**stored)
            }
            Err(e) => {
                tracing::warn!("Failed to start {} sensor: {}", slot, e);
                Err(e)
            }
        }
    }

    /// Stop the handle held in `slot`, then clear the slot.
    ///
    /// On a stop fault the handle stays in place so the release can be retried.
    fn release(&mut self, slot: SlotKind) -> Result<(), SensorError> {
        let Some(handle) = self.slot_mut(slot).as_mut() else {
            return Ok(());
        };

        tracing::info!("Stopping {} {} sensor {}", slot, handle.transport(), handle.id());

        if let Err(e) = handle.stop() {
            tracing::warn!("Failed to stop {} sensor, keeping it in its slot: {}", slot, e);
            return Err(e);
        }

        *self.slot_mut(slot) = None;
        Ok(())
    }
}

impl<F: TransportFactory> Drop for SensorArbitrator<F> {
    fn drop(&mut self) {
        if self.occupied_slot().is_some() {
            if let Err(e) = self.shutdown() {
                tracing::warn!("Sensor fault during arbitrator drop: {}", e);
            }
        }
    }
}
