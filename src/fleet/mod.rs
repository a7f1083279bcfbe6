//! Fleet access: device inventory and status retrieval.
//!
//! The survey consumes exactly two capabilities, "list the devices in a
//! group" and "fetch raw status text for one device", expressed by the
//! [`Fleet`] trait. Anything that can answer those two questions can back a
//! report: [`SshFleet`] for real devices, or the in-memory [`StaticFleet`]
//! for tests and demos.

use std::collections::HashMap;
use std::future::Future;

use crate::error::FleetError;

mod compat;
mod ssh;

pub use compat::SshCompatLevel;
pub use ssh::{DeviceEndpoint, SshFleet};

/// The narrow capability interface between the survey and whatever owns
/// inventory and transport.
pub trait Fleet {
    /// Names of the devices belonging to `group`, in roster order. Unknown
    /// groups yield an empty roster.
    fn devices_in_group(&self, group: &str) -> Vec<String>;

    /// Raw output of the status command on `device`.
    ///
    /// Per-device calls share no mutable state, so callers are free to issue
    /// them concurrently.
    fn fetch_status(
        &self,
        device: &str,
    ) -> impl Future<Output = Result<String, FleetError>> + Send;
}

/// In-memory fleet with canned status output and scripted failures.
///
/// Stands in for real devices in tests and demos the same way a recorded
/// session replay would: the survey path is identical, only the transport is
/// faked.
#[derive(Debug, Default)]
pub struct StaticFleet {
    /// Groups in insertion order, each with its member devices in insertion order.
    groups: Vec<(String, Vec<String>)>,
    outputs: HashMap<String, Result<String, String>>,
}

impl StaticFleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a device to `group` that answers the status command with
    /// `status_output`.
    pub fn with_device(mut self, group: &str, device: &str, status_output: &str) -> Self {
        self.register(group, device);
        self.outputs
            .insert(device.to_string(), Ok(status_output.to_string()));
        self
    }

    /// Adds a device to `group` whose status fetch fails with `reason`.
    pub fn with_unreachable(mut self, group: &str, device: &str, reason: &str) -> Self {
        self.register(group, device);
        self.outputs
            .insert(device.to_string(), Err(reason.to_string()));
        self
    }

    fn register(&mut self, group: &str, device: &str) {
        match self.groups.iter_mut().find(|(name, _)| name == group) {
            Some((_, members)) => members.push(device.to_string()),
            None => self
                .groups
                .push((group.to_string(), vec![device.to_string()])),
        }
    }
}

impl Fleet for StaticFleet {
    fn devices_in_group(&self, group: &str) -> Vec<String> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, members)| members.clone())
            .unwrap_or_default()
    }

    async fn fetch_status(&self, device: &str) -> Result<String, FleetError> {
        match self.outputs.get(device) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(reason)) => Err(FleetError::Unreachable(reason.clone())),
            None => Err(FleetError::UnknownDevice(device.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keep_insertion_order_and_membership() {
        let fleet = StaticFleet::new()
            .with_device("snr", "core-1", "out")
            .with_device("lab", "lab-1", "out")
            .with_device("snr", "core-2", "out");

        assert_eq!(fleet.devices_in_group("snr"), ["core-1", "core-2"]);
        assert_eq!(fleet.devices_in_group("lab"), ["lab-1"]);
        assert!(fleet.devices_in_group("missing").is_empty());
    }

    #[tokio::test]
    async fn scripted_failures_surface_as_fleet_errors() {
        let fleet = StaticFleet::new().with_unreachable("snr", "edge-9", "connection refused");

        match fleet.fetch_status("edge-9").await {
            Err(FleetError::Unreachable(reason)) => assert_eq!(reason, "connection refused"),
            other => panic!("expected unreachable, got {other:?}"),
        }
        match fleet.fetch_status("ghost").await {
            Err(FleetError::UnknownDevice(name)) => assert_eq!(name, "ghost"),
            other => panic!("expected unknown device, got {other:?}"),
        }
    }
}
