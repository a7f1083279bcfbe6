//! SSH-backed fleet implementation.
//!
//! Holds a roster of device endpoints and a connection cache. Connections are
//! established with password authentication and reused across surveys while
//! they stay open and the credentials still match; a credential change or a
//! closed session invalidates the cached entry and triggers a reconnect.

use std::sync::Arc;
use std::time::Duration;

use async_ssh2_tokio::client::{AuthMethod, Client};
use async_ssh2_tokio::{Config, ServerCheckMethod};
use log::debug;
use moka::future::Cache;
use sha2::{Digest, Sha256};

use super::{Fleet, SshCompatLevel};
use crate::error::FleetError;

const DEFAULT_STATUS_COMMAND: &str = "show version";
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 60;

/// Connection details for one device in the roster.
#[derive(Debug, Clone)]
pub struct DeviceEndpoint {
    /// Roster name, the identifier used in reports.
    pub name: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Groups this device belongs to.
    pub groups: Vec<String>,
}

impl DeviceEndpoint {
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port: 22,
            username: username.into(),
            password: password.into(),
            groups: Vec::new(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    fn addr(&self) -> String {
        format!("{}@{}:{}", self.username, self.host, self.port)
    }
}

/// SSH-backed [`Fleet`]: a device roster plus a pooled-connection transport.
pub struct SshFleet {
    roster: Vec<DeviceEndpoint>,
    /// Cached open connections keyed by `user@host:port`, together with the
    /// password hash they were established with.
    cache: Cache<String, (Arc<Client>, [u8; 32])>,
    compat: SshCompatLevel,
    server_check: ServerCheckMethod,
    status_command: String,
    command_timeout: Duration,
}

impl SshFleet {
    pub fn new(roster: Vec<DeviceEndpoint>) -> Self {
        // Cache up to 100 connections. Evict after 5 minutes of inactivity.
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_idle(Duration::from_secs(5 * 60))
            .build();

        Self {
            roster,
            cache,
            compat: SshCompatLevel::default(),
            server_check: ServerCheckMethod::DefaultKnownHostsFile,
            status_command: DEFAULT_STATUS_COMMAND.to_string(),
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
        }
    }

    /// Selects the SSH algorithm profile offered to devices.
    pub fn with_compat_level(mut self, level: SshCompatLevel) -> Self {
        self.compat = level;
        self
    }

    /// Overrides host key verification (e.g. `NoCheck` for lab gear).
    pub fn with_server_check(mut self, method: ServerCheckMethod) -> Self {
        self.server_check = method;
        self
    }

    /// Overrides the status command sent to devices.
    pub fn with_status_command(mut self, command: impl Into<String>) -> Self {
        self.status_command = command.into();
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    fn endpoint(&self, device: &str) -> Option<&DeviceEndpoint> {
        self.roster.iter().find(|e| e.name == device)
    }

    fn password_hash(password: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.finalize().into()
    }

    /// Returns a cached open connection for the endpoint, or establishes and
    /// caches a new one.
    async fn connection(&self, endpoint: &DeviceEndpoint) -> Result<Arc<Client>, FleetError> {
        let addr = endpoint.addr();
        let password_hash = Self::password_hash(&endpoint.password);

        if let Some((client, cached_hash)) = self.cache.get(&addr).await {
            if !client.is_closed() && cached_hash == password_hash {
                debug!("Reusing cached connection: {}", addr);
                return Ok(client);
            }
            debug!("Cached connection for {} is stale, reconnecting", addr);
            self.cache.invalidate(&addr).await;
        }

        let config = Config {
            preferred: self.compat.preferred(),
            inactivity_timeout: Some(Duration::from_secs(60)),
            ..Default::default()
        };

        let client = Client::connect_with_config(
            (endpoint.host.clone(), endpoint.port),
            &endpoint.username,
            AuthMethod::with_password(&endpoint.password),
            self.server_check.clone(),
            config,
        )
        .await?;
        debug!("Connected: {}", addr);

        let client = Arc::new(client);
        self.cache
            .insert(addr, (client.clone(), password_hash))
            .await;
        Ok(client)
    }
}

impl Fleet for SshFleet {
    fn devices_in_group(&self, group: &str) -> Vec<String> {
        self.roster
            .iter()
            .filter(|e| e.groups.iter().any(|g| g == group))
            .map(|e| e.name.clone())
            .collect()
    }

    async fn fetch_status(&self, device: &str) -> Result<String, FleetError> {
        let endpoint = self
            .endpoint(device)
            .ok_or_else(|| FleetError::UnknownDevice(device.to_string()))?;
        let client = self.connection(endpoint).await?;

        let result = tokio::time::timeout(
            self.command_timeout,
            client.execute(&self.status_command),
        )
        .await
        .map_err(|_| FleetError::CommandTimeout(self.command_timeout.as_secs()))??;

        if result.exit_status != 0 {
            return Err(FleetError::CommandRejected(result.exit_status));
        }
        Ok(result.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<DeviceEndpoint> {
        vec![
            DeviceEndpoint::new("core-1", "10.0.0.1", "admin", "pw")
                .in_group("snr")
                .in_group("backbone"),
            DeviceEndpoint::new("core-2", "10.0.0.2", "admin", "pw").in_group("snr"),
            DeviceEndpoint::new("lab-1", "10.9.0.1", "admin", "pw")
                .with_port(2222)
                .in_group("lab"),
        ]
    }

    #[test]
    fn group_filtering_follows_roster_membership() {
        let fleet = SshFleet::new(roster());

        assert_eq!(fleet.devices_in_group("snr"), ["core-1", "core-2"]);
        assert_eq!(fleet.devices_in_group("backbone"), ["core-1"]);
        assert!(fleet.devices_in_group("nonexistent").is_empty());
    }

    #[test]
    fn endpoint_addr_includes_user_and_port() {
        let fleet = SshFleet::new(roster());
        let lab = fleet.endpoint("lab-1").expect("in roster");
        assert_eq!(lab.addr(), "admin@10.9.0.1:2222");
    }

    #[test]
    fn password_hashes_differ_per_password() {
        assert_ne!(SshFleet::password_hash("pw"), SshFleet::password_hash("pw2"));
        assert_eq!(SshFleet::password_hash("pw"), SshFleet::password_hash("pw"));
    }

    #[tokio::test]
    async fn unknown_device_is_reported_before_any_connect() {
        let fleet = SshFleet::new(roster());
        match fleet.fetch_status("ghost").await {
            Err(FleetError::UnknownDevice(name)) => assert_eq!(name, "ghost"),
            other => panic!("expected unknown device, got {other:?}"),
        }
    }
}
