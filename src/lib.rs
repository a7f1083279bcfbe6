//! # fleetup - Fleet Uptime Surveyor for Network Devices
//!
//! `fleetup` answers one operational question across a whole fleet: which
//! devices have been up the longest? It connects to each device over SSH,
//! runs a status command, parses the uptime phrase out of the free-text
//! output, and renders a report ranked from longest- to shortest-running.
//!
//! ## Features
//!
//! - **Loose uptime parsing**: extracts weeks/days/hours/minutes regardless
//!   of the vendor's separator and unit wording
//! - **Best-effort surveys**: unreachable or unparseable devices are dropped
//!   with a diagnostic, never abort the report
//! - **Connection pooling**: SSH connections are cached and reused across
//!   surveys while credentials still match
//! - **Legacy device support**: selectable SSH algorithm profiles covering
//!   old firmware that only speaks SHA-1 key exchange and CBC ciphers
//! - **Pluggable transport**: the survey only needs the two-operation
//!   [`fleet::Fleet`] interface, so inventories and transports other than
//!   the built-in SSH roster can back a report
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fleetup::fleet::{DeviceEndpoint, SshFleet, SshCompatLevel};
//! use fleetup::survey;
//!
//! #[tokio::main]
//! async fn main() {
//!     let fleet = SshFleet::new(vec![
//!         DeviceEndpoint::new("core-1", "192.168.1.1", "admin", "password").in_group("snr"),
//!         DeviceEndpoint::new("core-2", "192.168.1.2", "admin", "password").in_group("snr"),
//!     ])
//!     .with_compat_level(SshCompatLevel::Legacy);
//!
//!     let report = survey::uptime_report(&fleet, "snr").await;
//!     for line in report.lines() {
//!         println!("{line}");
//!     }
//! }
//! ```
//!
//! ## Main Components
//!
//! - [`uptime`] - free-text uptime extraction and minute arithmetic
//! - [`report`] - record filtering, descending sort and line rendering
//! - [`survey`] - the orchestration shell tying roster, fetch and ranking together
//! - [`fleet`] - the inventory/transport interface and its SSH implementation
//! - [`error`] - failure taxonomy for device access and survey outcomes

pub mod error;
pub mod fleet;
pub mod report;
pub mod survey;
pub mod uptime;
