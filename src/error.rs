//! Error types for fleet access and survey outcomes.
//!
//! Nothing here aborts a report: every failure is recovered locally by
//! dropping the affected device's record with a diagnostic, so a partially
//! reachable fleet still produces a best-effort ranking.

use thiserror::Error;

/// Errors raised while retrieving status output from one device.
#[derive(Error, Debug)]
pub enum FleetError {
    /// The device name is not present in the roster.
    #[error("device {0} not in roster")]
    UnknownDevice(String),

    /// The status command did not complete within the configured timeout.
    #[error("status command timed out after {0}s")]
    CommandTimeout(u64),

    /// The device accepted the session but the status command failed.
    #[error("status command exited with status {0}")]
    CommandRejected(u32),

    /// Scripted unreachability from an in-memory fleet (tests and demos).
    #[error("device unreachable: {0}")]
    Unreachable(String),

    /// An error occurred in the async-ssh2-tokio library.
    #[error("async ssh2 error: {0}")]
    Ssh2(#[from] async_ssh2_tokio::Error),

    /// An error occurred in the russh library.
    #[error("russh error: {0}")]
    Russh(#[from] russh::Error),
}

/// Why a device is missing from the ranked report.
///
/// Access and parse failures are distinct causes for logging purposes even
/// though both rank the same way: the device is omitted.
#[derive(Error, Debug)]
pub enum SurveyFailure {
    /// The transport could not retrieve status output from the device.
    #[error("device access failed: {0}")]
    Access(#[from] FleetError),

    /// The status output contained no recognizable uptime phrase.
    #[error("no uptime phrase in status output")]
    UnrecognizedOutput,

    /// An upstream collaborator supplied an unusable duration value.
    #[error("malformed uptime value: {0}")]
    MalformedValue(String),
}
