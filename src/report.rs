//! Ranked uptime report assembly.
//!
//! Takes the per-device survey records, drops the ones without a usable
//! uptime (with one diagnostic line each), orders the rest longest-running
//! first and renders the human-readable report. The ordered result is a plain
//! serde-serializable value so alternate renderers (JSON, tables) can be
//! layered on without re-deriving the ranking.

use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SurveyFailure;
use crate::uptime::UptimeMinutes;

/// Per-device survey outcome: a parsed uptime or an explicit failure marker.
///
/// The failure marker is a real variant, never a sentinel number, so a device
/// with `0` minutes of uptime is always distinguishable from a device whose
/// uptime could not be determined.
#[derive(Debug)]
pub struct DeviceUptimeRecord {
    pub device: String,
    pub outcome: Result<UptimeMinutes, SurveyFailure>,
}

impl DeviceUptimeRecord {
    pub fn present(device: impl Into<String>, uptime: UptimeMinutes) -> Self {
        Self {
            device: device.into(),
            outcome: Ok(uptime),
        }
    }

    pub fn absent(device: impl Into<String>, cause: SurveyFailure) -> Self {
        Self {
            device: device.into(),
            outcome: Err(cause),
        }
    }

    /// Builds a record from a duration value handed over by an external
    /// collector as JSON.
    ///
    /// Only a non-negative integer is a usable duration; floats, strings,
    /// negative numbers, null and anything structured are malformed and are
    /// recorded as such rather than coerced.
    pub fn from_json_value(device: impl Into<String>, value: &Value) -> Self {
        let outcome = match value.as_u64() {
            Some(minutes) => Ok(UptimeMinutes::new(minutes)),
            None => Err(SurveyFailure::MalformedValue(value.to_string())),
        };
        Self {
            device: device.into(),
            outcome,
        }
    }
}

/// One entry of the ranked report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RankedUptime {
    pub device: String,
    pub minutes: UptimeMinutes,
}

impl RankedUptime {
    /// Renders the report line for this device.
    pub fn line(&self) -> String {
        format!(
            "Device {} uptime is {}.",
            self.device,
            self.minutes.components()
        )
    }
}

/// An ordered uptime report, longest-running device first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct UptimeReport {
    pub entries: Vec<RankedUptime>,
}

impl UptimeReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report lines in rank order, ready for line-by-line display.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(RankedUptime::line)
    }

    /// JSON rendering of the ranked entries.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Filters, sorts and packages survey records into a report.
///
/// Records with an absent uptime are dropped before any comparison or
/// formatting happens; each dropped device gets exactly one logged diagnostic
/// naming the device and the cause. The rest are sorted by uptime descending,
/// with ties broken by ascending device identifier so equal uptimes still
/// order deterministically.
pub fn rank(records: Vec<DeviceUptimeRecord>) -> UptimeReport {
    let mut entries: Vec<RankedUptime> = Vec::with_capacity(records.len());
    for record in records {
        match record.outcome {
            Ok(minutes) => entries.push(RankedUptime {
                device: record.device,
                minutes,
            }),
            Err(cause) => warn!("dropping {} from the report: {cause}", record.device),
        }
    }
    entries.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.device.cmp(&b.device)));
    UptimeReport { entries }
}
