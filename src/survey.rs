//! The survey shell: run the status command across a group and rank the
//! results.
//!
//! Fans the fetch out concurrently, then hands the collected records to the
//! ranker. Per-device calls are independent and the
//! [`Fleet`](crate::fleet::Fleet) contract shares no mutable state between
//! them. Ordering only exists after ranking; nothing is guaranteed about
//! completion order across devices.

use futures::future::join_all;
use log::debug;

use crate::error::SurveyFailure;
use crate::fleet::Fleet;
use crate::report::{DeviceUptimeRecord, UptimeReport, rank};
use crate::uptime::extract_uptime;

/// Runs the status command against every device in `group` and returns one
/// record per device.
///
/// Each record carries either the parsed uptime or the failure that will keep
/// the device out of the report. A failing device never aborts the survey;
/// the remaining devices still produce records.
pub async fn survey_group<F: Fleet>(fleet: &F, group: &str) -> Vec<DeviceUptimeRecord> {
    let devices = fleet.devices_in_group(group);
    debug!("Surveying {} device(s) in group {group}", devices.len());

    let fetches = devices.into_iter().map(|device| async move {
        let outcome = match fleet.fetch_status(&device).await {
            Ok(output) => extract_uptime(&output).ok_or(SurveyFailure::UnrecognizedOutput),
            Err(err) => Err(SurveyFailure::Access(err)),
        };
        DeviceUptimeRecord { device, outcome }
    });

    join_all(fetches).await
}

/// Surveys `group` and returns the ranked report, longest uptime first.
pub async fn uptime_report<F: Fleet>(fleet: &F, group: &str) -> UptimeReport {
    rank(survey_group(fleet, group).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FleetError;
    use crate::fleet::StaticFleet;

    #[tokio::test]
    async fn records_distinguish_access_and_parse_failures() {
        let fleet = StaticFleet::new()
            .with_device(
                "snr",
                "ok-1",
                "ok-1 uptime is 0 weeks, 0 days, 1 hours, 0 minutes",
            )
            .with_device("snr", "weird-1", "% Ambiguous command")
            .with_unreachable("snr", "down-1", "no route to host");

        let records = survey_group(&fleet, "snr").await;
        assert_eq!(records.len(), 3);

        let outcome_of = |name: &str| {
            &records
                .iter()
                .find(|r| r.device == name)
                .expect("record exists")
                .outcome
        };

        assert!(matches!(outcome_of("ok-1"), Ok(m) if m.total_minutes() == 60));
        assert!(matches!(
            outcome_of("weird-1"),
            Err(SurveyFailure::UnrecognizedOutput)
        ));
        assert!(matches!(
            outcome_of("down-1"),
            Err(SurveyFailure::Access(FleetError::Unreachable(_)))
        ));
    }

    #[tokio::test]
    async fn empty_group_produces_an_empty_report() {
        let fleet = StaticFleet::new();
        let report = uptime_report(&fleet, "snr").await;
        assert!(report.is_empty());
    }
}
