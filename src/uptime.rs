//! Free-text uptime extraction and duration arithmetic.
//!
//! Network devices report their uptime as a prose sentence at the end of the
//! status command output, e.g.
//! `core-1 uptime is 2 weeks, 3 days, 4 hours, 5 minutes`. This module pulls
//! that phrase out of a raw output blob and normalizes it to a whole number of
//! minutes, the finest granularity the devices report, so ranking and
//! re-expansion are exact integer arithmetic with no rounding.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_HOUR: u64 = 60;
pub const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;
pub const MINUTES_PER_WEEK: u64 = 7 * MINUTES_PER_DAY;

/// Matches the uptime phrase: a leading word token followed by the first four
/// integer runs, with arbitrary non-digit text (unit words, commas) between
/// them. Vendors disagree on separators, so nothing beyond "not a digit" is
/// assumed about the text between the runs.
static UPTIME_PHRASE: Lazy<Regex> = Lazy::new(|| {
    match Regex::new(r"\w+ +(?P<weeks>\d+)\D+?(?P<days>\d+)\D+?(?P<hours>\d+)\D+?(?P<minutes>\d+)")
    {
        Ok(re) => re,
        Err(err) => panic!("invalid UPTIME_PHRASE regex: {err}"),
    }
});

/// Normalized device uptime as a non-negative whole number of minutes.
///
/// `0` minutes is a valid uptime (a device that just rebooted); "no uptime
/// could be determined" is expressed by the absence of a value, never by a
/// sentinel number.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Default,
)]
#[serde(transparent)]
pub struct UptimeMinutes(u64);

impl UptimeMinutes {
    pub fn new(total_minutes: u64) -> Self {
        Self(total_minutes)
    }

    /// Combines calendar-style components into total minutes.
    ///
    /// Exact inverse of [`UptimeMinutes::components`]; intended for values
    /// whose components came from that method and therefore cannot overflow.
    /// Components parsed out of untrusted text go through
    /// [`UptimeMinutes::checked_from_components`] instead.
    pub fn from_components(weeks: u64, days: u64, hours: u64, minutes: u64) -> Self {
        Self(weeks * MINUTES_PER_WEEK + days * MINUTES_PER_DAY + hours * MINUTES_PER_HOUR + minutes)
    }

    /// Checked variant of [`UptimeMinutes::from_components`].
    ///
    /// Returns `None` when the total does not fit in `u64` minutes, so
    /// oversized numbers in device output degrade to an absent value instead
    /// of panicking or wrapping into a wrong duration.
    pub fn checked_from_components(
        weeks: u64,
        days: u64,
        hours: u64,
        minutes: u64,
    ) -> Option<Self> {
        let total = weeks
            .checked_mul(MINUTES_PER_WEEK)?
            .checked_add(days.checked_mul(MINUTES_PER_DAY)?)?
            .checked_add(hours.checked_mul(MINUTES_PER_HOUR)?)?
            .checked_add(minutes)?;
        Some(Self(total))
    }

    pub fn total_minutes(self) -> u64 {
        self.0
    }

    /// Splits total minutes back into weeks, days, hours and minutes by
    /// successive integer division.
    pub fn components(self) -> UptimeComponents {
        let weeks = self.0 / MINUTES_PER_WEEK;
        let rem = self.0 % MINUTES_PER_WEEK;
        let days = rem / MINUTES_PER_DAY;
        let rem = rem % MINUTES_PER_DAY;
        let hours = rem / MINUTES_PER_HOUR;
        let minutes = rem % MINUTES_PER_HOUR;
        UptimeComponents {
            weeks,
            days,
            hours,
            minutes,
        }
    }
}

/// Uptime decomposed into the units devices print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UptimeComponents {
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl fmt::Display for UptimeComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} weeks, {} days, {} hours, {} minutes",
            self.weeks, self.days, self.hours, self.minutes
        )
    }
}

/// Extracts the uptime from raw status command output.
///
/// The input is trimmed and the last non-empty line is searched for the
/// uptime phrase; devices emit the uptime statement as the final line of the
/// status output. All four components (weeks, days, hours, minutes) must be
/// present. Returns `None` when no phrase of that shape is found or when the
/// claimed uptime does not fit in `u64` minutes; extraction never panics or
/// escalates an error.
pub fn extract_uptime(raw: &str) -> Option<UptimeMinutes> {
    let last_line = raw.trim().lines().rev().find(|line| !line.trim().is_empty())?;
    let caps = UPTIME_PHRASE.captures(last_line)?;
    let field = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u64>().ok());

    UptimeMinutes::checked_from_components(
        field("weeks")?,
        field("days")?,
        field("hours")?,
        field("minutes")?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_canonical_uptime_line() {
        let uptime = extract_uptime("Router uptime is 2 weeks, 3 days, 4 hours, 5 minutes")
            .expect("uptime phrase should parse");
        assert_eq!(uptime.total_minutes(), 25445);
    }

    #[test]
    fn uses_last_non_empty_line_of_multiline_output() {
        let raw = "\
Vendor OS Software, Version 15.2(4)M7
Compiled for core switching platforms

sw-agg-1 uptime is 1 weeks, 0 days, 0 hours, 1 minutes

";
        let uptime = extract_uptime(raw).expect("uptime phrase should parse");
        assert_eq!(uptime.total_minutes(), MINUTES_PER_WEEK + 1);
    }

    #[test]
    fn tolerates_varying_unit_separators() {
        let cases = [
            "edge-3 uptime is 2 weeks 3 days 4 hours 5 minutes",
            "edge-3 up 2w, 3d, 4h, 5m",
            "edge-3 uptime is 2 week(s), 3 day(s), 4 hour(s), 5 minute(s)",
        ];
        for case in cases {
            let uptime = extract_uptime(case).expect("uptime phrase should parse");
            assert_eq!(uptime.total_minutes(), 25445, "case: {case}");
        }
    }

    #[test]
    fn empty_input_yields_absent() {
        assert_eq!(extract_uptime(""), None);
        assert_eq!(extract_uptime("   \n\n  "), None);
    }

    #[test]
    fn phrase_without_four_integers_yields_absent() {
        assert_eq!(extract_uptime("Router is up"), None);
        assert_eq!(extract_uptime("Router uptime is 2 weeks, 3 days"), None);
    }

    #[test]
    fn uptime_on_non_final_line_is_ignored() {
        let raw = "sw1 uptime is 2 weeks, 3 days, 4 hours, 5 minutes\n% Connection host lost";
        assert_eq!(extract_uptime(raw), None);
    }

    #[test]
    fn oversized_uptime_claims_yield_absent() {
        // u64-parsable but overflows the minute total: absent, not a panic
        // or a wrapped-around duration.
        assert_eq!(
            extract_uptime("sw1 uptime is 9999999999999999999 weeks, 0 days, 0 hours, 0 minutes"),
            None
        );
        // Wider than u64 entirely: the integer parse itself fails.
        assert_eq!(
            extract_uptime("sw1 uptime is 99999999999999999999999 weeks, 0 days, 0 hours, 0 minutes"),
            None
        );
        assert_eq!(UptimeMinutes::checked_from_components(u64::MAX, 0, 0, 0), None);
        assert_eq!(UptimeMinutes::checked_from_components(0, u64::MAX, 0, 0), None);
        assert_eq!(
            UptimeMinutes::checked_from_components(2, 3, 4, 5),
            Some(UptimeMinutes::new(25445))
        );
    }

    #[test]
    fn components_round_trip_exactly() {
        let samples = [0u64, 1, 59, 60, 61, MINUTES_PER_DAY, MINUTES_PER_WEEK - 1, 25445, 10_000_000];
        for m in samples {
            let c = UptimeMinutes::new(m).components();
            let back = UptimeMinutes::from_components(c.weeks, c.days, c.hours, c.minutes);
            assert_eq!(back.total_minutes(), m);
        }
        // Dense sweep across a couple of weeks, sparse sweep far beyond.
        for m in 0..(2 * MINUTES_PER_WEEK) {
            let c = UptimeMinutes::new(m).components();
            assert_eq!(
                UptimeMinutes::from_components(c.weeks, c.days, c.hours, c.minutes).total_minutes(),
                m
            );
        }
        for m in (0..100_000_000u64).step_by(999_983) {
            let c = UptimeMinutes::new(m).components();
            assert_eq!(
                UptimeMinutes::from_components(c.weeks, c.days, c.hours, c.minutes).total_minutes(),
                m
            );
        }
    }

    #[test]
    fn zero_uptime_formats_all_zero_components() {
        assert_eq!(
            UptimeMinutes::new(0).components().to_string(),
            "0 weeks, 0 days, 0 hours, 0 minutes"
        );
    }

    #[test]
    fn component_display_matches_device_phrasing() {
        assert_eq!(
            UptimeMinutes::new(25445).components().to_string(),
            "2 weeks, 3 days, 4 hours, 5 minutes"
        );
    }
}
