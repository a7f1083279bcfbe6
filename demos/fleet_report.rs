//! Ranked uptime report over a canned fleet.
//!
//! Uses `StaticFleet` so the demo runs without any reachable devices; swap in
//! an `SshFleet` roster to survey real gear.

use anyhow::Result;
use fleetup::fleet::StaticFleet;
use fleetup::survey;

const CORE1: &str = "\
Vendor OS Software, Version 15.2(4)M7, RELEASE SOFTWARE
Compiled Mon 13-May-19 by builders

core-1 uptime is 12 weeks, 4 days, 7 hours, 21 minutes
";

const CORE2: &str = "\
Vendor OS Software, Version 15.2(4)M7, RELEASE SOFTWARE

core-2 uptime is 12 weeks, 4 days, 9 hours, 2 minutes
";

const ACCESS7: &str = "\
Switch Software Version 7.0.3.5

access-7 uptime is 0 weeks, 2 days, 0 hours, 44 minutes
";

const GARBLED: &str = "% Unrecognized command\n";

#[tokio::main]
async fn main() -> Result<()> {
    let fleet = StaticFleet::new()
        .with_device("snr", "core-1", CORE1)
        .with_device("snr", "core-2", CORE2)
        .with_device("snr", "access-7", ACCESS7)
        .with_device("snr", "odd-3", GARBLED)
        .with_unreachable("snr", "edge-9", "connection refused");

    let report = survey::uptime_report(&fleet, "snr").await;

    for line in report.lines() {
        println!("{line}");
    }
    println!("---");
    println!("{}", report.to_json()?);
    Ok(())
}
