use std::sync::Arc;

use watchman_common::config::Config;
use watchman_core::inventory::ec2::Ec2Inventory;
use watchman_core::pipeline::ReportService;
use watchman_core::probe::HttpProber;

use crate::terminal::print;

/// Builds and prints the report without touching the mail transport.
pub async fn check(cfg: &Config) -> anyhow::Result<()> {
    let service = ReportService::new(
        Arc::new(Ec2Inventory::new()),
        Arc::new(HttpProber::new(cfg.probe_timeout)?),
    );

    let (hosts_checked, report) = service.collect_report(cfg).await;
    print::report(&report, hosts_checked);
    Ok(())
}
