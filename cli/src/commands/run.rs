use std::sync::Arc;

use tracing::error;

use watchman_common::config::Config;
use watchman_core::inventory::ec2::{self, Ec2Inventory};
use watchman_core::mail::ses::SesMailer;
use watchman_core::pipeline::ReportService;
use watchman_core::probe::HttpProber;

use crate::terminal::print;

/// Full pipeline run, including dispatch. Configuration and credentials
/// problems abort here; partial failures further down only show up in the
/// summary.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    ec2::preflight_credentials().await?;

    let service = ReportService::new(
        Arc::new(Ec2Inventory::new()),
        Arc::new(HttpProber::new(cfg.probe_timeout)?),
    );
    let mailer = Arc::new(SesMailer::new().await);

    let summary = service.run(cfg, mailer).await?;
    print::dispatch_summary(&summary);

    let failed = summary.dispatch.iter().filter(|o| !o.delivered()).count();
    if failed > 0 {
        error!(
            "{failed} of {} recipients could not be reached",
            summary.dispatch.len()
        );
    }
    Ok(())
}
