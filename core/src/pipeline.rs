//! The report pipeline, end to end.
//!
//! Collect instances across regions, fold in the static hosts, sort, probe,
//! classify, render, dispatch. Collaborators are injected as trait objects
//! so the pipeline itself stays off the network in tests.

use std::sync::Arc;

use tracing::{info, warn};

use watchman_common::config::Config;
use watchman_common::error::RunError;
use watchman_common::report::{Report, html_document};

use crate::inventory::{self, InstanceInventory};
use crate::mail::{self, DispatchOutcome, MailTransport};
use crate::probe::{self, Prober};
use crate::roster;

pub struct ReportService {
    inventory: Arc<dyn InstanceInventory>,
    prober: Arc<dyn Prober>,
}

/// Outcome of a completed run. Partial collector, prober, and dispatch
/// failures are all visible here rather than aborting the run.
#[derive(Debug)]
pub struct RunSummary {
    pub hosts_checked: usize,
    pub report: Report,
    pub dispatch: Vec<DispatchOutcome>,
}

impl ReportService {
    pub fn new(inventory: Arc<dyn InstanceInventory>, prober: Arc<dyn Prober>) -> Self {
        Self { inventory, prober }
    }

    /// Collects, sorts, and probes the fleet, returning the classified
    /// report without dispatching anything.
    pub async fn collect_report(&self, cfg: &Config) -> (usize, Report) {
        let collected = inventory::collect_regions(self.inventory.clone(), &cfg.regions).await;
        let configured = roster::static_hosts(&cfg.static_hosts);
        let hosts = roster::merge(collected, configured);
        let count = hosts.len();
        let results = probe::probe_all(self.prober.clone(), hosts).await;
        (count, Report::build(&results))
    }

    /// Full run: validates the mail configuration, builds the report, and
    /// sends it to every recipient. An empty report is not sent.
    pub async fn run(
        &self,
        cfg: &Config,
        mailer: Arc<dyn MailTransport>,
    ) -> Result<RunSummary, RunError> {
        let (sender, recipients) = cfg.deliverable()?;
        let (hosts_checked, report) = self.collect_report(cfg).await;

        let dispatch = match report.to_html() {
            Some(fragment) => {
                let subject = format!("{}: Services Status Report", cfg.service_name);
                let body = html_document(&fragment);
                mail::dispatch(mailer, sender, recipients, &subject, &body).await
            }
            None => {
                warn!("Report is empty, nothing to send");
                Vec::new()
            }
        };

        info!(
            "Checked {hosts_checked} hosts, dispatched to {} recipients",
            dispatch.len()
        );
        Ok(RunSummary {
            hosts_checked,
            report,
            dispatch,
        })
    }
}
