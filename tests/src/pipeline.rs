//! End-to-end pipeline runs against scripted collaborators: no cloud, no
//! network, no mail provider.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use watchman_common::config::Config;
use watchman_common::error::{ConfigError, RunError};
use watchman_common::host::HostRecord;
use watchman_common::report::Bucket;
use watchman_core::inventory::InstanceInventory;
use watchman_core::mail::MailTransport;
use watchman_core::pipeline::ReportService;
use watchman_core::probe::Prober;

struct FixedInventory {
    by_region: HashMap<String, Vec<HostRecord>>,
}

#[async_trait]
impl InstanceInventory for FixedInventory {
    async fn running_instances(&self, region: &str) -> anyhow::Result<Vec<HostRecord>> {
        match self.by_region.get(region) {
            Some(records) => Ok(records.clone()),
            None => Err(anyhow::anyhow!("could not reach region {region}")),
        }
    }
}

struct ScriptedProber {
    statuses: HashMap<&'static str, u16>,
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, label: &str) -> Option<u16> {
        self.statuses.get(label).copied()
    }
}

#[derive(Default)]
struct RecordingMailer {
    rejects: Option<&'static str>,
    sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(
        &self,
        sender: &str,
        recipient: &str,
        _subject: &str,
        html_body: &str,
    ) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push((
            sender.to_string(),
            recipient.to_string(),
            html_body.to_string(),
        ));
        if self.rejects == Some(recipient) {
            anyhow::bail!("relay rejected {recipient}");
        }
        Ok(())
    }
}

fn config(regions: &[&str], static_hosts: &[&str]) -> Config {
    Config {
        service_name: "Watchman".to_string(),
        sender: Some("ops@example.com".to_string()),
        recipients: vec![
            "first@example.com".to_string(),
            "second@example.com".to_string(),
        ],
        regions: regions.iter().map(|r| r.to_string()).collect(),
        static_hosts: static_hosts.iter().map(|h| h.to_string()).collect(),
        probe_timeout: Duration::from_secs(1),
    }
}

fn service(
    by_region: HashMap<String, Vec<HostRecord>>,
    statuses: HashMap<&'static str, u16>,
) -> ReportService {
    ReportService::new(
        Arc::new(FixedInventory { by_region }),
        Arc::new(ScriptedProber { statuses }),
    )
}

#[tokio::test]
async fn full_run_classifies_sorts_and_dispatches() {
    let by_region = HashMap::from([(
        "r1".to_string(),
        vec![HostRecord {
            instance_id: Some("i-0abc".to_string()),
            address: "a.b.example.com".to_string(),
            label: "svc.example.com".to_string(),
        }],
    )]);
    let statuses = HashMap::from([("svc.example.com", 200), ("known.example.com", 503)]);
    let mailer = Arc::new(RecordingMailer {
        rejects: Some("second@example.com"),
        ..Default::default()
    });

    let summary = service(by_region, statuses)
        .run(&config(&["r1"], &["known.example.com"]), mailer.clone())
        .await
        .expect("run should be processed despite the failed recipient");

    assert_eq!(summary.hosts_checked, 2);
    assert_eq!(
        summary.report.groups(),
        &[
            (Bucket::Healthy, vec!["[200] svc.example.com".to_string()]),
            (Bucket::Failing, vec!["[503] known.example.com".to_string()]),
        ]
    );

    // Both recipients were attempted; only the second failed.
    assert_eq!(summary.dispatch.len(), 2);
    assert!(summary.dispatch[0].delivered());
    assert!(!summary.dispatch[1].delivered());

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0, "ops@example.com");
    let body = &sent[0].2;
    let healthy_at = body.find("RUNNING!").unwrap();
    let failing_at = body.find("!FAILURE").unwrap();
    assert!(healthy_at < failing_at);
    assert!(body.contains("<dd>[200] svc.example.com</dd>"));
    assert!(body.contains("<dd>[503] known.example.com</dd>"));
}

#[tokio::test]
async fn unreachable_region_still_reports_the_rest() {
    let by_region = HashMap::from([(
        "r2".to_string(),
        vec![HostRecord {
            instance_id: Some("i-1def".to_string()),
            address: String::new(),
            label: "db.example.com".to_string(),
        }],
    )]);
    let statuses = HashMap::from([("db.example.com", 200)]);

    let (hosts_checked, report) = service(by_region, statuses)
        .collect_report(&config(&["r1-down", "r2"], &[]))
        .await;

    assert_eq!(hosts_checked, 1);
    assert_eq!(
        report.groups(),
        &[(Bucket::Healthy, vec!["[200] db.example.com".to_string()])]
    );
}

#[tokio::test]
async fn unlabeled_instance_lands_in_unknown_without_probing() {
    let by_region = HashMap::from([(
        "r1".to_string(),
        vec![HostRecord {
            instance_id: Some("i-2aaa".to_string()),
            address: "bare.compute.amazonaws.com".to_string(),
            label: String::new(),
        }],
    )]);

    let (_, report) = service(by_region, HashMap::new())
        .collect_report(&config(&["r1"], &[]))
        .await;

    assert_eq!(
        report.groups(),
        &[(Bucket::Unknown, vec!["[???] ".to_string()])]
    );
}

#[tokio::test]
async fn empty_fleet_produces_the_empty_report_and_sends_nothing() {
    let mailer = Arc::new(RecordingMailer::default());
    let summary = service(HashMap::new(), HashMap::new())
        .run(&config(&[], &[]), mailer.clone())
        .await
        .unwrap();

    assert!(summary.report.is_empty());
    assert!(summary.dispatch.is_empty());
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_sender_is_fatal_before_anything_runs() {
    let mut cfg = config(&[], &[]);
    cfg.sender = None;
    let mailer = Arc::new(RecordingMailer::default());

    let err = service(HashMap::new(), HashMap::new())
        .run(&cfg, mailer)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RunError::Config(ConfigError::MissingSender)
    ));
}
