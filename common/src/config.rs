//! Process configuration, read once from the environment at startup and
//! passed to the pipeline as an immutable value.

use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

pub const DEFAULT_SERVICE_NAME: &str = "Watchman";
pub const DEFAULT_REGIONS: &str = "us-east-1,ap-south-1";
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    /// Display name used in the report subject line.
    pub service_name: String,
    pub sender: Option<String>,
    pub recipients: Vec<String>,
    /// Cloud regions to query for running instances.
    pub regions: Vec<String>,
    /// Statically configured hostnames without instance metadata.
    pub static_hosts: Vec<String>,
    pub probe_timeout: Duration,
}

impl Config {
    /// Reads the full configuration from the environment. Missing mail
    /// settings are tolerated here; [`Config::deliverable`] enforces them
    /// for runs that actually send.
    pub fn from_env() -> Self {
        Self {
            service_name: env_or("SERVICE_NAME", DEFAULT_SERVICE_NAME),
            sender: std::env::var("SENDER_EMAIL")
                .ok()
                .filter(|v| !v.is_empty()),
            recipients: split_list(&std::env::var("RECIPIENT_EMAILS").unwrap_or_default()),
            regions: split_list(&env_or("REGIONS_TO_CHECK", DEFAULT_REGIONS)),
            static_hosts: split_list(&std::env::var("SERVERS").unwrap_or_default()),
            probe_timeout: probe_timeout_from_env(),
        }
    }

    /// A sender and at least one recipient are preconditions for dispatch;
    /// absence of either is fatal for the run.
    pub fn deliverable(&self) -> Result<(&str, &[String]), ConfigError> {
        let sender = self.sender.as_deref().ok_or(ConfigError::MissingSender)?;
        if self.recipients.is_empty() {
            return Err(ConfigError::NoRecipients);
        }
        Ok((sender, &self.recipients))
    }
}

/// Splits a comma-separated list, yielding nothing for an empty value
/// instead of one spurious empty entry.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn probe_timeout_from_env() -> Duration {
    match std::env::var("PROBE_TIMEOUT_SECS") {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!("Ignoring invalid PROBE_TIMEOUT_SECS value '{raw}'");
                DEFAULT_PROBE_TIMEOUT
            }
        },
        Err(_) => DEFAULT_PROBE_TIMEOUT,
    }
}
