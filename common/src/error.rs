//! Fatal error taxonomy.
//!
//! Per-region, per-host, and per-recipient failures are absorbed where they
//! happen and surface as data in the report or dispatch outcomes. Only
//! problems detected before the pipeline starts, configuration and
//! credentials, abort a run.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SENDER_EMAIL is not set")]
    MissingSender,
    #[error("RECIPIENT_EMAILS is not set")]
    NoRecipients,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Cloud credentials could not be resolved; nothing ran at all, as
    /// opposed to a run that completed with partial data.
    #[error("error in accessing cloud services: {0}")]
    Credentials(String),
}
