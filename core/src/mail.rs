//! Report dispatch to the mail collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

pub mod ses;

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(
        &self,
        sender: &str,
        recipient: &str,
        subject: &str,
        html_body: &str,
    ) -> anyhow::Result<()>;
}

/// What happened for a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub recipient: String,
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn delivered(&self) -> bool {
        self.error.is_none()
    }
}

/// Sends the rendered report to each recipient in turn. A failure for one
/// recipient is recorded and the rest still get their attempt.
pub async fn dispatch(
    mailer: Arc<dyn MailTransport>,
    sender: &str,
    recipients: &[String],
    subject: &str,
    html_body: &str,
) -> Vec<DispatchOutcome> {
    let mut outcomes = Vec::with_capacity(recipients.len());
    for recipient in recipients {
        let outcome = match mailer.send(sender, recipient, subject, html_body).await {
            Ok(()) => {
                info!("Email sent successfully to {recipient}");
                DispatchOutcome {
                    recipient: recipient.clone(),
                    error: None,
                }
            }
            Err(e) => {
                error!("Error sending email to {recipient}: {e}");
                DispatchOutcome {
                    recipient: recipient.clone(),
                    error: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}
