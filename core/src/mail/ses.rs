//! SES-backed mail transport.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

use super::MailTransport;

pub struct SesMailer {
    client: aws_sdk_sesv2::Client,
}

impl SesMailer {
    pub async fn new() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self {
            client: aws_sdk_sesv2::Client::new(&config),
        }
    }
}

#[async_trait]
impl MailTransport for SesMailer {
    async fn send(
        &self,
        sender: &str,
        recipient: &str,
        subject: &str,
        html_body: &str,
    ) -> anyhow::Result<()> {
        let subject = Content::builder().data(subject).charset("UTF-8").build()?;
        let body = Body::builder()
            .html(Content::builder().data(html_body).charset("UTF-8").build()?)
            .build();
        let message = Message::builder().subject(subject).body(body).build()?;

        self.client
            .send_email()
            .from_email_address(sender)
            .destination(Destination::builder().to_addresses(recipient).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;
        Ok(())
    }
}
