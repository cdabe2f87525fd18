//! EC2-backed inventory adapter.
//!
//! One `DescribeInstances` call per region, filtered to running instances.
//! The logical hostname comes from the `known_as` instance tag; instances
//! without the tag still appear, with an empty label, and end up in the
//! Unknown bucket downstream.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_ec2::types::Filter;
use tracing::debug;

use watchman_common::error::RunError;
use watchman_common::host::HostRecord;

use super::{InstanceInventory, KNOWN_AS_TAG};

pub struct Ec2Inventory;

impl Ec2Inventory {
    pub fn new() -> Self {
        Self
    }

    async fn client_for(&self, region: &str) -> aws_sdk_ec2::Client {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        aws_sdk_ec2::Client::new(&config)
    }
}

impl Default for Ec2Inventory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InstanceInventory for Ec2Inventory {
    async fn running_instances(&self, region: &str) -> anyhow::Result<Vec<HostRecord>> {
        let client = self.client_for(region).await;
        let response = client
            .describe_instances()
            .filters(
                Filter::builder()
                    .name("instance-state-name")
                    .values("running")
                    .build(),
            )
            .send()
            .await?;

        let mut records = Vec::new();
        for reservation in response.reservations() {
            for instance in reservation.instances() {
                let label = instance
                    .tags()
                    .iter()
                    .find(|tag| tag.key() == Some(KNOWN_AS_TAG))
                    .and_then(|tag| tag.value())
                    .unwrap_or_default();

                records.push(HostRecord {
                    instance_id: instance.instance_id().map(String::from),
                    address: instance.public_dns_name().unwrap_or_default().to_string(),
                    label: label.to_string(),
                });
            }
        }
        debug!("{region}: {} running instances", records.len());
        Ok(records)
    }
}

/// Resolves cloud credentials before the pipeline runs, so "nothing could
/// run" is reported distinctly from a run that completed with partial data.
pub async fn preflight_credentials() -> Result<(), RunError> {
    let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let provider = config
        .credentials_provider()
        .ok_or_else(|| RunError::Credentials("no credentials provider configured".to_string()))?;
    provider
        .provide_credentials()
        .await
        .map_err(|e| RunError::Credentials(e.to_string()))?;
    Ok(())
}
