//! Instance inventory collection.
//!
//! The cloud provider sits behind the [`InstanceInventory`] trait so the
//! pipeline never talks to it directly; [`collect_regions`] fans one query
//! out per region and folds the results back together. A failing region
//! contributes nothing and never poisons the others.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use watchman_common::host::HostRecord;

pub mod ec2;

/// Metadata tag carrying a host's logical hostname.
pub const KNOWN_AS_TAG: &str = "known_as";

#[async_trait]
pub trait InstanceInventory: Send + Sync {
    /// Lists the running instances in one region.
    async fn running_instances(&self, region: &str) -> anyhow::Result<Vec<HostRecord>>;
}

/// Queries every region concurrently and concatenates the results in
/// region order. A per-region failure is logged and yields an empty
/// contribution for that region only.
pub async fn collect_regions(
    inventory: Arc<dyn InstanceInventory>,
    regions: &[String],
) -> Vec<HostRecord> {
    let mut handles = Vec::with_capacity(regions.len());
    for region in regions {
        let inventory = inventory.clone();
        let region = region.clone();
        handles.push(tokio::spawn(async move {
            match inventory.running_instances(&region).await {
                Ok(records) => records,
                Err(e) => {
                    error!("Error retrieving instances in region {region}: {e}");
                    Vec::new()
                }
            }
        }));
    }

    let mut records = Vec::new();
    for handle in handles {
        if let Ok(batch) = handle.await {
            records.extend(batch);
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedInventory;

    #[async_trait]
    impl InstanceInventory for ScriptedInventory {
        async fn running_instances(&self, region: &str) -> anyhow::Result<Vec<HostRecord>> {
            match region {
                "good-1" => Ok(vec![record("i-01", "one.example.com")]),
                "good-2" => Ok(vec![record("i-02", "two.example.com")]),
                "bad" => Err(anyhow::anyhow!("authentication token expired")),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn record(id: &str, label: &str) -> HostRecord {
        HostRecord {
            instance_id: Some(id.to_string()),
            address: String::new(),
            label: label.to_string(),
        }
    }

    fn regions(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn a_failing_region_does_not_affect_the_others() {
        let inventory: Arc<dyn InstanceInventory> = Arc::new(ScriptedInventory);
        let records =
            collect_regions(inventory, &regions(&["good-1", "bad", "good-2"])).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "one.example.com");
        assert_eq!(records[1].label, "two.example.com");
    }

    #[tokio::test]
    async fn results_come_back_in_region_order() {
        let inventory: Arc<dyn InstanceInventory> = Arc::new(ScriptedInventory);
        let records =
            collect_regions(inventory, &regions(&["good-2", "good-1"])).await;

        assert_eq!(records[0].label, "two.example.com");
        assert_eq!(records[1].label, "one.example.com");
    }
}
