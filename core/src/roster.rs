//! Merging collected and statically configured hosts into report order.

use watchman_common::host::{ClassifiedHost, HostRecord};

/// Builds records for the statically configured hostnames.
pub fn static_hosts(hostnames: &[String]) -> Vec<HostRecord> {
    hostnames
        .iter()
        .map(|name| HostRecord::static_host(name))
        .collect()
}

/// Concatenates all records, derives each host's sort key, and orders the
/// roster by `(domain, subdomain)`. The sort is stable, so hosts sharing a
/// key keep their relative input order.
pub fn merge(collected: Vec<HostRecord>, configured: Vec<HostRecord>) -> Vec<ClassifiedHost> {
    let mut roster: Vec<ClassifiedHost> = collected
        .into_iter()
        .chain(configured)
        .map(ClassifiedHost::from_record)
        .collect();
    roster.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    roster
}
