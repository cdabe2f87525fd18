//! Host domain models and the hostname classifier.
//!
//! A [`HostRecord`] is what the collectors produce: a logical hostname plus
//! whatever instance metadata was available. Deriving the `(domain,
//! subdomain)` sort key is a separate, immutable step ([`ClassifiedHost`]),
//! so the final report order is a pure function of the hostnames involved
//! and never of collection or probe timing.

/// A host as produced by the instance collector or the static host loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    /// Cloud instance id; `None` for statically configured hosts.
    pub instance_id: Option<String>,
    /// Primary network address, empty when the provider exposes none.
    pub address: String,
    /// Logical hostname: the "known_as" tag value or the configured name.
    /// May be empty when the tag is missing.
    pub label: String,
}

impl HostRecord {
    /// A statically configured host carries no instance metadata; the
    /// configured name serves as both address and label.
    pub fn static_host(hostname: &str) -> Self {
        Self {
            instance_id: None,
            address: hostname.to_string(),
            label: hostname.to_string(),
        }
    }
}

/// A [`HostRecord`] together with its derived sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedHost {
    pub record: HostRecord,
    pub domain: String,
    pub subdomain: String,
}

impl ClassifiedHost {
    pub fn from_record(record: HostRecord) -> Self {
        let (domain, subdomain) = classify(&record.label);
        Self {
            record,
            domain,
            subdomain,
        }
    }

    pub fn label(&self) -> &str {
        &self.record.label
    }

    /// Report ordering key: lexicographic on domain, then subdomain.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.domain, &self.subdomain)
    }
}

/// Splits a hostname into its `(domain, subdomain)` parts.
///
/// The two trailing dot-separated segments form the domain; whatever is in
/// front of them is the subdomain. Labels with two or fewer segments
/// (including single words and the empty string) are their own domain with
/// an empty subdomain. Total over all strings.
pub fn classify(label: &str) -> (String, String) {
    let parts: Vec<&str> = label.split('.').collect();
    if parts.len() <= 2 {
        (label.to_string(), String::new())
    } else {
        let split_at = parts.len() - 2;
        (parts[split_at..].join("."), parts[..split_at].join("."))
    }
}
