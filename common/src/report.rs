//! Probe outcome classification and report rendering.
//!
//! Every probed host falls into exactly one of three severity buckets. The
//! report lists the buckets in a fixed order, skipping empty ones, and the
//! per-host line format (`[<status>] <hostname>`) is part of the outbound
//! contract with whatever parses the mailed report.

use crate::host::ClassifiedHost;

/// Marker rendered when no HTTP response was observed at all.
pub const NO_RESPONSE: &str = "???";

/// Severity group a probed host lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Healthy,
    Failing,
    Unknown,
}

impl Bucket {
    pub fn title(self) -> &'static str {
        match self {
            Bucket::Healthy => "RUNNING!",
            Bucket::Failing => "!FAILURE",
            Bucket::Unknown => "!UNKNOWN",
        }
    }
}

/// Outcome of probing a single host.
///
/// `status` is `None` when no response came back (timeout, DNS failure,
/// refused connection), which is distinct from an explicit non-200 status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub host: ClassifiedHost,
    pub status: Option<u16>,
}

impl ProbeResult {
    /// Classification rule: an empty label means the host was never
    /// probed and is Unknown regardless of any status; 200 is Healthy;
    /// everything else, including absence of a response, is Failing.
    pub fn bucket(&self) -> Bucket {
        if self.host.label().is_empty() {
            Bucket::Unknown
        } else if self.status == Some(200) {
            Bucket::Healthy
        } else {
            Bucket::Failing
        }
    }

    /// `[200] svc.example.com` style line; `???` stands in for a missing
    /// status rather than omitting the marker.
    pub fn line(&self) -> String {
        match self.status {
            Some(code) => format!("[{code}] {}", self.host.label()),
            None => format!("[{NO_RESPONSE}] {}", self.host.label()),
        }
    }
}

/// The categorized report body: bucket groups in fixed severity order
/// (Healthy, Failing, Unknown), empty groups omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    groups: Vec<(Bucket, Vec<String>)>,
}

impl Report {
    /// Folds probe results into bucket groups. Within a group, lines keep
    /// the relative order of `results`, which the caller has already
    /// sorted into report order.
    pub fn build(results: &[ProbeResult]) -> Self {
        let mut healthy = Vec::new();
        let mut failing = Vec::new();
        let mut unknown = Vec::new();

        for result in results {
            let lines = match result.bucket() {
                Bucket::Healthy => &mut healthy,
                Bucket::Failing => &mut failing,
                Bucket::Unknown => &mut unknown,
            };
            lines.push(result.line());
        }

        let mut groups = Vec::new();
        for (bucket, lines) in [
            (Bucket::Healthy, healthy),
            (Bucket::Failing, failing),
            (Bucket::Unknown, unknown),
        ] {
            if !lines.is_empty() {
                groups.push((bucket, lines));
            }
        }
        Self { groups }
    }

    /// True when no host was classified into any bucket; an empty report
    /// is the empty value, not an empty wrapper.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[(Bucket, Vec<String>)] {
        &self.groups
    }

    /// Renders the `<div><dl>...</dl></div>` fragment that recipients'
    /// tooling parses. Returns `None` for an empty report.
    pub fn to_html(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut body = String::new();
        for (bucket, lines) in &self.groups {
            body.push_str(&group_heading(*bucket, !body.is_empty()));
            for line in lines {
                body.push_str("<dd>");
                body.push_str(line);
                body.push_str("</dd>");
            }
        }
        Some(format!("<div><dl>{body}</dl></div>"))
    }
}

fn group_heading(bucket: Bucket, follows_group: bool) -> String {
    let color = match bucket {
        Bucket::Healthy => return "<dt><b>RUNNING!</b></dt>".to_string(),
        Bucket::Failing => "color: red;",
        Bucket::Unknown => "color: orange;",
    };
    let mut style = color.to_string();
    if follows_group {
        style.push_str(" margin-top: 1rem;");
    }
    format!("<dt style=\"{style}\"><b>{}</b></dt>", bucket.title())
}

/// Wraps a rendered report fragment in the minimal document shell the mail
/// transport expects.
pub fn html_document(fragment: &str) -> String {
    format!("<html>\n<body>\n<div>\n{fragment}\n</div>\n</body>\n</html>")
}
