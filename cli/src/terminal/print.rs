use colored::*;

use watchman_common::report::{Bucket, Report};
use watchman_core::pipeline::RunSummary;

/// Prints the report the way it would appear in the mailed version: bucket
/// headings in severity order, one line per host.
pub fn report(report: &Report, hosts_checked: usize) {
    if report.is_empty() {
        println!("{}", "No hosts to report.".dimmed());
        return;
    }

    for (bucket, lines) in report.groups() {
        let title = match bucket {
            Bucket::Healthy => bucket.title().green().bold(),
            Bucket::Failing => bucket.title().red().bold(),
            Bucket::Unknown => bucket.title().yellow().bold(),
        };
        println!("{title}");
        for line in lines {
            println!("  {line}");
        }
    }
    println!();
    println!("{}", format!("{hosts_checked} hosts checked").dimmed());
}

pub fn dispatch_summary(summary: &RunSummary) {
    report(&summary.report, summary.hosts_checked);

    for outcome in &summary.dispatch {
        match &outcome.error {
            None => println!("{} {}", "[+]".green().bold(), outcome.recipient),
            Some(reason) => println!(
                "{} {} ({reason})",
                "[-]".red().bold(),
                outcome.recipient
            ),
        }
    }
}
