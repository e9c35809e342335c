// Terminal output for check runs and `status`.

use std::path::Path;

use colored::Colorize;

use crate::pipeline::run::RunReport;
use crate::state::SeenSet;

/// One-line summary printed at the end of a check.
pub fn summary_line(report: &RunReport) -> String {
    format!(
        "Total alerts: {}, New: {}, Tracking: {}",
        report.total, report.new, report.tracking
    )
}

/// Print the end-of-run summary, flagging anything that didn't go through.
pub fn display_report(report: &RunReport) {
    if report.new == 0 {
        println!("No new alerts found");
    }
    println!("{}", summary_line(report));
    if report.new > 0 && !report.notified {
        println!(
            "  {} notification was not delivered to the desktop",
            "Warning:".yellow()
        );
    }
    if !report.saved {
        println!(
            "  {} seen alerts were not saved; they may be notified again",
            "Warning:".yellow()
        );
    }
}

/// Display the seen-file status for `hamsalert status`.
///
/// `persisted` is None when the file doesn't exist yet, Err when it can't be
/// read or parsed.
pub fn display_status(
    path: &Path,
    reset_mode: bool,
    persisted: &anyhow::Result<Option<SeenSet>>,
) {
    println!("Seen file: {}", path.display());
    if reset_mode {
        println!(
            "Reset mode: {} (next check treats every alert as new)",
            "on".yellow()
        );
    } else {
        println!("Reset mode: off");
    }

    match persisted {
        Ok(None) => {
            println!("Tracking: nothing yet");
            println!("  Run `hamsalert check` to fetch alerts");
        }
        Ok(Some(seen)) if seen.is_empty() => println!("Tracking: 0 alerts"),
        Ok(Some(seen)) => {
            let ids: Vec<String> = seen.iter().map(ToString::to_string).collect();
            println!("Tracking: {} alerts", seen.len());
            println!("  {}", ids.join(", ").dimmed());
        }
        Err(e) => {
            println!("Tracking: {} {e:#}", "unreadable:".red());
            println!("  The next check will start from an empty set");
        }
    }
}
