//! Console output for per-file outcomes and the run summary

use crate::application::dto::{FileOutcome, FileStatus, StripReport};
use console::style;
use std::path::PathBuf;

fn written(files: &[Option<&PathBuf>]) -> String {
    let names: Vec<String> = files
        .iter()
        .flatten()
        .map(|p| p.display().to_string())
        .collect();
    names.join(", ")
}

/// Formats one line describing a file's outcome
pub fn format_outcome(outcome: &FileOutcome) -> String {
    let name = outcome.path.display();

    match &outcome.status {
        FileStatus::NoHeader => format!("{}: {}", name, style("no header detected").dim()),
        FileStatus::Stripped {
            format,
            header_length,
            header_file,
            payload_file,
            ..
        } => format!(
            "{}: {} header detected ({} bytes); wrote {}",
            name,
            style(format).green().bold(),
            header_length,
            written(&[header_file.as_ref(), Some(payload_file)])
        ),
        FileStatus::Failed {
            format,
            header_file,
            payload_file,
            errors,
        } => {
            let reasons: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            let mut line = match format {
                Some(format) => format!(
                    "{}: {} header detected; {}: {}",
                    name,
                    style(format).yellow().bold(),
                    style("failed").red(),
                    reasons.join("; ")
                ),
                None => format!("{}: {}: {}", name, style("failed").red(), reasons.join("; ")),
            };
            let partial = written(&[header_file.as_ref(), payload_file.as_ref()]);
            if !partial.is_empty() {
                line.push_str(&format!(" (wrote {})", partial));
            }
            line
        }
    }
}

/// Prints the end-of-run summary
pub fn print_summary(report: &StripReport) {
    println!();
    if report.failed() > 0 {
        println!("{}", style("Finished with errors").yellow().bold());
    } else {
        println!("{}", style("Done").green().bold());
    }
    print!("{}", report.summary());
}
