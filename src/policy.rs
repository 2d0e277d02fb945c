//! src/policy.rs

use crate::issue::IssueKey;
use crate::tracker::{WorklogEntry, WorklogSummary};
use colored::Colorize;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub passed: bool,
    pub summary: WorklogSummary,
}

/// The branch passes as soon as the tracker reports any worklog at all.
pub fn evaluate(summary: WorklogSummary) -> VerificationResult {
    VerificationResult {
        passed: summary.total_count > 0,
        summary,
    }
}

pub fn render_report(key: &IssueKey, result: &VerificationResult) -> String {
    let mut report = String::new();

    report.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    report.push_str(&format!(
        "{}\n",
        format!("Verifying worklog for task {key}").bold()
    ));
    report.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));

    let count_line = format!("Registered worklogs: {}", result.summary.total_count);
    if result.passed {
        report.push_str(&format!("{}\n", count_line.green()));
    } else {
        report.push_str(&format!("{}\n", count_line.red()));
    }
    report.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));

    if result.passed {
        report.push_str(&render_table(&result.summary.entries));
        report.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
    } else {
        report.push_str(&format!(
            "{}\n",
            "You must log time for this task!".red().bold()
        ));
        report.push_str(&format!("{}\n", "^".repeat(RULE_WIDTH)));
    }

    report
}

/// Two columns: names left-aligned, durations right-aligned.
fn render_table(entries: &[WorklogEntry]) -> String {
    let name_width = entries
        .iter()
        .map(|e| e.author_display_name.chars().count())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or(0);
    let time_width = entries
        .iter()
        .map(|e| e.time_spent.chars().count())
        .chain(std::iter::once("Time".len()))
        .max()
        .unwrap_or(0);

    let mut table = format!("{:<name_width$}  {:>time_width$}\n", "Name", "Time");
    table.push_str(&format!(
        "{}  {}\n",
        "-".repeat(name_width),
        "-".repeat(time_width)
    ));
    for entry in entries {
        table.push_str(&format!(
            "{:<name_width$}  {:>time_width$}\n",
            entry.author_display_name, entry.time_spent
        ));
    }
    table
}
