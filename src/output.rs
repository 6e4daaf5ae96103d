use std::path::PathBuf;

use serde::Serialize;

use crate::mode::Mode;
use crate::report::{AnalysisResult, Severity};

/// Output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Text,
    Json,
}

/// Everything produced for one roast target (a file, a commit message, a
/// commit diff).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastRecord {
    pub target: String,
    pub mode: Mode,
    pub analysis: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roast: Option<String>,
    /// In-character remark shown instead of a roast (clean code, etc).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meme: Option<PathBuf>,
}

impl RoastRecord {
    pub fn new(target: impl Into<String>, mode: Mode, analysis: AnalysisResult) -> Self {
        Self {
            target: target.into(),
            mode,
            analysis,
            roast: None,
            note: None,
            meme: None,
        }
    }
}

pub const ROASTBOT_PREFIX: &str = "🤖 RoastBot: ";

/// Format records as a JSON array.
pub fn format_json(records: &[RoastRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

fn severity_counts(analysis: &AnalysisResult) -> String {
    [Severity::High, Severity::Medium, Severity::Low]
        .iter()
        .filter_map(|s| {
            let n = analysis.summary.by_severity.get(s).copied().unwrap_or(0);
            (n > 0).then(|| format!("{s} {n}"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a record as plain text (no colors).
pub fn format_text(record: &RoastRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!("Target: {}\n", record.target));
    let total = record.analysis.summary.total_issues;
    if total > 0 {
        out.push_str(&format!("Issues: {total} ({})\n", severity_counts(&record.analysis)));
        for issue in &record.analysis.issues {
            out.push_str(&format!(
                "  line {:<4} [{}] {}: {}\n",
                issue.line, issue.kind, issue.severity, issue.description
            ));
        }
    }
    if let Some(ref note) = record.note {
        out.push_str(&format!("{note}\n"));
    }
    if let Some(ref roast) = record.roast {
        out.push_str(&format!("{ROASTBOT_PREFIX}{roast}\n"));
    }
    if let Some(ref meme) = record.meme {
        out.push_str(&format!("Meme: {}\n", meme.display()));
    }

    out
}

/// Format a record with terminal colors. The roast takes the mode's color.
#[cfg(feature = "cli")]
pub fn format_pretty(record: &RoastRecord) -> String {
    use colored::Colorize;

    let mut out = String::new();

    out.push_str(&format!("🔥 {} {}\n", "Roasting".bold(), record.target.bold()));

    let total = record.analysis.summary.total_issues;
    if total > 0 {
        out.push_str(&format!(
            "{} {} ({})\n",
            "Issues:".dimmed(),
            total,
            severity_counts(&record.analysis)
        ));
        for issue in &record.analysis.issues {
            let severity = match issue.severity {
                Severity::High => issue.severity.to_string().red(),
                Severity::Medium => issue.severity.to_string().yellow(),
                Severity::Low => issue.severity.to_string().dimmed(),
            };
            out.push_str(&format!(
                "  {} {} {} {}\n",
                format!("line {:<4}", issue.line).dimmed(),
                format!("[{}]", issue.kind).cyan(),
                severity,
                issue.description,
            ));
        }
    }

    if let Some(ref note) = record.note {
        out.push_str(&format!("\n{}\n", note.green()));
    }

    if let Some(ref roast) = record.roast {
        let line = format!("{ROASTBOT_PREFIX}{roast}");
        let line = match record.mode {
            Mode::Gentle => line.blue(),
            Mode::Savage => line.yellow(),
            Mode::Toxic => line.red(),
        };
        out.push_str(&format!("\n{}\n", line.bold()));
    }

    if let Some(ref meme) = record.meme {
        out.push_str(&format!("\n🖼  {} {}\n", "Meme saved:".green(), meme.display()));
    }

    out
}
