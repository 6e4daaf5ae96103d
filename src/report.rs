use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The kinds of smell the analyzers can detect.
///
/// Declaration order matters: it is the tie-break order used when picking
/// the dominant issue type for a meme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueType {
    ConsoleLog,
    NestedIfs,
    LongFunctions,
    MagicNumbers,
    TodoComments,
    BadVariableNames,
}

impl IssueType {
    pub fn all() -> &'static [IssueType] {
        &[
            IssueType::ConsoleLog,
            IssueType::NestedIfs,
            IssueType::LongFunctions,
            IssueType::MagicNumbers,
            IssueType::TodoComments,
            IssueType::BadVariableNames,
        ]
    }

    /// The camelCase key used in config files and JSON output.
    pub fn key(self) -> &'static str {
        match self {
            IssueType::ConsoleLog => "consoleLog",
            IssueType::NestedIfs => "nestedIfs",
            IssueType::LongFunctions => "longFunctions",
            IssueType::MagicNumbers => "magicNumbers",
            IssueType::TodoComments => "todoComments",
            IssueType::BadVariableNames => "badVariableNames",
        }
    }

    pub fn from_key(key: &str) -> Option<IssueType> {
        IssueType::all().iter().copied().find(|t| t.key() == key)
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// A single smell emitted by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueType,
    /// 1-based line number. Whole-file issues point at line 1.
    pub line: usize,
    /// Human-readable description, may embed matched tokens.
    pub description: String,
    pub severity: Severity,
}

/// Counts derived from an issue list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_issues: usize,
    pub by_type: BTreeMap<IssueType, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
}

impl Summary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Summary {
            total_issues: issues.len(),
            ..Summary::default()
        };
        for issue in issues {
            *summary.by_type.entry(issue.kind).or_insert(0) += 1;
            *summary.by_severity.entry(issue.severity).or_insert(0) += 1;
        }
        summary
    }
}

/// The full analysis of a single text body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl AnalysisResult {
    /// Build a result whose summary is computed from `issues`.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let summary = Summary::from_issues(&issues);
        Self { issues, summary }
    }

    /// A result with no issues, used when roasting a commit message.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(kind: IssueType, severity: Severity) -> Issue {
        Issue {
            kind,
            line: 1,
            description: String::new(),
            severity,
        }
    }

    #[test]
    fn summary_partitions_issues() {
        let result = AnalysisResult::from_issues(vec![
            issue(IssueType::ConsoleLog, Severity::Medium),
            issue(IssueType::ConsoleLog, Severity::Medium),
            issue(IssueType::TodoComments, Severity::Low),
            issue(IssueType::LongFunctions, Severity::High),
        ]);
        assert_eq!(result.summary.total_issues, 4);
        assert_eq!(result.summary.by_type[&IssueType::ConsoleLog], 2);
        assert_eq!(result.summary.by_type.values().sum::<usize>(), 4);
        assert_eq!(result.summary.by_severity.values().sum::<usize>(), 4);
        assert_eq!(result.summary.by_severity[&Severity::Medium], 2);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let result = AnalysisResult::from_issues(vec![issue(IssueType::BadVariableNames, Severity::Medium)]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["issues"][0]["type"], "badVariableNames");
        assert_eq!(json["issues"][0]["severity"], "medium");
        assert_eq!(json["summary"]["totalIssues"], 1);
        assert_eq!(json["summary"]["byType"]["badVariableNames"], 1);
        assert_eq!(json["summary"]["bySeverity"]["medium"], 1);
    }

    #[test]
    fn keys_round_trip_through_from_key() {
        for kind in IssueType::all() {
            assert_eq!(IssueType::from_key(kind.key()), Some(*kind));
        }
        assert_eq!(IssueType::from_key("spaghetti"), None);
    }
}
