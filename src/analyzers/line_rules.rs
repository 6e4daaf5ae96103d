use std::sync::LazyLock;

use regex::Regex;

use crate::analyzers::{is_comment_line, source_lines, Analyzer};
use crate::report::{Issue, IssueType, Severity};

/// Any integer >= 2, or a multi-digit integer starting with 1. Digits and
/// word boundaries are ASCII-only.
static MAGIC_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)([2-9][0-9]*|1[0-9]+)(?-u:\b)").expect("magic number pattern")
});

static BAD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?-u:\b)(?:let|const|var)\s+(x|y|z|temp|data|stuff|thing|obj|arr|str|num)(?-u:\b)",
    )
    .expect("bad variable name pattern")
});

const TODO_MARKERS: &[&str] = &["TODO", "FIXME", "HACK"];
const CONSOLE_CALLS: &[&str] = &["console.log", "console.error", "console.warn"];
const MAGIC_NUMBER_EXCEPTIONS: &[&str] = &[
    "100", "1000", "1024", "200", "300", "400", "500", "404", "403", "401",
];

/// Per-line rules: TODO markers, console logging, magic numbers and bad
/// variable names. Each line is judged on its own.
pub struct LineRulesAnalyzer;

impl Analyzer for LineRulesAnalyzer {
    fn name(&self) -> &str {
        "lines"
    }

    fn analyze(&self, source: &str) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (line, trimmed) in source_lines(source) {
            if trimmed.is_empty() {
                continue;
            }

            // TODO markers count even inside comments.
            if TODO_MARKERS.iter().any(|m| trimmed.contains(m)) {
                issues.push(Issue {
                    kind: IssueType::TodoComments,
                    line,
                    description: "TODO/FIXME comment found".into(),
                    severity: Severity::Low,
                });
            }

            if is_comment_line(trimmed) {
                continue;
            }

            if CONSOLE_CALLS.iter().any(|c| trimmed.contains(c)) {
                issues.push(Issue {
                    kind: IssueType::ConsoleLog,
                    line,
                    description: "Console logging detected".into(),
                    severity: Severity::Medium,
                });
            }

            let numbers = magic_numbers(trimmed);
            if !numbers.is_empty() {
                issues.push(Issue {
                    kind: IssueType::MagicNumbers,
                    line,
                    description: format!("Magic numbers found: {}", numbers.join(", ")),
                    severity: Severity::Medium,
                });
            }

            let names = bad_variable_names(trimmed);
            if !names.is_empty() {
                issues.push(Issue {
                    kind: IssueType::BadVariableNames,
                    line,
                    description: format!("Poor variable names: {}", names.join(", ")),
                    severity: Severity::Medium,
                });
            }
        }

        issues
    }
}

fn magic_numbers(line: &str) -> Vec<&str> {
    MAGIC_NUMBER
        .find_iter(line)
        .map(|m| m.as_str())
        .filter(|n| !MAGIC_NUMBER_EXCEPTIONS.contains(n))
        .collect()
}

fn bad_variable_names(line: &str) -> Vec<&str> {
    BAD_NAME
        .captures_iter(line)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}
