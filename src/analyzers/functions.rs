use std::sync::LazyLock;

use regex::Regex;

use crate::analyzers::{brace_delta, source_lines, Analyzer};
use crate::report::{Issue, IssueType, Severity};

const MAX_FUNCTION_LINES: usize = 20;

/// Name patterns, tried in order.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"function\s+(\w+)",
        r"(\w+)\s*[:=]\s*function",
        r"(\w+)\s*[:=]\s*\(",
        r"(\w+)\s*\(",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("function name pattern"))
    .collect()
});

/// Flags functions longer than twenty lines, using brace balancing to find
/// where a function ends.
pub struct FunctionLengthAnalyzer;

enum State<'a> {
    Idle,
    InFunction {
        start_line: usize,
        name: &'a str,
        lines: usize,
        braces: i64,
    },
}

impl Analyzer for FunctionLengthAnalyzer {
    fn name(&self) -> &str {
        "functions"
    }

    fn analyze(&self, source: &str) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut state = State::Idle;

        for (line, trimmed) in source_lines(source) {
            if matches!(state, State::Idle) && looks_like_function_start(trimmed) {
                state = State::InFunction {
                    start_line: line,
                    name: extract_function_name(trimmed),
                    lines: 0,
                    braces: 0,
                };
            }

            let State::InFunction {
                start_line,
                name,
                lines,
                braces,
            } = &mut state
            else {
                continue;
            };

            *lines += 1;
            *braces += brace_delta(trimmed);

            // A single-line literal must not close the function on its own line.
            if *braces <= 0 && *lines > 1 {
                if *lines > MAX_FUNCTION_LINES {
                    issues.push(Issue {
                        kind: IssueType::LongFunctions,
                        line: *start_line,
                        description: format!("Function \"{}\" is {} lines long", name, lines),
                        severity: Severity::High,
                    });
                }
                state = State::Idle;
            }
        }

        issues
    }
}

fn looks_like_function_start(line: &str) -> bool {
    line.contains("function ")
        || line.contains("=>")
        || (line.contains('(') && line.contains(')') && line.contains('{'))
}

/// Best-effort name for the function declared on `line`.
pub fn extract_function_name(line: &str) -> &str {
    NAME_PATTERNS
        .iter()
        .find_map(|re| re.captures(line).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
        .unwrap_or("anonymous")
}
