use crate::analyzers::{brace_delta, source_lines, Analyzer};
use crate::report::{Issue, IssueType, Severity};

const MAX_NESTING: i64 = 4;

/// Tracks raw brace depth across the whole text. Any block counts, not just
/// conditionals.
pub struct NestingAnalyzer;

impl Analyzer for NestingAnalyzer {
    fn name(&self) -> &str {
        "nesting"
    }

    fn analyze(&self, source: &str) -> Vec<Issue> {
        let mut depth = 0i64;
        let mut max_depth = 0i64;
        let mut max_line = 0usize;

        for (line, trimmed) in source_lines(source) {
            depth += brace_delta(trimmed);
            // Strictly greater: the first line to reach the maximum wins.
            if depth > max_depth {
                max_depth = depth;
                max_line = line;
            }
        }

        if max_depth > MAX_NESTING {
            vec![Issue {
                kind: IssueType::NestedIfs,
                line: max_line,
                description: format!("Maximum nesting depth of {max_depth} levels"),
                severity: Severity::High,
            }]
        } else {
            Vec::new()
        }
    }
}
