use crate::analyzers::Analyzer;
use crate::report::{Issue, IssueType, Severity};

const MAX_FILE_LINES: usize = 500;

/// Whole-file length check. Reported as `longFunctions` on line 1.
pub struct FileSizeAnalyzer;

impl Analyzer for FileSizeAnalyzer {
    fn name(&self) -> &str {
        "file-size"
    }

    fn analyze(&self, source: &str) -> Vec<Issue> {
        let line_count = source.split('\n').count();
        if line_count <= MAX_FILE_LINES {
            return Vec::new();
        }

        vec![Issue {
            kind: IssueType::LongFunctions,
            line: 1,
            description: format!("File is {line_count} lines long"),
            severity: Severity::Medium,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_hundred_lines_is_fine() {
        let source = vec!["x"; 500].join("\n");
        assert!(FileSizeAnalyzer.analyze(&source).is_empty());
    }

    #[test]
    fn trailing_newline_counts_as_a_line() {
        let source = format!("{}\n", vec!["x"; 500].join("\n"));
        let issues = FileSizeAnalyzer.analyze(&source);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueType::LongFunctions);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].line, 1);
        assert_eq!(issues[0].description, "File is 501 lines long");
    }
}
