pub mod file_size;
pub mod functions;
pub mod line_rules;
pub mod nesting;

use crate::report::Issue;

/// Trait for all source code analyzers.
pub trait Analyzer: Send + Sync {
    /// A short name identifying this analyzer.
    fn name(&self) -> &str;

    /// Analyze the given source text and return issues in scan order.
    fn analyze(&self, source: &str) -> Vec<Issue>;
}

/// Returns the default set of analyzers, in the order their issues are reported.
pub fn default_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(line_rules::LineRulesAnalyzer),
        Box::new(functions::FunctionLengthAnalyzer),
        Box::new(nesting::NestingAnalyzer),
        Box::new(file_size::FileSizeAnalyzer),
    ]
}

/// Split on `\n` only. A trailing empty segment is kept so line numbers
/// and line counts line up with the raw text.
pub(crate) fn source_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source.split('\n').enumerate().map(|(i, line)| (i + 1, line.trim()))
}

/// `//` and `/*` lines are comments. Purely syntactic.
pub(crate) fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*")
}

/// Opening minus closing braces. Braces inside strings and comments count too.
pub(crate) fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}
