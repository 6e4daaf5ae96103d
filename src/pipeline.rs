use std::collections::BTreeSet;

use tracing::trace;

use crate::analyzers::{default_analyzers, Analyzer};
use crate::report::{AnalysisResult, Issue, IssueType};

/// Orchestrates analyzers and aggregates their issues into one result.
pub struct Pipeline {
    analyzers: Vec<Box<dyn Analyzer>>,
    enabled: BTreeSet<IssueType>,
}

impl Pipeline {
    pub fn new(analyzers: Vec<Box<dyn Analyzer>>) -> Self {
        Self {
            analyzers,
            enabled: IssueType::all().iter().copied().collect(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_analyzers())
    }

    /// Keep only issues of the given types.
    pub fn with_enabled_checks(mut self, checks: impl IntoIterator<Item = IssueType>) -> Self {
        self.enabled = checks.into_iter().collect();
        self
    }

    pub fn run(&self, source: &str) -> AnalysisResult {
        let issues: Vec<Issue> = self
            .analyzers
            .iter()
            .flat_map(|a| {
                let found = a.analyze(source);
                trace!(analyzer = a.name(), issues = found.len(), "analyzer finished");
                found
            })
            .filter(|issue| self.enabled.contains(&issue.kind))
            .collect();

        AnalysisResult::from_issues(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;

    const SAMPLE: &str = "\
function process(items) {
  let temp = 42;
  console.log(temp);
  // TODO: handle errors
  return temp;
}";

    #[test]
    fn issues_follow_analyzer_order() {
        let mut source = String::from("let x = 3;\n");
        source.push_str("function long() {\n");
        for _ in 0..22 {
            source.push_str("  if (a) { if (b) { if (c) { if (d) { if (e) { go(); } } } } }\n");
        }
        source.push_str("}\n");
        source.push_str("a {{{{{\n}}}}}\n");

        let result = Pipeline::with_defaults().run(&source);
        let kinds: Vec<IssueType> = result.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueType::MagicNumbers,
                IssueType::BadVariableNames,
                IssueType::LongFunctions,
                IssueType::NestedIfs,
            ]
        );
    }

    #[test]
    fn summary_matches_issue_list() {
        let result = Pipeline::with_defaults().run(SAMPLE);
        assert_eq!(result.summary.total_issues, result.issues.len());
        assert_eq!(result.summary.by_type.values().sum::<usize>(), result.issues.len());
        assert_eq!(result.summary.by_severity.values().sum::<usize>(), result.issues.len());
        assert_eq!(result.summary.by_severity.get(&Severity::Low), Some(&1));
    }

    #[test]
    fn disabled_checks_are_filtered_before_summary() {
        let result = Pipeline::with_defaults()
            .with_enabled_checks([IssueType::ConsoleLog])
            .run(SAMPLE);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, IssueType::ConsoleLog);
        assert_eq!(result.summary.total_issues, 1);
        assert_eq!(result.summary.by_type.len(), 1);
    }

    #[test]
    fn empty_analyzer_set_yields_nothing() {
        let result = Pipeline::new(Vec::new()).run(SAMPLE);
        assert!(result.is_clean());
        assert_eq!(result.summary.total_issues, 0);
    }
}
