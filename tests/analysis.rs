use roastme::report::{IssueType, Severity};

fn kinds(source: &str) -> Vec<IssueType> {
    roastme::analyze(source).issues.iter().map(|i| i.kind).collect()
}

#[test]
fn empty_input_is_clean() {
    let result = roastme::analyze("");
    assert!(result.issues.is_empty());
    assert_eq!(result.summary.total_issues, 0);
}

#[test]
fn bad_name_and_console_on_one_line() {
    let found = kinds("let x = 5; console.log(x);");
    assert!(found.contains(&IssueType::BadVariableNames));
    assert!(found.contains(&IssueType::ConsoleLog));
}

#[test]
fn http_status_codes_are_not_magic() {
    assert!(kinds("return 404;").is_empty());

    let result = roastme::analyze("const port = 1337;");
    let magic: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.kind == IssueType::MagicNumbers)
        .collect();
    assert_eq!(magic.len(), 1);
    assert!(magic[0].description.contains("1337"));
}

#[test]
fn one_line_with_three_smells() {
    let result = roastme::analyze("let temp = 1; console.log(temp); // TODO fix this");
    let count = |kind| result.summary.by_type.get(&kind).copied().unwrap_or(0);
    assert_eq!(count(IssueType::BadVariableNames), 1);
    assert_eq!(count(IssueType::ConsoleLog), 1);
    assert_eq!(count(IssueType::TodoComments), 1);
    assert_eq!(count(IssueType::MagicNumbers), 0);
    assert_eq!(result.summary.total_issues, 3);
}

#[test]
fn depth_five_reports_first_line_at_peak() {
    let source = "a {\n b {\n  c {\n   d {\n    e {\n    }\n    f {\n    }\n   }\n  }\n }\n}";
    let result = roastme::analyze(source);
    let nested: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.kind == IssueType::NestedIfs)
        .collect();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].line, 5);
    assert_eq!(nested[0].severity, Severity::High);
}

#[test]
fn long_function_reported_at_its_start() {
    let mut source = String::from("const total = price;\n\nfunction crunch(items) {\n");
    for _ in 0..23 {
        source.push_str("  step();\n");
    }
    source.push_str("}\n");

    let result = roastme::analyze(&source);
    let long: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.kind == IssueType::LongFunctions)
        .collect();
    assert_eq!(long.len(), 1);
    assert_eq!(long[0].line, 3);
    assert!(long[0].description.contains("crunch"));
    assert!(long[0].description.contains("25"));
}

#[test]
fn summary_partitions_a_messy_file() {
    let source = include_str!("fixtures/messy.js");
    let result = roastme::analyze(source);
    assert!(result.summary.total_issues > 0);
    assert_eq!(result.summary.total_issues, result.issues.len());
    assert_eq!(result.summary.by_type.values().sum::<usize>(), result.issues.len());
    assert_eq!(result.summary.by_severity.values().sum::<usize>(), result.issues.len());
}

#[test]
fn disabled_checks_are_dropped_before_summary() {
    let source = "let temp = 1; console.log(temp); // TODO fix this";
    let result = roastme::analyze_with_checks(source, [IssueType::ConsoleLog]);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].kind, IssueType::ConsoleLog);
    assert_eq!(result.summary.total_issues, 1);
    assert_eq!(result.summary.by_type.len(), 1);
}
