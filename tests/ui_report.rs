mod common;

use common::make_snapshot;
use snp_cli::analysis::report::COMPARISON_NOTICE;
use snp_cli::analysis::{AnalysisMode, CompanySnapshot, StatementTable, analyze};
use snp_cli::ui::report_lines;

fn rendered(snapshot: &CompanySnapshot, mode: AnalysisMode) -> Vec<String> {
    report_lines(&analyze(snapshot, mode), 100)
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .collect()
}

fn contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|l| l.contains(needle))
}

#[test]
fn test_overview_always_rendered() {
    let lines = rendered(&make_snapshot("AAPL"), AnalysisMode::Comparison);
    assert!(contains(&lines, "Apple Inc. (AAPL)"));
    assert!(contains(&lines, "$189.50"));
    assert!(contains(&lines, "$2.90T"));
    assert!(contains(&lines, "0.50%"));
}

#[test]
fn test_comparison_shows_notice_only() {
    let lines = rendered(&make_snapshot("AAPL"), AnalysisMode::Comparison);
    assert!(contains(&lines, COMPARISON_NOTICE));
    assert!(!contains(&lines, "Financial Ratios"));
    assert!(!contains(&lines, "Income Statement"));
}

#[test]
fn test_ratios_panel_and_health() {
    let lines = rendered(&make_snapshot("AAPL"), AnalysisMode::Ratios);
    assert!(contains(&lines, "50.00%"));
    assert!(contains(&lines, "25.00%"));
    assert!(contains(&lines, "Financial Health"));
    assert!(contains(&lines, "EXCELLENT"));
    assert!(contains(&lines, "excellent profitability"));
}

#[test]
fn test_statements_render_currency_cells() {
    let mut snapshot = make_snapshot("AAPL");
    snapshot.income_statement = common::make_income(383.3e9, 169.1e9, 97.0e9);
    let lines = rendered(&snapshot, AnalysisMode::Statements);
    assert!(contains(&lines, "Income Statement"));
    assert!(contains(&lines, "$383.30B"));
    assert!(contains(&lines, "Annual Revenue Trend"));
    assert!(contains(&lines, "Capital Structure"));
}

#[test]
fn test_empty_statements_render_placeholder() {
    let mut snapshot = make_snapshot("AAPL");
    snapshot.income_statement = Default::default();
    let lines = rendered(&snapshot, AnalysisMode::Statements);
    assert!(contains(&lines, "Income Statement not available"));
    assert!(!contains(&lines, "Annual Revenue Trend"));
}

#[test]
fn test_price_chart_rendered() {
    let lines = rendered(&make_snapshot("AAPL"), AnalysisMode::Price);
    assert!(contains(&lines, "1-Year Price History"));
    assert!(lines.iter().any(|l| l.contains('┃')));
    assert!(contains(&lines, "52W High:"));
}

#[test]
fn test_price_without_history() {
    let mut snapshot = make_snapshot("AAPL");
    snapshot.price_history.clear();
    let lines = rendered(&snapshot, AnalysisMode::Price);
    assert!(contains(&lines, "No price history available"));
}

#[test]
fn test_cash_flow_section_rendered_when_reported() {
    let mut snapshot = make_snapshot("AAPL");
    snapshot.cash_flow = StatementTable::new(common::periods())
        .with_row("Operating Cash Flow", vec![Some(110.5e9), Some(122.2e9)])
        .with_row("Capital Expenditure", vec![Some(-11.0e9), None]);
    let lines = rendered(&snapshot, AnalysisMode::Statements);
    assert!(contains(&lines, "Cash Flow"));
    assert!(contains(&lines, "Operating Cash Flow"));
    assert!(contains(&lines, "$110.50B"));
    assert!(contains(&lines, "$-11.00B"));
}

#[test]
fn test_cash_flow_section_hidden_when_empty() {
    let lines = rendered(&make_snapshot("AAPL"), AnalysisMode::Statements);
    assert!(!contains(&lines, "Cash Flow"));
    assert!(contains(&lines, "Balance Sheet"));
}

#[test]
fn test_statement_without_key_items_is_still_shown() {
    let mut snapshot = make_snapshot("AAPL");
    snapshot.income_statement = StatementTable::new(common::periods())
        .with_row("Research Development", vec![Some(29.9e9), Some(26.2e9)]);
    let lines = rendered(&snapshot, AnalysisMode::Statements);
    assert!(!contains(&lines, "Income Statement not available"));
    assert!(contains(&lines, "Income Statement"));
    assert!(contains(&lines, "No key line items reported"));
    assert!(contains(&lines, "2023-09-30"));
}
