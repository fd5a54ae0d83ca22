use snp_cli::analysis::StatementTable;

fn table() -> StatementTable {
    StatementTable::new(vec!["2023".into(), "2022".into()])
        .with_row("Total Revenue", vec![Some(100.0), Some(90.0)])
        .with_row("Net Income", vec![None, Some(9.0)])
}

#[test]
fn test_empty_when_either_axis_empty() {
    assert!(StatementTable::default().is_empty());
    assert!(StatementTable::new(vec!["2023".into()]).is_empty());
    assert!(!table().is_empty());
}

#[test]
fn test_push_row_pads_and_cuts() {
    let mut t = StatementTable::new(vec!["2023".into(), "2022".into()]);
    t.push_row("A", vec![Some(1.0)]);
    t.push_row("B", vec![Some(1.0), Some(2.0), Some(3.0)]);
    assert_eq!(t.row("A"), Some(&[Some(1.0), None][..]));
    assert_eq!(t.row("B"), Some(&[Some(1.0), Some(2.0)][..]));
}

#[test]
fn test_push_row_replaces_existing() {
    let mut t = table();
    t.push_row("Total Revenue", vec![Some(1.0), Some(2.0)]);
    assert_eq!(t.line_items().count(), 2);
    assert_eq!(t.latest_or("Total Revenue", 0.0), Some(1.0));
}

#[test]
fn test_latest_or() {
    let t = table();
    assert_eq!(t.latest_or("Total Revenue", 0.0), Some(100.0));
    assert_eq!(t.latest_or("Gross Profit", 0.0), Some(0.0));
    assert_eq!(t.latest_or("Net Income", 0.0), None);
}

#[test]
fn test_latest_nan_is_unavailable() {
    let t = StatementTable::new(vec!["2023".into()]).with_row("X", vec![Some(f64::NAN)]);
    assert_eq!(t.latest_or("X", 0.0), None);
}

#[test]
fn test_series_drops_missing() {
    let t = table();
    assert_eq!(t.series("Net Income"), vec![("2022".to_string(), 9.0)]);
    assert!(t.series("Gross Profit").is_empty());
}

#[test]
fn test_subset_keeps_requested_order() {
    let t = table();
    let sub = t.subset(&["Net Income", "Gross Profit", "Total Revenue"]);
    assert_eq!(sub.line_items().collect::<Vec<_>>(), vec!["Net Income", "Total Revenue"]);
    assert_eq!(sub.periods(), t.periods());
}
