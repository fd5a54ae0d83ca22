mod common;

use common::{make_balance, make_bar, make_income};
use snp_cli::analysis::charts::{balance_sheet_chart, price_chart, profit_chart, revenue_chart};
use snp_cli::analysis::line_items::*;
use snp_cli::analysis::{ChartKind, SeriesData, StatementTable};

fn line_points(data: &SeriesData) -> Vec<(String, f64)> {
    match data {
        SeriesData::Line(points) => points.iter().map(|p| (p.x.clone(), p.y)).collect(),
        other => panic!("expected line series, got {:?}", other),
    }
}

// --- revenue / profit ---

#[test]
fn test_revenue_chart_empty_statement_is_none() {
    assert!(revenue_chart(&StatementTable::default()).is_none());
    assert!(profit_chart(&StatementTable::new(vec!["2023".into()])).is_none());
}

#[test]
fn test_revenue_chart_missing_row_is_none() {
    let table = StatementTable::new(vec!["2023".into()]).with_row(NET_INCOME, vec![Some(5.0)]);
    assert!(revenue_chart(&table).is_none());
    assert!(profit_chart(&table).is_some());
}

#[test]
fn test_revenue_chart_oldest_first() {
    let chart = revenue_chart(&make_income(100.0, 50.0, 20.0)).unwrap();
    assert_eq!(chart.kind, ChartKind::Line);
    assert_eq!(chart.title, "Annual Revenue Trend");
    assert_eq!(chart.series.len(), 1);
    assert_eq!(
        line_points(&chart.series[0].data),
        vec![("2022-09-30".to_string(), 80.0), ("2023-09-30".to_string(), 100.0)]
    );
}

#[test]
fn test_profit_chart_skips_missing_cells() {
    let table = StatementTable::new(vec!["2023".into(), "2022".into(), "2021".into()])
        .with_row(NET_INCOME, vec![Some(3.0), None, Some(1.0)]);
    let chart = profit_chart(&table).unwrap();
    assert_eq!(chart.series[0].name, "Net Income");
    assert_eq!(
        line_points(&chart.series[0].data),
        vec![("2021".to_string(), 1.0), ("2023".to_string(), 3.0)]
    );
}

// --- balance sheet ---

#[test]
fn test_balance_chart_empty_is_none() {
    assert!(balance_sheet_chart(&StatementTable::default()).is_none());
}

#[test]
fn test_balance_chart_slices() {
    let chart = balance_sheet_chart(&make_balance(200.0, 60.0, 40.0, 80.0)).unwrap();
    assert_eq!(chart.kind, ChartKind::Pie);
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[0].name, "Asset Composition");
    assert_eq!(chart.series[1].name, "Capital Structure");

    let SeriesData::Pie(assets) = &chart.series[0].data else {
        panic!("expected pie");
    };
    assert_eq!(assets[0].label, "Current Assets");
    assert_eq!(assets[0].value, 60.0);
    assert_eq!(assets[1].label, "Non-current Assets");
    assert_eq!(assets[1].value, 140.0);
    assert!((assets[0].share(assets) - 30.0).abs() < 1e-9);

    let SeriesData::Pie(capital) = &chart.series[1].data else {
        panic!("expected pie");
    };
    assert_eq!(capital[0].value, 40.0);
    assert_eq!(capital[1].value, 80.0);
}

#[test]
fn test_balance_chart_missing_items_read_as_zero() {
    let table = StatementTable::new(vec!["2023".into()]).with_row(TOTAL_ASSETS, vec![Some(10.0)]);
    let chart = balance_sheet_chart(&table).unwrap();
    let SeriesData::Pie(capital) = &chart.series[1].data else {
        panic!("expected pie");
    };
    assert!(capital.iter().all(|s| s.value == 0.0));
    assert_eq!(capital[0].share(capital), 0.0);
}

// --- price ---

#[test]
fn test_price_chart_empty_is_none() {
    assert!(price_chart(&[]).is_none());
}

#[test]
fn test_price_chart_candles() {
    let bars = vec![make_bar(2, 100.0, 102.0), make_bar(3, 102.0, 99.0)];
    let chart = price_chart(&bars).unwrap();
    assert_eq!(chart.kind, ChartKind::Candlestick);
    let SeriesData::Candlestick(candles) = &chart.series[0].data else {
        panic!("expected candles");
    };
    assert_eq!(candles.len(), 2);
    assert!(candles[0].is_bullish());
    assert!(!candles[1].is_bullish());
    assert_eq!(candles[1].high, 103.0);
    assert_eq!(candles[1].low, 98.0);
    assert!(candles[0].date < candles[1].date);
}
