//! Chart specifications built from statement tables and price history.
//!
//! Builders return `None` ("no chart") instead of failing when their input is
//! empty. Rendering is left to the UI layer.

use super::line_items::*;
use super::{PriceBar, StatementTable};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Pie,
    Candlestick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: f64,
}

impl PieSlice {
    /// Share of the slice within `slices`, in percent. 0 when the total is not positive.
    pub fn share(&self, slices: &[PieSlice]) -> f64 {
        let total: f64 = slices.iter().map(|s| s.value).sum();
        if total > 0.0 {
            self.value / total * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    /// Line with markers.
    Line(Vec<LinePoint>),
    Pie(Vec<PieSlice>),
    Candlestick(Vec<Candle>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Line(points) => points.len(),
            SeriesData::Pie(slices) => slices.len(),
            SeriesData::Candlestick(candles) => candles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub data: SeriesData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub series: Vec<Series>,
}

fn statement_line_chart(
    table: &StatementTable,
    item: &str,
    series_name: &str,
    title: &str,
    y_label: &str,
) -> Option<ChartSpec> {
    if table.is_empty() {
        return None;
    }
    // Columns come most recent first; plot oldest to newest.
    let mut points: Vec<LinePoint> = table
        .series(item)
        .into_iter()
        .map(|(x, y)| LinePoint { x, y })
        .collect();
    if points.is_empty() {
        return None;
    }
    points.reverse();

    Some(ChartSpec {
        kind: ChartKind::Line,
        title: title.to_string(),
        x_label: Some("Year".to_string()),
        y_label: Some(y_label.to_string()),
        series: vec![Series {
            name: series_name.to_string(),
            data: SeriesData::Line(points),
        }],
    })
}

pub fn revenue_chart(income_statement: &StatementTable) -> Option<ChartSpec> {
    statement_line_chart(
        income_statement,
        TOTAL_REVENUE,
        "Revenue",
        "Annual Revenue Trend",
        "Revenue ($)",
    )
}

pub fn profit_chart(income_statement: &StatementTable) -> Option<ChartSpec> {
    statement_line_chart(
        income_statement,
        NET_INCOME,
        "Net Income",
        "Annual Net Income Trend",
        "Net Income ($)",
    )
}

/// Asset composition and capital structure of the most recent period.
pub fn balance_sheet_chart(balance_sheet: &StatementTable) -> Option<ChartSpec> {
    if balance_sheet.is_empty() {
        return None;
    }
    let latest = |item: &str| balance_sheet.latest_or(item, 0.0).unwrap_or(0.0);

    let total_assets = latest(TOTAL_ASSETS);
    let current_assets = latest(TOTAL_CURRENT_ASSETS);
    let non_current_assets = total_assets - current_assets;
    let total_debt = latest(TOTAL_DEBT);
    let total_equity = latest(TOTAL_STOCKHOLDER_EQUITY);

    Some(ChartSpec {
        kind: ChartKind::Pie,
        title: "Financial Structure".to_string(),
        x_label: None,
        y_label: None,
        series: vec![
            Series {
                name: "Asset Composition".to_string(),
                data: SeriesData::Pie(vec![
                    PieSlice {
                        label: "Current Assets",
                        value: current_assets,
                    },
                    PieSlice {
                        label: "Non-current Assets",
                        value: non_current_assets,
                    },
                ]),
            },
            Series {
                name: "Capital Structure".to_string(),
                data: SeriesData::Pie(vec![
                    PieSlice {
                        label: "Debt",
                        value: total_debt,
                    },
                    PieSlice {
                        label: "Equity",
                        value: total_equity,
                    },
                ]),
            },
        ],
    })
}

pub fn price_chart(price_history: &[PriceBar]) -> Option<ChartSpec> {
    if price_history.is_empty() {
        return None;
    }
    let candles = price_history
        .iter()
        .map(|bar| Candle {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
        })
        .collect();

    Some(ChartSpec {
        kind: ChartKind::Candlestick,
        title: "1-Year Price History".to_string(),
        x_label: Some("Date".to_string()),
        y_label: Some("Price ($)".to_string()),
        series: vec![Series {
            name: "Price".to_string(),
            data: SeriesData::Candlestick(candles),
        }],
    })
}
