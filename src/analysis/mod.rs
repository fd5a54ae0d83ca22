pub mod charts;
pub mod health;
pub mod price;
pub mod ratios;
pub mod report;
pub mod statement;

pub use charts::{ChartKind, ChartSpec, Series, SeriesData};
pub use health::{HealthAssessment, Rating, assess_health};
pub use price::{PriceStats, price_stats};
pub use ratios::{Ratio, RatioBundle, compute_ratios, compute_ratios_checked, try_compute_ratios};
pub use report::{AnalysisMode, AnalysisReport, CompanyOverview, analyze};
pub use statement::StatementTable;

use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("field '{field}' is not numeric: {value}")]
    NonNumericField { field: String, value: String },
}

/// A scalar from the provider's company info block.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl InfoValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            InfoValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            InfoValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for InfoValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InfoValue::Number(n) => write!(f, "{}", n),
            InfoValue::Text(s) => write!(f, "{:?}", s),
            InfoValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// Company info keyed by the provider's field names (`marketCap`, `forwardPE`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyInfo {
    fields: BTreeMap<String, InfoValue>,
}

impl CompanyInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: InfoValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn with(mut self, key: &str, value: InfoValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Numeric lookup. Absent keys are `Ok(None)`; a present non-numeric value
    /// is a malformed payload.
    pub fn number(&self, key: &str) -> Result<Option<f64>, AnalysisError> {
        match self.fields.get(key) {
            None => Ok(None),
            Some(InfoValue::Number(n)) => Ok(Some(*n)),
            Some(other) => Err(AnalysisError::NonNumericField {
                field: key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    pub fn number_or(&self, key: &str, default: f64) -> Result<f64, AnalysisError> {
        Ok(self.number(key)?.unwrap_or(default))
    }

    /// Lenient lookup for display: anything that is not a number reads as `None`.
    pub fn number_lenient(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(InfoValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(InfoValue::as_text)
    }
}

/// One daily OHLC bar.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Everything fetched for one ticker. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanySnapshot {
    pub ticker: String,
    pub display_name: String,
    pub info: CompanyInfo,
    pub income_statement: StatementTable,
    pub balance_sheet: StatementTable,
    pub cash_flow: StatementTable,
    /// Chronological, oldest first.
    pub price_history: Vec<PriceBar>,
}

impl CompanySnapshot {
    pub fn new(ticker: &str, display_name: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            display_name: display_name.to_string(),
            info: CompanyInfo::new(),
            income_statement: StatementTable::default(),
            balance_sheet: StatementTable::default(),
            cash_flow: StatementTable::default(),
            price_history: Vec::new(),
        }
    }
}

pub mod line_items {
    pub const TOTAL_REVENUE: &str = "Total Revenue";
    pub const GROSS_PROFIT: &str = "Gross Profit";
    pub const OPERATING_INCOME: &str = "Operating Income";
    pub const NET_INCOME: &str = "Net Income";
    pub const TOTAL_ASSETS: &str = "Total Assets";
    pub const TOTAL_CURRENT_ASSETS: &str = "Total Current Assets";
    pub const TOTAL_DEBT: &str = "Total Debt";
    pub const TOTAL_STOCKHOLDER_EQUITY: &str = "Total Stockholder Equity";

    pub const INCOME_KEY_ITEMS: &[&str] = &[TOTAL_REVENUE, GROSS_PROFIT, OPERATING_INCOME, NET_INCOME];
    pub const BALANCE_KEY_ITEMS: &[&str] = &[
        TOTAL_ASSETS,
        TOTAL_CURRENT_ASSETS,
        TOTAL_DEBT,
        TOTAL_STOCKHOLDER_EQUITY,
    ];
}
