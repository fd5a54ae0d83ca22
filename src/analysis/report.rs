use super::charts::{self, ChartSpec};
use super::health::{HealthAssessment, assess_health};
use super::line_items::{BALANCE_KEY_ITEMS, INCOME_KEY_ITEMS};
use super::price::{PriceStats, price_stats};
use super::ratios::{Ratio, RatioBundle, compute_ratios_checked};
use super::{CompanySnapshot, StatementTable};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const COMPARISON_NOTICE: &str = "Peer comparison is not available yet. It will arrive in a future update.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Full,
    Statements,
    Ratios,
    Price,
    Comparison,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 5] = [
        AnalysisMode::Full,
        AnalysisMode::Statements,
        AnalysisMode::Ratios,
        AnalysisMode::Price,
        AnalysisMode::Comparison,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AnalysisMode::Full => "full",
            AnalysisMode::Statements => "statements",
            AnalysisMode::Ratios => "ratios",
            AnalysisMode::Price => "price",
            AnalysisMode::Comparison => "comparison",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Full => "Full Analysis",
            AnalysisMode::Statements => "Financial Statements",
            AnalysisMode::Ratios => "Financial Ratios",
            AnalysisMode::Price => "Price Analysis",
            AnalysisMode::Comparison => "Peer Comparison",
        }
    }

    pub fn next(&self) -> AnalysisMode {
        let i = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> AnalysisMode {
        let i = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn shows_statements(&self) -> bool {
        matches!(self, AnalysisMode::Full | AnalysisMode::Statements)
    }

    pub fn shows_ratios(&self) -> bool {
        matches!(self, AnalysisMode::Full | AnalysisMode::Ratios)
    }

    pub fn shows_price(&self) -> bool {
        matches!(self, AnalysisMode::Full | AnalysisMode::Price)
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.key() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown analysis mode '{}' (expected one of: full, statements, ratios, price, comparison)",
                    s
                )
            })
    }
}

/// Header metrics shown above every mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyOverview {
    pub ticker: String,
    pub name: String,
    pub current_price: f64,
    pub market_cap: f64,
    /// `None` when absent or zero.
    pub forward_pe: Option<f64>,
    /// Percent; `None` when absent or zero.
    pub dividend_yield_pct: Option<f64>,
}

impl CompanyOverview {
    pub fn from_snapshot(snapshot: &CompanySnapshot) -> Self {
        let info = &snapshot.info;
        let nonzero = |v: Option<f64>| v.filter(|x| *x != 0.0 && !x.is_nan());
        Self {
            ticker: snapshot.ticker.clone(),
            name: info
                .text("longName")
                .map(str::to_string)
                .unwrap_or_else(|| snapshot.display_name.clone()),
            current_price: info.number_lenient("currentPrice").unwrap_or(0.0),
            market_cap: info.number_lenient("marketCap").unwrap_or(0.0),
            forward_pe: nonzero(info.number_lenient("forwardPE")),
            dividend_yield_pct: nonzero(info.number_lenient("dividendYield")).map(|y| y * 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementsSection {
    /// Key income items present in the statement; `None` only when the statement is empty.
    pub income: Option<StatementTable>,
    pub balance: Option<StatementTable>,
    /// Every cash flow item the provider reported.
    pub cash_flow: Option<StatementTable>,
    pub revenue_chart: Option<ChartSpec>,
    pub profit_chart: Option<ChartSpec>,
    pub balance_chart: Option<ChartSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatiosSection {
    pub bundle: RatioBundle,
    /// Only assessed when the bundle is populated.
    pub health: Option<HealthAssessment>,
}

impl RatiosSection {
    pub fn roe_pct(&self) -> f64 {
        self.bundle.value_or_zero(Ratio::Roe) * 100.0
    }

    pub fn roa_pct(&self) -> f64 {
        self.bundle.value_or_zero(Ratio::Roa) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSection {
    pub chart: Option<ChartSpec>,
    pub stats: Option<PriceStats>,
}

/// Everything the UI needs to render one ticker in one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub mode: AnalysisMode,
    pub overview: CompanyOverview,
    pub statements: Option<StatementsSection>,
    pub ratios: Option<RatiosSection>,
    pub price: Option<PriceSection>,
    pub comparison_notice: Option<&'static str>,
    /// Degraded computations worth telling the user about.
    pub warnings: Vec<String>,
}

/// Key items of a non-empty statement; may hold no rows when the provider
/// reported none of them.
fn key_items(table: &StatementTable, items: &[&str]) -> Option<StatementTable> {
    (!table.is_empty()).then(|| table.subset(items))
}

fn statements_section(snapshot: &CompanySnapshot) -> StatementsSection {
    StatementsSection {
        income: key_items(&snapshot.income_statement, INCOME_KEY_ITEMS),
        balance: key_items(&snapshot.balance_sheet, BALANCE_KEY_ITEMS),
        cash_flow: (!snapshot.cash_flow.is_empty()).then(|| snapshot.cash_flow.clone()),
        revenue_chart: charts::revenue_chart(&snapshot.income_statement),
        profit_chart: charts::profit_chart(&snapshot.income_statement),
        balance_chart: charts::balance_sheet_chart(&snapshot.balance_sheet),
    }
}

fn ratios_section(snapshot: &CompanySnapshot, warnings: &mut Vec<String>) -> RatiosSection {
    let (bundle, error) = compute_ratios_checked(snapshot);
    if let Some(e) = error {
        warnings.push(format!("Ratio calculation error: {}", e));
    }
    let health = (!bundle.is_empty()).then(|| assess_health(&bundle));
    RatiosSection { bundle, health }
}

fn price_section(snapshot: &CompanySnapshot) -> PriceSection {
    PriceSection {
        chart: charts::price_chart(&snapshot.price_history),
        stats: price_stats(&snapshot.price_history),
    }
}

/// Runs the sections `mode` asks for. Pure; never fails.
pub fn analyze(snapshot: &CompanySnapshot, mode: AnalysisMode) -> AnalysisReport {
    let mut warnings = Vec::new();
    let overview = CompanyOverview::from_snapshot(snapshot);

    let statements = mode.shows_statements().then(|| statements_section(snapshot));
    let ratios = mode
        .shows_ratios()
        .then(|| ratios_section(snapshot, &mut warnings));
    let price = mode.shows_price().then(|| price_section(snapshot));
    let comparison_notice = (mode == AnalysisMode::Comparison).then_some(COMPARISON_NOTICE);

    AnalysisReport {
        mode,
        overview,
        statements,
        ratios,
        price,
        comparison_notice,
        warnings,
    }
}
