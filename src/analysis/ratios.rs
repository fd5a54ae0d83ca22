use super::line_items::*;
use super::{AnalysisError, CompanySnapshot};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ratio {
    MarketCap,
    PeRatio,
    PbRatio,
    DividendYield,
    Roe,
    Roa,
    Revenue,
    NetIncome,
    GrossProfit,
    GrossMargin,
    NetMargin,
    TotalAssets,
    TotalDebt,
    TotalEquity,
    DebtToEquity,
}

impl Ratio {
    pub const ALL: [Ratio; 15] = [
        Ratio::MarketCap,
        Ratio::PeRatio,
        Ratio::PbRatio,
        Ratio::DividendYield,
        Ratio::Roe,
        Ratio::Roa,
        Ratio::Revenue,
        Ratio::NetIncome,
        Ratio::GrossProfit,
        Ratio::GrossMargin,
        Ratio::NetMargin,
        Ratio::TotalAssets,
        Ratio::TotalDebt,
        Ratio::TotalEquity,
        Ratio::DebtToEquity,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Ratio::MarketCap => "market_cap",
            Ratio::PeRatio => "pe_ratio",
            Ratio::PbRatio => "pb_ratio",
            Ratio::DividendYield => "dividend_yield",
            Ratio::Roe => "roe",
            Ratio::Roa => "roa",
            Ratio::Revenue => "revenue",
            Ratio::NetIncome => "net_income",
            Ratio::GrossProfit => "gross_profit",
            Ratio::GrossMargin => "gross_margin",
            Ratio::NetMargin => "net_margin",
            Ratio::TotalAssets => "total_assets",
            Ratio::TotalDebt => "total_debt",
            Ratio::TotalEquity => "total_equity",
            Ratio::DebtToEquity => "debt_to_equity",
        }
    }

    pub fn from_key(key: &str) -> Option<Ratio> {
        Ratio::ALL.iter().copied().find(|r| r.key() == key)
    }
}

/// Named ratios for one company. `None` is the "unavailable" marker.
///
/// A computed bundle carries every key; the empty bundle (malformed payload)
/// carries none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioBundle {
    values: BTreeMap<Ratio, Option<f64>>,
}

impl RatioBundle {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, ratio: Ratio) -> bool {
        self.values.contains_key(&ratio)
    }

    pub fn get(&self, ratio: Ratio) -> Option<f64> {
        self.values.get(&ratio).copied().flatten()
    }

    /// Value with unavailable and absent entries read as 0.
    pub fn value_or_zero(&self, ratio: Ratio) -> f64 {
        self.get(ratio).unwrap_or(0.0)
    }

    pub fn set(&mut self, ratio: Ratio, value: Option<f64>) {
        self.values.insert(ratio, value.filter(|v| !v.is_nan()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ratio, Option<f64>)> + '_ {
        self.values.iter().map(|(r, v)| (*r, *v))
    }
}

/// Guarded percentage: `numerator / denominator * 100` when the denominator is
/// positive, otherwise 0.
fn margin(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match denominator {
        Some(d) if d > 0.0 => numerator.map(|n| n / d * 100.0),
        _ => Some(0.0),
    }
}

fn quotient(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match denominator {
        Some(d) if d > 0.0 => numerator.map(|n| n / d),
        _ => Some(0.0),
    }
}

pub fn try_compute_ratios(snapshot: &CompanySnapshot) -> Result<RatioBundle, AnalysisError> {
    let info = &snapshot.info;
    let mut bundle = RatioBundle::empty();

    bundle.set(Ratio::MarketCap, Some(info.number_or("marketCap", 0.0)?));
    let pe = match info.number("forwardPE")? {
        Some(v) => v,
        None => info.number_or("trailingPE", 0.0)?,
    };
    bundle.set(Ratio::PeRatio, Some(pe));
    bundle.set(Ratio::PbRatio, Some(info.number_or("priceToBook", 0.0)?));
    bundle.set(Ratio::DividendYield, Some(info.number_or("dividendYield", 0.0)?));
    bundle.set(Ratio::Roe, Some(info.number_or("returnOnEquity", 0.0)?));
    bundle.set(Ratio::Roa, Some(info.number_or("returnOnAssets", 0.0)?));

    let income = &snapshot.income_statement;
    let (revenue, net_income, gross_profit) = if income.is_empty() {
        (Some(0.0), Some(0.0), Some(0.0))
    } else {
        (
            income.latest_or(TOTAL_REVENUE, 0.0),
            income.latest_or(NET_INCOME, 0.0),
            income.latest_or(GROSS_PROFIT, 0.0),
        )
    };
    bundle.set(Ratio::Revenue, revenue);
    bundle.set(Ratio::NetIncome, net_income);
    bundle.set(Ratio::GrossProfit, gross_profit);
    bundle.set(Ratio::GrossMargin, margin(gross_profit, revenue));
    bundle.set(Ratio::NetMargin, margin(net_income, revenue));

    let balance = &snapshot.balance_sheet;
    let (total_assets, total_debt, total_equity) = if balance.is_empty() {
        (Some(0.0), Some(0.0), Some(0.0))
    } else {
        (
            balance.latest_or(TOTAL_ASSETS, 0.0),
            balance.latest_or(TOTAL_DEBT, 0.0),
            balance.latest_or(TOTAL_STOCKHOLDER_EQUITY, 0.0),
        )
    };
    bundle.set(Ratio::TotalAssets, total_assets);
    bundle.set(Ratio::TotalDebt, total_debt);
    bundle.set(Ratio::TotalEquity, total_equity);
    bundle.set(Ratio::DebtToEquity, quotient(total_debt, total_equity));

    Ok(bundle)
}

/// Computes the ratio bundle, degrading to the empty bundle on a malformed
/// payload. The error is logged and handed back alongside the bundle.
pub fn compute_ratios_checked(snapshot: &CompanySnapshot) -> (RatioBundle, Option<AnalysisError>) {
    match try_compute_ratios(snapshot) {
        Ok(bundle) => (bundle, None),
        Err(e) => {
            tracing::warn!(ticker = %snapshot.ticker, error = %e, "ratio computation failed");
            (RatioBundle::empty(), Some(e))
        }
    }
}

pub fn compute_ratios(snapshot: &CompanySnapshot) -> RatioBundle {
    compute_ratios_checked(snapshot).0
}
