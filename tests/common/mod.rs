#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use snp_cli::analysis::line_items::*;
use snp_cli::analysis::{CompanyInfo, CompanySnapshot, InfoValue, PriceBar, StatementTable};
use snp_cli::api::MarketDataProvider;
use snp_cli::app::App;
use snp_cli::config::Config;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn periods() -> Vec<String> {
    vec!["2023-09-30".to_string(), "2022-09-30".to_string()]
}

/// Two periods, most recent first.
pub fn make_income(revenue: f64, gross_profit: f64, net_income: f64) -> StatementTable {
    StatementTable::new(periods())
        .with_row(TOTAL_REVENUE, vec![Some(revenue), Some(revenue * 0.8)])
        .with_row(GROSS_PROFIT, vec![Some(gross_profit), Some(gross_profit * 0.8)])
        .with_row(NET_INCOME, vec![Some(net_income), Some(net_income * 0.8)])
}

pub fn make_balance(assets: f64, current_assets: f64, debt: f64, equity: f64) -> StatementTable {
    StatementTable::new(periods())
        .with_row(TOTAL_ASSETS, vec![Some(assets), Some(assets)])
        .with_row(TOTAL_CURRENT_ASSETS, vec![Some(current_assets), Some(current_assets)])
        .with_row(TOTAL_DEBT, vec![Some(debt), Some(debt)])
        .with_row(TOTAL_STOCKHOLDER_EQUITY, vec![Some(equity), Some(equity)])
}

pub fn make_bar(day: u32, open: f64, close: f64) -> PriceBar {
    PriceBar {
        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
        volume: 1_000_000,
    }
}

pub fn make_info() -> CompanyInfo {
    CompanyInfo::new()
        .with("longName", InfoValue::Text("Apple Inc.".to_string()))
        .with("currentPrice", InfoValue::Number(189.5))
        .with("marketCap", InfoValue::Number(2.9e12))
        .with("forwardPE", InfoValue::Number(28.4))
        .with("dividendYield", InfoValue::Number(0.005))
        .with("returnOnEquity", InfoValue::Number(0.25))
        .with("returnOnAssets", InfoValue::Number(0.12))
        .with("priceToBook", InfoValue::Number(45.0))
}

/// Revenue 100, gross profit 50, net income 20, debt 40, equity 80.
pub fn make_snapshot(ticker: &str) -> CompanySnapshot {
    let mut snapshot = CompanySnapshot::new(ticker, &format!("{} Corp", ticker));
    snapshot.info = make_info();
    snapshot.income_statement = make_income(100.0, 50.0, 20.0);
    snapshot.balance_sheet = make_balance(200.0, 60.0, 40.0, 80.0);
    snapshot.price_history = vec![
        make_bar(2, 100.0, 102.0),
        make_bar(3, 102.0, 101.0),
        make_bar(4, 101.0, 105.0),
        make_bar(5, 105.0, 110.0),
    ];
    snapshot
}

/// Provider that serves [`make_snapshot`] and counts calls.
pub struct FakeProvider {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
}

impl FakeProvider {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                fail: false,
            },
            calls,
        )
    }

    pub fn failing() -> (Self, Arc<AtomicUsize>) {
        let (mut provider, calls) = Self::new();
        provider.fail = true;
        (provider, calls)
    }
}

#[async_trait]
impl MarketDataProvider for FakeProvider {
    async fn fetch(&mut self, ticker: &str) -> anyhow::Result<CompanySnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("connection refused");
        }
        Ok(make_snapshot(ticker))
    }
}

// Creates an App backed by a fake provider (no network, no file I/O).
pub fn test_app() -> (App, Arc<AtomicUsize>) {
    let (provider, calls) = FakeProvider::new();
    (App::with_provider(Config::test_config(), Box::new(provider)), calls)
}

pub fn failing_app() -> (App, Arc<AtomicUsize>) {
    let (provider, calls) = FakeProvider::failing();
    (App::with_provider(Config::test_config(), Box::new(provider)), calls)
}

pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
