use super::MarketDataProvider;
use crate::analysis::line_items::*;
use crate::analysis::{CompanyInfo, CompanySnapshot, InfoValue, PriceBar, StatementTable};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, cookie::Jar};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

const YAHOO_BASE_URL: &str = "https://finance.yahoo.com";
const YAHOO_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const SUMMARY_MODULES: &str = "price,summaryDetail,defaultKeyStatistics,financialData,incomeStatementHistory,balanceSheetHistory,cashflowStatementHistory";

/// (module, wire field, info key). Earlier entries win when a key repeats.
const INFO_FIELDS: &[(&str, &str, &str)] = &[
    ("price", "longName", "longName"),
    ("price", "marketCap", "marketCap"),
    ("financialData", "currentPrice", "currentPrice"),
    ("price", "regularMarketPrice", "currentPrice"),
    ("summaryDetail", "marketCap", "marketCap"),
    ("summaryDetail", "forwardPE", "forwardPE"),
    ("defaultKeyStatistics", "forwardPE", "forwardPE"),
    ("summaryDetail", "trailingPE", "trailingPE"),
    ("summaryDetail", "dividendYield", "dividendYield"),
    ("defaultKeyStatistics", "priceToBook", "priceToBook"),
    ("financialData", "returnOnEquity", "returnOnEquity"),
    ("financialData", "returnOnAssets", "returnOnAssets"),
];

const INCOME_ITEMS: &[(&str, &str)] = &[
    ("totalRevenue", TOTAL_REVENUE),
    ("costOfRevenue", "Cost Of Revenue"),
    ("grossProfit", GROSS_PROFIT),
    ("operatingIncome", OPERATING_INCOME),
    ("incomeBeforeTax", "Income Before Tax"),
    ("netIncome", NET_INCOME),
];

const BALANCE_ITEMS: &[(&str, &str)] = &[
    ("totalAssets", TOTAL_ASSETS),
    ("totalCurrentAssets", TOTAL_CURRENT_ASSETS),
    ("cash", "Cash"),
    ("totalLiab", "Total Liabilities"),
    ("totalCurrentLiabilities", "Total Current Liabilities"),
    ("totalStockholderEquity", TOTAL_STOCKHOLDER_EQUITY),
];

/// Summed into the "Total Debt" row.
const DEBT_ITEMS: &[&str] = &["shortLongTermDebt", "longTermDebt"];

const CASHFLOW_ITEMS: &[(&str, &str)] = &[
    ("totalCashFromOperatingActivities", "Operating Cash Flow"),
    ("capitalExpenditures", "Capital Expenditure"),
    ("dividendsPaid", "Dividends Paid"),
];

// quoteSummary response structures
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<SummaryModules>>,
    error: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryModules {
    #[serde(default)]
    price: Option<Map<String, Value>>,
    #[serde(default)]
    summary_detail: Option<Map<String, Value>>,
    #[serde(default)]
    default_key_statistics: Option<Map<String, Value>>,
    #[serde(default)]
    financial_data: Option<Map<String, Value>>,
    #[serde(default)]
    income_statement_history: Option<IncomeHistory>,
    #[serde(default)]
    balance_sheet_history: Option<BalanceHistory>,
    #[serde(default)]
    cashflow_statement_history: Option<CashflowHistory>,
}

impl SummaryModules {
    fn module(&self, name: &str) -> Option<&Map<String, Value>> {
        match name {
            "price" => self.price.as_ref(),
            "summaryDetail" => self.summary_detail.as_ref(),
            "defaultKeyStatistics" => self.default_key_statistics.as_ref(),
            "financialData" => self.financial_data.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IncomeHistory {
    #[serde(rename = "incomeStatementHistory", default)]
    statements: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct BalanceHistory {
    #[serde(rename = "balanceSheetStatements", default)]
    statements: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct CashflowHistory {
    #[serde(rename = "cashflowStatements", default)]
    statements: Vec<Map<String, Value>>,
}

// Chart API response structures
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartResultItem>>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResultItem {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Yahoo wraps most numbers as `{"raw": 1.0, "fmt": "1.00"}`; `{}` means missing.
fn wire_scalar(value: &Value) -> Option<InfoValue> {
    match value {
        Value::Object(map) => map.get("raw").and_then(wire_scalar),
        Value::Number(n) => n.as_f64().map(InfoValue::Number),
        Value::String(s) => Some(
            s.parse::<f64>()
                .map(InfoValue::Number)
                .unwrap_or_else(|_| InfoValue::Text(s.clone())),
        ),
        Value::Bool(b) => Some(InfoValue::Flag(*b)),
        _ => None,
    }
}

fn wire_number(value: &Value) -> Option<f64> {
    wire_scalar(value).and_then(|v| v.as_number())
}

fn period_label(statement: &Map<String, Value>) -> String {
    let end_date = statement.get("endDate");
    if let Some(fmt) = end_date.and_then(|d| d.get("fmt")).and_then(Value::as_str) {
        return fmt.to_string();
    }
    end_date
        .and_then(wire_number)
        .and_then(|ts| chrono::DateTime::from_timestamp(ts as i64, 0))
        .map(|dt| dt.date_naive().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn build_statement(statements: &[Map<String, Value>], items: &[(&str, &str)]) -> StatementTable {
    let mut table = StatementTable::new(statements.iter().map(period_label).collect());
    for (wire, label) in items {
        if !statements.iter().any(|s| s.contains_key(*wire)) {
            continue;
        }
        let cells = statements
            .iter()
            .map(|s| s.get(*wire).and_then(wire_number))
            .collect();
        table.push_row(label, cells);
    }
    table
}

fn build_balance_sheet(statements: &[Map<String, Value>]) -> StatementTable {
    let mut table = build_statement(statements, BALANCE_ITEMS);
    if statements
        .iter()
        .any(|s| DEBT_ITEMS.iter().any(|k| s.contains_key(*k)))
    {
        let cells = statements
            .iter()
            .map(|s| {
                let parts: Vec<f64> = DEBT_ITEMS
                    .iter()
                    .filter_map(|k| s.get(*k).and_then(wire_number))
                    .collect();
                (!parts.is_empty()).then(|| parts.iter().sum::<f64>())
            })
            .collect();
        table.push_row(TOTAL_DEBT, cells);
    }
    table
}

struct SummaryParts {
    info: CompanyInfo,
    income_statement: StatementTable,
    balance_sheet: StatementTable,
    cash_flow: StatementTable,
}

pub struct YahooClient {
    client: Client,
    crumb: Option<String>,
    history_range: String,
    history_interval: String,
}

impl YahooClient {
    pub fn new() -> Result<Self> {
        Self::with_history("1y", "1d")
    }

    pub fn with_history(range: &str, interval: &str) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_store(true)
            .cookie_provider(jar)
            .build()?;

        Ok(Self {
            client,
            crumb: None,
            history_range: range.to_string(),
            history_interval: interval.to_string(),
        })
    }

    /// Fetch crumb and cookies from Yahoo Finance
    async fn fetch_crumb(&mut self) -> Result<String> {
        let response = self
            .client
            .get(YAHOO_BASE_URL)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await?;

        let html = response.text().await?;
        let crumb = Self::extract_crumb(&html)?;
        tracing::debug!("obtained Yahoo crumb");
        self.crumb = Some(crumb.clone());
        Ok(crumb)
    }

    pub fn extract_crumb(html: &str) -> Result<String> {
        for pattern in ["\"crumb\":\"", "\"CrumbStore\":{\"crumb\":\""] {
            if let Some(start) = html.find(pattern) {
                let start = start + pattern.len();
                if let Some(end) = html[start..].find('"') {
                    let crumb = &html[start..start + end];
                    if !crumb.is_empty() {
                        return Ok(crumb.to_string());
                    }
                }
            }
        }

        Err(anyhow!("Could not extract crumb from Yahoo Finance"))
    }

    /// `Ok(None)` when Yahoo rejects the crumb.
    async fn get_summary_body(&self, symbol: &str, crumb: &str) -> Result<Option<String>> {
        let url = format!("{}/{}", YAHOO_SUMMARY_URL, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("modules", SUMMARY_MODULES), ("crumb", crumb)])
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .header("Referer", "https://finance.yahoo.com/")
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow!("Yahoo API error: {}", response.status()));
        }
        Ok(Some(response.text().await?))
    }

    async fn get_chart_body(&self, symbol: &str) -> Result<String> {
        let url = format!("{}/{}", YAHOO_CHART_URL, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("interval", self.history_interval.as_str()),
                ("range", self.history_range.as_str()),
            ])
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("Chart API error: {}", response.status()));
        }
        Ok(response.text().await?)
    }

    fn parse_summary(body: &str) -> Result<SummaryParts> {
        let data: SummaryResponse = serde_json::from_str(body)?;
        if let Some(err) = data.quote_summary.error.filter(|e| !e.is_null()) {
            return Err(anyhow!("Yahoo API error: {}", err));
        }
        let modules = data
            .quote_summary
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| anyhow!("No fundamentals data found"))?;

        let mut info = CompanyInfo::new();
        for (module, wire, key) in INFO_FIELDS {
            if info.contains(key) {
                continue;
            }
            if let Some(value) = modules
                .module(module)
                .and_then(|m| m.get(*wire))
                .and_then(wire_scalar)
            {
                info.insert(*key, value);
            }
        }

        let income = modules
            .income_statement_history
            .map(|h| h.statements)
            .unwrap_or_default();
        let balance = modules
            .balance_sheet_history
            .map(|h| h.statements)
            .unwrap_or_default();
        let cash_flow = modules
            .cashflow_statement_history
            .map(|h| h.statements)
            .unwrap_or_default();

        Ok(SummaryParts {
            info,
            income_statement: build_statement(&income, INCOME_ITEMS),
            balance_sheet: build_balance_sheet(&balance),
            cash_flow: build_statement(&cash_flow, CASHFLOW_ITEMS),
        })
    }

    /// Daily bars in chronological order; bars with any missing OHLC field are skipped.
    pub fn parse_chart(body: &str) -> Result<Vec<PriceBar>> {
        let data: ChartResponse = serde_json::from_str(body)?;
        if let Some(err) = data.chart.error.filter(|e| !e.is_null()) {
            return Err(anyhow!("Chart API error: {}", err));
        }
        let result = data
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| anyhow!("No chart data found"))?;
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let bars = result
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, ts)| {
                let date = chrono::DateTime::from_timestamp(*ts, 0)?.date_naive();
                Some(PriceBar {
                    date,
                    open: quote.open.get(i).copied().flatten()?,
                    high: quote.high.get(i).copied().flatten()?,
                    low: quote.low.get(i).copied().flatten()?,
                    close: quote.close.get(i).copied().flatten()?,
                    volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
                })
            })
            .collect();
        Ok(bars)
    }

    /// Builds a snapshot from raw quoteSummary and chart response bodies.
    pub fn snapshot_from_wire(
        ticker: &str,
        display_name: &str,
        summary_body: &str,
        chart_body: &str,
    ) -> Result<CompanySnapshot> {
        let parts = Self::parse_summary(summary_body)?;
        let price_history = Self::parse_chart(chart_body)?;
        Ok(CompanySnapshot {
            ticker: ticker.to_string(),
            display_name: display_name.to_string(),
            info: parts.info,
            income_statement: parts.income_statement,
            balance_sheet: parts.balance_sheet,
            cash_flow: parts.cash_flow,
            price_history,
        })
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn fetch(&mut self, ticker: &str) -> Result<CompanySnapshot> {
        let symbol = ticker.trim().to_uppercase();
        let crumb = match &self.crumb {
            Some(c) => c.clone(),
            None => self.fetch_crumb().await?,
        };

        let (summary, chart_body) = futures::try_join!(
            self.get_summary_body(&symbol, &crumb),
            self.get_chart_body(&symbol)
        )?;

        // If unauthorized, refresh the crumb once and retry the fundamentals.
        let summary_body = match summary {
            Some(body) => body,
            None => {
                self.crumb = None;
                let new_crumb = self.fetch_crumb().await?;
                self.get_summary_body(&symbol, &new_crumb)
                    .await?
                    .ok_or_else(|| anyhow!("Yahoo API error: {}", StatusCode::UNAUTHORIZED))?
            }
        };

        let display_name = crate::catalog::display_name(&symbol)
            .map(str::to_string)
            .unwrap_or_else(|| symbol.clone());
        Self::snapshot_from_wire(&symbol, &display_name, &summary_body, &chart_body)
    }
}
