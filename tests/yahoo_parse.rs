use chrono::NaiveDate;
use snp_cli::analysis::line_items::*;
use snp_cli::analysis::{InfoValue, Ratio, compute_ratios};
use snp_cli::api::YahooClient;

const SUMMARY: &str = r#"{
  "quoteSummary": {
    "result": [{
      "price": {
        "longName": "Apple Inc.",
        "shortName": "Apple",
        "marketCap": {"raw": 2900000000000, "fmt": "2.9T"},
        "regularMarketPrice": {"raw": 189.5, "fmt": "189.50"}
      },
      "summaryDetail": {
        "forwardPE": {"raw": 28.4, "fmt": "28.40"},
        "trailingPE": {"raw": 30.1, "fmt": "30.10"},
        "dividendYield": {"raw": 0.005, "fmt": "0.50%"}
      },
      "defaultKeyStatistics": {"priceToBook": {"raw": 45.0}},
      "financialData": {
        "currentPrice": {"raw": 190.0},
        "totalDebt": {"raw": 111088000000},
        "returnOnEquity": {"raw": 1.5},
        "returnOnAssets": {"raw": 0.2}
      },
      "incomeStatementHistory": {
        "incomeStatementHistory": [
          {
            "endDate": {"raw": 1696032000, "fmt": "2023-09-30"},
            "totalRevenue": {"raw": 383285000000},
            "grossProfit": {"raw": 169148000000},
            "netIncome": {"raw": 96995000000}
          },
          {
            "endDate": {"raw": 1664496000, "fmt": "2022-09-24"},
            "totalRevenue": {"raw": 394328000000},
            "grossProfit": {},
            "netIncome": {"raw": 99803000000}
          }
        ]
      },
      "balanceSheetHistory": {
        "balanceSheetStatements": [
          {
            "endDate": {"raw": 1696032000},
            "totalAssets": {"raw": 352583000000},
            "totalCurrentAssets": {"raw": 143566000000},
            "totalStockholderEquity": {"raw": 62146000000},
            "shortLongTermDebt": {"raw": 9822000000},
            "longTermDebt": {"raw": 95281000000}
          }
        ]
      },
      "cashflowStatementHistory": {
        "cashflowStatements": [
          {
            "endDate": {"raw": 1696032000, "fmt": "2023-09-30"},
            "totalCashFromOperatingActivities": {"raw": 110543000000},
            "capitalExpenditures": {"raw": -10959000000},
            "dividendsPaid": {"raw": -15025000000},
            "changeInCash": {"raw": 5760000000}
          },
          {
            "endDate": {"raw": 1664496000, "fmt": "2022-09-24"},
            "totalCashFromOperatingActivities": {"raw": 122151000000},
            "capitalExpenditures": {"raw": -10708000000}
          }
        ]
      }
    }],
    "error": null
  }
}"#;

const CHART: &str = r#"{
  "chart": {
    "result": [{
      "timestamp": [1704205800, 1704292200, 1704378600],
      "indicators": {
        "quote": [{
          "open": [187.15, 184.22, null],
          "high": [188.44, 185.88, 183.0],
          "low": [183.89, 183.43, 180.9],
          "close": [185.64, 184.25, 181.91],
          "volume": [82488700, 58414500, 71983600]
        }]
      }
    }],
    "error": null
  }
}"#;

#[test]
fn test_snapshot_info_fields() {
    let snapshot = YahooClient::snapshot_from_wire("AAPL", "Apple Inc.", SUMMARY, CHART).unwrap();
    assert_eq!(snapshot.ticker, "AAPL");
    assert_eq!(snapshot.info.text("longName"), Some("Apple Inc."));
    assert_eq!(snapshot.info.get("marketCap"), Some(&InfoValue::Number(2.9e12)));
    // financialData wins over the quote price
    assert_eq!(snapshot.info.number_lenient("currentPrice"), Some(190.0));
    assert_eq!(snapshot.info.number_lenient("forwardPE"), Some(28.4));
    assert_eq!(snapshot.info.number_lenient("priceToBook"), Some(45.0));
}

#[test]
fn test_snapshot_income_statement() {
    let snapshot = YahooClient::snapshot_from_wire("AAPL", "Apple Inc.", SUMMARY, CHART).unwrap();
    let income = &snapshot.income_statement;
    assert_eq!(income.periods(), &["2023-09-30".to_string(), "2022-09-24".to_string()]);
    assert_eq!(income.latest_or(TOTAL_REVENUE, 0.0), Some(383_285_000_000.0));
    assert_eq!(income.row(GROSS_PROFIT), Some(&[Some(169_148_000_000.0), None][..]));
    assert!(!income.contains(OPERATING_INCOME));
}

#[test]
fn test_snapshot_balance_sheet_sums_debt() {
    let snapshot = YahooClient::snapshot_from_wire("AAPL", "Apple Inc.", SUMMARY, CHART).unwrap();
    let balance = &snapshot.balance_sheet;
    // Period label falls back to the timestamp
    assert_eq!(balance.periods(), &["2023-09-30".to_string()]);
    assert_eq!(balance.latest_or(TOTAL_DEBT, 0.0), Some(105_103_000_000.0));
}

#[test]
fn test_snapshot_cash_flow_rows() {
    let snapshot = YahooClient::snapshot_from_wire("AAPL", "Apple Inc.", SUMMARY, CHART).unwrap();
    let cash_flow = &snapshot.cash_flow;
    assert_eq!(cash_flow.periods(), &["2023-09-30".to_string(), "2022-09-24".to_string()]);
    assert_eq!(
        cash_flow.line_items().collect::<Vec<_>>(),
        vec!["Operating Cash Flow", "Capital Expenditure", "Dividends Paid"]
    );
    assert_eq!(
        cash_flow.row("Operating Cash Flow"),
        Some(&[Some(110_543_000_000.0), Some(122_151_000_000.0)][..])
    );
    assert_eq!(cash_flow.latest_or("Capital Expenditure", 0.0), Some(-10_959_000_000.0));
    // Reported for one period only
    assert_eq!(cash_flow.row("Dividends Paid"), Some(&[Some(-15_025_000_000.0), None][..]));
}

#[test]
fn test_snapshot_without_cash_flow_module() {
    let summary = SUMMARY.replace("cashflowStatementHistory", "unusedModule");
    let snapshot = YahooClient::snapshot_from_wire("AAPL", "Apple Inc.", &summary, CHART).unwrap();
    assert!(snapshot.cash_flow.is_empty());
}

#[test]
fn test_snapshot_info_keeps_only_used_fields() {
    let snapshot = YahooClient::snapshot_from_wire("AAPL", "Apple Inc.", SUMMARY, CHART).unwrap();
    assert!(!snapshot.info.contains("shortName"));
    assert!(!snapshot.info.contains("totalDebt"));
    assert!(snapshot.info.contains("returnOnEquity"));
}

#[test]
fn test_snapshot_price_history_skips_incomplete_bars() {
    let snapshot = YahooClient::snapshot_from_wire("AAPL", "Apple Inc.", SUMMARY, CHART).unwrap();
    let history = &snapshot.price_history;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    assert_eq!(history[1].close, 184.25);
    assert_eq!(history[0].volume, 82_488_700);
}

#[test]
fn test_snapshot_feeds_ratios() {
    let snapshot = YahooClient::snapshot_from_wire("AAPL", "Apple Inc.", SUMMARY, CHART).unwrap();
    let bundle = compute_ratios(&snapshot);
    let gross = bundle.get(Ratio::GrossMargin).unwrap();
    assert!((gross - 44.13).abs() < 0.01);
    assert!(bundle.get(Ratio::DebtToEquity).unwrap() > 1.0);
}

#[test]
fn test_summary_error_is_reported() {
    let body = r#"{"quoteSummary": {"result": null, "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}}}"#;
    let err = YahooClient::snapshot_from_wire("ZZZZ", "ZZZZ", body, CHART).unwrap_err();
    assert!(err.to_string().contains("Not Found"));
}

#[test]
fn test_chart_error_is_reported() {
    let body = r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#;
    assert!(YahooClient::parse_chart(body).is_err());
}

#[test]
fn test_malformed_body_is_error() {
    assert!(YahooClient::snapshot_from_wire("AAPL", "Apple Inc.", "<html>", CHART).is_err());
}

#[test]
fn test_extract_crumb() {
    let html = r#"<script>window.data = {"user":{"crumb":"Ab3xYz.9"}};</script>"#;
    assert_eq!(YahooClient::extract_crumb(html).unwrap(), "Ab3xYz.9");
}

#[test]
fn test_extract_crumb_store() {
    let html = r#"{"CrumbStore":{"crumb":"q1w2e3"}}"#;
    assert_eq!(YahooClient::extract_crumb(html).unwrap(), "q1w2e3");
}

#[test]
fn test_extract_crumb_missing() {
    assert!(YahooClient::extract_crumb("<html></html>").is_err());
    assert!(YahooClient::extract_crumb(r#"{"crumb":""}"#).is_err());
}

#[test]
fn test_client_builds_without_network() {
    assert!(YahooClient::new().is_ok());
    assert!(YahooClient::with_history("2y", "1wk").is_ok());
}
