pub mod yahoo;

pub use yahoo::YahooClient;

use crate::analysis::CompanySnapshot;
use anyhow::Result;
use async_trait::async_trait;

/// Source of company fundamentals and price history.
#[async_trait]
pub trait MarketDataProvider: Send {
    async fn fetch(&mut self, ticker: &str) -> Result<CompanySnapshot>;
}
