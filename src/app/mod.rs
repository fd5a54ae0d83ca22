mod cache;
mod filter;

pub use cache::SnapshotCache;

use crate::analysis::{AnalysisMode, AnalysisReport, CompanySnapshot, analyze};
use crate::api::{MarketDataProvider, YahooClient};
use crate::catalog;
use crate::config::Config;
use crate::ui;
use anyhow::Result;
use chrono::Local;
use std::sync::Arc;

const SCROLL_STEP: u16 = 3;
// Report row count does not depend on the render width.
const LAYOUT_WIDTH: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
    Search,
}

/// Lifecycle of one analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverState {
    Idle,
    Fetching { ticker: String },
    Ready { snapshot: Arc<CompanySnapshot> },
    Failed { ticker: String, message: String },
}

impl DriverState {
    pub fn label(&self) -> &'static str {
        match self {
            DriverState::Idle => "idle",
            DriverState::Fetching { .. } => "fetching",
            DriverState::Ready { .. } => "ready",
            DriverState::Failed { .. } => "failed",
        }
    }
}

pub struct App {
    pub config: Config,
    pub state: DriverState,
    pub mode: AnalysisMode,
    pub report: Option<AnalysisReport>,
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub status_message: Option<String>,
    pub last_updated: Option<String>,
    pub search_query: String,
    pub search_active: bool,
    pub report_scroll: u16,
    report_line_count: usize,
    cache: SnapshotCache,
    provider: Box<dyn MarketDataProvider>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = YahooClient::with_history(&config.history_range, &config.history_interval)?;
        Ok(Self::with_provider(config, Box::new(client)))
    }

    pub fn with_provider(config: Config, provider: Box<dyn MarketDataProvider>) -> Self {
        let selected_index = catalog::position(&config.default_ticker).unwrap_or(0);
        Self {
            mode: config.default_mode,
            config,
            state: DriverState::Idle,
            report: None,
            selected_index,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            status_message: None,
            last_updated: None,
            search_query: String::new(),
            search_active: false,
            report_scroll: 0,
            report_line_count: 0,
            cache: SnapshotCache::new(),
            provider,
        }
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DriverState::Fetching { .. })
    }

    /// Ticker of the current request, whatever its state.
    pub fn current_ticker(&self) -> Option<&str> {
        match &self.state {
            DriverState::Idle => None,
            DriverState::Fetching { ticker } | DriverState::Failed { ticker, .. } => Some(ticker.as_str()),
            DriverState::Ready { snapshot } => Some(snapshot.ticker.as_str()),
        }
    }

    /// Ticker selection event: enters `Fetching`. Call [`App::complete_fetch`]
    /// to resolve it.
    pub fn select_ticker(&mut self, ticker: &str) {
        let ticker = ticker.trim().to_uppercase();
        tracing::info!(%ticker, from = self.state.label(), "ticker selected");
        self.status_message = Some(format!("Loading {}...", ticker));
        self.report_scroll = 0;
        self.state = DriverState::Fetching { ticker };
    }

    /// Resolves a pending fetch through the memo store, then the provider.
    /// No-op outside `Fetching`.
    pub async fn complete_fetch(&mut self) {
        let ticker = match &self.state {
            DriverState::Fetching { ticker } => ticker.clone(),
            _ => return,
        };

        let snapshot = match self.cache.get(&ticker) {
            Some(snapshot) => {
                tracing::debug!(%ticker, "snapshot cache hit");
                snapshot
            }
            None => match self.provider.fetch(&ticker).await {
                Ok(snapshot) => {
                    tracing::info!(%ticker, bars = snapshot.price_history.len(), "snapshot fetched");
                    self.cache.insert(&ticker, snapshot)
                }
                Err(e) => {
                    tracing::error!(%ticker, error = %e, "provider fetch failed");
                    let message = format!("Could not load data for {}: {}", ticker, e);
                    self.status_message = Some(message.clone());
                    self.report = None;
                    self.report_line_count = 0;
                    self.state = DriverState::Failed { ticker, message };
                    return;
                }
            },
        };

        self.state = DriverState::Ready { snapshot };
        self.last_updated = Some(Local::now().format("%H:%M:%S").to_string());
        self.status_message = None;
        self.recompute();
    }

    pub async fn load_ticker(&mut self, ticker: &str) {
        self.select_ticker(ticker);
        self.complete_fetch().await;
    }

    /// Mode selection event. In `Ready` the report is rebuilt from the held
    /// snapshot without fetching.
    pub fn set_mode(&mut self, mode: AnalysisMode) {
        if self.mode == mode {
            return;
        }
        tracing::debug!(mode = mode.key(), "analysis mode changed");
        self.mode = mode;
        self.report_scroll = 0;
        self.recompute();
    }

    pub fn next_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    pub fn prev_mode(&mut self) {
        self.set_mode(self.mode.prev());
    }

    fn recompute(&mut self) {
        let DriverState::Ready { snapshot } = &self.state else {
            return;
        };
        let report = analyze(snapshot, self.mode);
        if let Some(warning) = report.warnings.first() {
            self.status_message = Some(warning.clone());
        }
        self.report_line_count = ui::report_lines(&report, LAYOUT_WIDTH).len();
        self.report = Some(report);
    }

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let len = self.get_filtered_catalog().len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_highlighted(&mut self) -> bool {
        match self.highlighted_ticker() {
            Some(ticker) => {
                self.select_ticker(ticker);
                true
            }
            None => false,
        }
    }

    /// Stops once the last report line reaches the top of the pane.
    pub fn scroll_report_down(&mut self) {
        let max = u16::try_from(self.report_line_count.saturating_sub(1)).unwrap_or(u16::MAX);
        self.report_scroll = self.report_scroll.saturating_add(SCROLL_STEP).min(max);
    }

    pub fn scroll_report_up(&mut self) {
        self.report_scroll = self.report_scroll.saturating_sub(SCROLL_STEP);
    }

    pub fn report_line_count(&self) -> usize {
        self.report_line_count
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn close_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
