use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use snp_cli::analysis::AnalysisMode;
use snp_cli::app::{App, InputMode};
use snp_cli::config::Config;
use snp_cli::ui;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snp-cli")]
#[command(about = "Terminal UI for S&P 500 financial statement analysis", long_about = None)]
struct Cli {
    /// Ticker to analyze on startup
    #[arg(short, long)]
    ticker: Option<String>,

    /// Initial analysis mode: full, statements, ratios, price, comparison
    #[arg(short, long)]
    mode: Option<AnalysisMode>,

    /// Log file (defaults to snp-cli.log in the config directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path, default_filter: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(ticker) = cli.ticker {
        config.default_ticker = ticker;
        config.normalize();
    }
    if let Some(mode) = cli.mode {
        config.default_mode = mode;
    }

    let log_path = match cli.log_file {
        Some(path) => path,
        None => Config::default_log_path()?,
    };
    init_logging(&log_path, &config.log_filter)?;
    tracing::info!(ticker = %config.default_ticker, mode = config.default_mode.key(), "starting");

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "terminal loop failed");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// Shows the `Fetching` frame before blocking on the provider.
async fn analyze_selection<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| ui::draw(frame, app))?;
    app.complete_fetch().await;
    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let initial = app.config.default_ticker.clone();
    app.select_ticker(&initial);
    analyze_selection(terminal, app).await?;

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // 100ms timeout keeps the clock ticking
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('?') => app.show_help(),
                KeyCode::Char('/') => app.start_search(),
                KeyCode::Esc => app.clear_filter(),
                KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                KeyCode::Enter => {
                    if app.select_highlighted() {
                        analyze_selection(terminal, app).await?;
                    }
                }
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_mode(),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_mode(),
                KeyCode::Char(c @ '1'..='5') => {
                    let index = c as usize - '1' as usize;
                    if let Some(mode) = AnalysisMode::ALL.get(index) {
                        app.set_mode(*mode);
                    }
                }
                KeyCode::PageDown => app.scroll_report_down(),
                KeyCode::PageUp => app.scroll_report_up(),
                _ => {}
            },
            InputMode::Help => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => app.close_help(),
                _ => {}
            },
            InputMode::Search => match key.code {
                KeyCode::Enter => app.confirm_search(),
                KeyCode::Esc => app.cancel_search(),
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                KeyCode::Char(c) => {
                    app.input_buffer.push(c);
                }
                _ => {}
            },
        }
    }
}
