use super::charts::render_chart;
use super::formatters::*;
use crate::analysis::health::{HealthAssessment, MAX_SCORE, Rating, Tone};
use crate::analysis::report::{CompanyOverview, PriceSection, RatiosSection, StatementsSection};
use crate::analysis::{AnalysisReport, Ratio, StatementTable};
use crate::app::{App, DriverState};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const ITEM_WIDTH: usize = 26;
const CELL_WIDTH: usize = 12;

fn section_divider<'a>(title: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("─── {} ", title), Style::default().fg(Color::Yellow)),
        Span::styled("───────────────────────────", Style::default().fg(Color::DarkGray)),
    ])
}

fn metric<'a>(label: &str, value: String, color: Color) -> Vec<Span<'a>> {
    vec![
        Span::raw(format!("{:<16}", label)),
        Span::styled(format!("{:<16}", value), Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]
}

fn overview_lines(overview: &CompanyOverview) -> Vec<Line<'static>> {
    let mut first = metric("Current Price:", format_price(overview.current_price), Color::Cyan);
    first.extend(metric("Market Cap:", format_currency(overview.market_cap), Color::Cyan));
    let mut second = metric("Forward P/E:", format_multiple(overview.forward_pe), Color::White);
    second.extend(metric(
        "Dividend Yield:",
        format_optional_percent(overview.dividend_yield_pct),
        Color::White,
    ));
    vec![
        Line::from(Span::styled(
            format!("{} ({})", overview.name, overview.ticker),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(first),
        Line::from(second),
        Line::from(""),
    ]
}

fn statement_lines(title: &str, table: Option<&StatementTable>) -> Vec<Line<'static>> {
    let mut lines = vec![section_divider(title)];
    let Some(table) = table else {
        lines.push(Line::from(Span::styled(
            format!("{} not available", title),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
        return lines;
    };

    let mut header = format!("{:<width$}", "", width = ITEM_WIDTH);
    for period in table.periods() {
        header.push_str(&format!("{:>width$}", period, width = CELL_WIDTH));
    }
    lines.push(Line::from(Span::styled(
        header,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));

    if table.line_items().next().is_none() {
        lines.push(Line::from(Span::styled(
            "No key line items reported",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (item, cells) in table.rows() {
        let mut spans = vec![Span::raw(format!(
            "{:<width$}",
            truncate_str(item, ITEM_WIDTH - 2),
            width = ITEM_WIDTH
        ))];
        spans.extend(cells.iter().map(|cell| {
            let color = match cell {
                Some(v) if *v < 0.0 => Color::Red,
                Some(_) => Color::White,
                None => Color::DarkGray,
            };
            Span::styled(
                format!("{:>width$}", format_currency(*cell), width = CELL_WIDTH),
                Style::default().fg(color),
            )
        }));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines
}

fn statements_lines(section: &StatementsSection, width: u16) -> Vec<Line<'static>> {
    let mut lines = statement_lines("Income Statement", section.income.as_ref());
    lines.extend(statement_lines("Balance Sheet", section.balance.as_ref()));
    if section.cash_flow.is_some() {
        lines.extend(statement_lines("Cash Flow", section.cash_flow.as_ref()));
    }

    let charts = [
        (&section.revenue_chart, Color::Cyan),
        (&section.profit_chart, Color::Green),
        (&section.balance_chart, Color::Magenta),
    ];
    for (chart, color) in charts {
        if let Some(spec) = chart {
            lines.extend(render_chart(spec, width, color));
            lines.push(Line::from(""));
        }
    }
    lines
}

fn ratio_value(section: &RatiosSection, ratio: Ratio, pct: bool) -> String {
    match section.bundle.get(ratio) {
        None => "N/A".to_string(),
        Some(v) if pct => format_percent(v),
        Some(v) => format!("{:.2}", v),
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Neutral => Color::Yellow,
        Tone::Negative => Color::Red,
    }
}

fn health_lines(health: &HealthAssessment) -> Vec<Line<'static>> {
    let rating_color = match health.rating {
        Rating::Excellent => Color::Green,
        Rating::Good => Color::Yellow,
        Rating::Caution => Color::Red,
    };
    let mut lines = vec![
        section_divider("Financial Health"),
        Line::from(vec![
            Span::raw("Score:          "),
            Span::styled(
                format!("{}/{}", health.score, MAX_SCORE),
                Style::default().fg(rating_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  Rating: "),
            Span::styled(
                health.rating.label().to_uppercase(),
                Style::default().fg(rating_color).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    lines.extend(health.findings.iter().map(|f| {
        let marker = match f.tone {
            Tone::Positive => "+",
            Tone::Neutral => "~",
            Tone::Negative => "-",
        };
        Line::from(Span::styled(
            format!("  {} {}", marker, f.statement),
            Style::default().fg(tone_color(f.tone)),
        ))
    }));
    lines.push(Line::from(""));
    lines
}

fn ratios_lines(section: &RatiosSection) -> Vec<Line<'static>> {
    let mut lines = vec![section_divider("Financial Ratios")];
    if section.bundle.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ratios unavailable for this company",
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
        return lines;
    }

    let roe = section.bundle.get(Ratio::Roe).map(|_| format_percent(section.roe_pct()));
    let roa = section.bundle.get(Ratio::Roa).map(|_| format_percent(section.roa_pct()));
    let mut profitability = metric("Gross Margin:", ratio_value(section, Ratio::GrossMargin, true), Color::Cyan);
    profitability.extend(metric("Net Margin:", ratio_value(section, Ratio::NetMargin, true), Color::Cyan));
    let mut returns = metric("ROE:", roe.unwrap_or_else(|| "N/A".to_string()), Color::Cyan);
    returns.extend(metric("ROA:", roa.unwrap_or_else(|| "N/A".to_string()), Color::Cyan));
    let mut leverage = metric("Debt/Equity:", ratio_value(section, Ratio::DebtToEquity, false), Color::White);
    leverage.extend(metric("P/B Ratio:", format_multiple(section.bundle.get(Ratio::PbRatio)), Color::White));
    let mut size = metric("Revenue:", format_currency(section.bundle.get(Ratio::Revenue)), Color::White);
    size.extend(metric("Net Income:", format_currency(section.bundle.get(Ratio::NetIncome)), Color::White));

    lines.extend([
        Line::from(profitability),
        Line::from(returns),
        Line::from(leverage),
        Line::from(size),
        Line::from(""),
    ]);
    if let Some(health) = &section.health {
        lines.extend(health_lines(health));
    }
    lines
}

fn price_lines(section: &PriceSection, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![section_divider("Price Analysis")];
    match &section.chart {
        Some(spec) => lines.extend(render_chart(spec, width, Color::Cyan)),
        None => lines.push(Line::from(Span::styled(
            "No price history available",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::from(""));

    if let Some(stats) = &section.stats {
        let return_color = if stats.return_1y_pct >= 0.0 { Color::Green } else { Color::Red };
        let mut range = metric("52W High:", format_price(stats.high_52w), Color::Green);
        range.extend(metric("52W Low:", format_price(stats.low_52w), Color::Red));
        let mut perf = metric("1Y Return:", format!("{:+.2}%", stats.return_1y_pct), return_color);
        perf.extend(metric(
            "Volatility:",
            stats.volatility_pct.map(format_percent).unwrap_or_else(|| "N/A".to_string()),
            Color::White,
        ));
        lines.push(Line::from(range));
        lines.push(Line::from(perf));
    }
    lines
}

/// All lines of `report`, top to bottom.
pub fn report_lines(report: &AnalysisReport, width: u16) -> Vec<Line<'static>> {
    let mut lines = overview_lines(&report.overview);
    if let Some(section) = &report.statements {
        lines.extend(statements_lines(section, width));
    }
    if let Some(section) = &report.ratios {
        lines.extend(ratios_lines(section));
    }
    if let Some(section) = &report.price {
        lines.extend(price_lines(section, width));
    }
    if let Some(notice) = report.comparison_notice {
        lines.push(section_divider("Peer Comparison"));
        lines.push(Line::from(Span::styled(notice, Style::default().fg(Color::Cyan))));
    }
    lines
}

fn placeholder(message: String, color: Color) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(color))),
    ]
}

pub fn draw_report(frame: &mut Frame, area: Rect, app: &App) {
    let inner_width = area.width.saturating_sub(2);
    let (lines, alignment) = match (&app.state, &app.report) {
        (DriverState::Ready { .. }, Some(report)) => (report_lines(report, inner_width), Alignment::Left),
        (DriverState::Fetching { ticker }, _) => (
            placeholder(format!("Loading data for {}...", ticker), Color::Yellow),
            Alignment::Center,
        ),
        (DriverState::Failed { message, .. }, _) => {
            let mut lines = placeholder(message.clone(), Color::Red);
            lines.push(Line::from(Span::styled(
                "Select a company and press Enter to try again",
                Style::default().fg(Color::DarkGray),
            )));
            (lines, Alignment::Center)
        }
        _ => (
            placeholder("Select a company and press Enter to analyze".to_string(), Color::DarkGray),
            Alignment::Center,
        ),
    };

    let title = format!(" {} ", app.mode.label());
    let paragraph = Paragraph::new(lines)
        .alignment(alignment)
        .scroll((app.report_scroll, 0))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(paragraph, area);
}
