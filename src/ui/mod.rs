mod charts;
mod detail;
pub mod formatters;
mod modals;
mod tables;

pub use detail::report_lines;

use crate::analysis::AnalysisMode;
use crate::app::{App, DriverState, InputMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const SIDEBAR_WIDTH: u16 = 34;

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(chunks[1]);
    tables::draw_catalog(frame, body[0], app);
    detail::draw_report(frame, body[1], app);

    draw_footer(frame, chunks[2], app);

    if app.input_mode == InputMode::Help {
        modals::draw_help(frame);
    }
}

fn mode_tabs(current: AnalysisMode) -> Vec<Span<'static>> {
    AnalysisMode::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, mode)| {
            let style = if *mode == current {
                Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [Span::styled(format!(" {} {} ", i + 1, mode.label()), style), Span::raw(" ")]
        })
        .collect()
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let status = match &app.state {
        DriverState::Fetching { .. } => "[Loading...]".to_string(),
        DriverState::Failed { .. } => "[Error]".to_string(),
        _ => match &app.last_updated {
            Some(time) => format!("[{}]", time),
            None => format!("[{}]", chrono::Local::now().format("%H:%M:%S")),
        },
    };

    let company = app.current_ticker().unwrap_or("-").to_string();

    let mut spans = vec![
        Span::styled(" S&P 500 Analyzer ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(company, Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
    ];
    spans.extend(mode_tabs(app.mode));
    if app.search_active {
        spans.push(Span::styled(
            format!("(filtered: {}) ", app.search_query),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::styled(status, Style::default().fg(Color::DarkGray)));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Normal => {
            let help = " [Enter] Analyze [Tab] Mode [1-5] Jump [/] Search [PgUp/PgDn] Scroll [↑↓] Nav [?] Help [q] Quit ";
            if let Some(msg) = &app.status_message {
                let color = if matches!(app.state, DriverState::Failed { .. }) {
                    Color::Red
                } else {
                    Color::Yellow
                };
                Line::from(vec![
                    Span::styled(msg.as_str(), Style::default().fg(color)),
                    Span::raw(" | "),
                    Span::styled(help, Style::default().fg(Color::DarkGray)),
                ])
            } else {
                Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))
            }
        }
        InputMode::Help => Line::from(Span::styled(
            " [?/Enter/Esc] Close help ",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Search => Line::from(vec![
            Span::raw(" Search: /"),
            Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::Cyan)),
            Span::styled("█", Style::default().fg(Color::Cyan)),
            Span::raw(" | [Enter] Apply | [Esc] Cancel"),
        ]),
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
