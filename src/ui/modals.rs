use super::centered_rect;
use crate::analysis::AnalysisMode;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

fn help_section(title: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("─── {} ", title), Style::default().fg(Color::Yellow)),
        Span::styled("───────────────────────────", Style::default().fg(Color::DarkGray)),
    ])
}

fn help_binding(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:12}", key), Style::default().fg(Color::Cyan)),
        Span::raw(desc.to_string()),
    ])
}

fn help_content() -> Vec<Line<'static>> {
    let mut lines = vec![
        help_section("General"),
        help_binding("q", "Quit"),
        help_binding("?", "Show this help"),
        help_binding("↓ / j", "Move selection down"),
        help_binding("↑ / k", "Move selection up"),
        help_binding("Enter", "Analyze selected company"),
        help_binding("/", "Search companies by symbol or name"),
        help_binding("Esc", "Clear search filter"),
        Line::from(""),
        help_section("Report"),
        help_binding("Tab / →", "Next analysis mode"),
        help_binding("S-Tab / ←", "Previous analysis mode"),
        help_binding("PgDn / PgUp", "Scroll report"),
    ];
    lines.extend(
        AnalysisMode::ALL
            .iter()
            .enumerate()
            .map(|(i, mode)| help_binding(&(i + 1).to_string(), mode.label())),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [?/Enter/Esc] Close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

pub fn draw_help(frame: &mut Frame) {
    let area = centered_rect(50, 70, frame.area());
    frame.render_widget(Clear, area);

    let outer_block = Block::default()
        .title(" Help - Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    frame.render_widget(
        Paragraph::new(help_content()).alignment(Alignment::Left),
        inner_area,
    );
}
