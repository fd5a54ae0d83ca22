use super::formatters::truncate_str;
use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

const SYMBOL_WIDTH: u16 = 6;

fn catalog_row(i: usize, ticker: &str, name: &str, app: &App, name_width: usize) -> Row<'static> {
    let is_selected = i == app.selected_index;
    let is_active = app.current_ticker() == Some(ticker);

    let symbol_style = if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let row_style = if is_selected {
        Style::default().bg(Color::Rgb(40, 80, 120)).fg(Color::White)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(ticker.to_string()).style(symbol_style),
        Cell::from(truncate_str(name, name_width)),
    ])
    .style(row_style)
}

/// Company picker: the catalog, narrowed by the active search filter.
pub fn draw_catalog(frame: &mut Frame, area: Rect, app: &App) {
    let name_width = area.width.saturating_sub(SYMBOL_WIDTH + 4) as usize;
    let companies = app.get_filtered_catalog();
    let rows: Vec<Row> = companies
        .iter()
        .enumerate()
        .map(|(i, (ticker, name))| catalog_row(i, ticker, name, app, name_width))
        .collect();

    let header = Row::new(vec![
        Cell::from("Symbol").style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Cell::from("Company").style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    ])
    .height(1);

    let title = if app.search_active {
        format!(" Companies ({}/{}) ", companies.len(), crate::catalog::SP500_COMPANIES.len())
    } else {
        " S&P 500 Companies ".to_string()
    };

    let table = Table::new(rows, [Constraint::Length(SYMBOL_WIDTH), Constraint::Min(10)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}
