//! Text rendering of [`ChartSpec`]s for the terminal.

use super::formatters::{format_currency, format_price};
use crate::analysis::charts::{Candle, LinePoint, PieSlice};
use crate::analysis::{ChartSpec, SeriesData};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const BULLISH_COLOR: Color = Color::Rgb(52, 208, 88);
const BEARISH_COLOR: Color = Color::Rgb(234, 74, 90);
const SLICE_COLORS: [Color; 4] = [Color::Cyan, Color::Magenta, Color::Yellow, Color::Green];
const LABEL_WIDTH: usize = 22;
const Y_AXIS_WIDTH: usize = 10;

fn chart_title(spec: &ChartSpec) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("  {}", spec.title),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if let Some(y_label) = &spec.y_label {
        spans.push(Span::styled(format!("  {}", y_label), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn bar(filled: usize, width: usize, color: Color) -> Vec<Span<'static>> {
    let filled = filled.min(width);
    vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(width - filled), Style::default().fg(Color::DarkGray)),
    ]
}

fn line_series(points: &[LinePoint], width: usize, color: Color) -> Vec<Line<'static>> {
    let max = points.iter().map(|p| p.y.abs()).fold(0.0, f64::max);
    let bar_width = width.saturating_sub(LABEL_WIDTH + 14).max(4);
    points
        .iter()
        .map(|p| {
            let filled = if max > 0.0 {
                (p.y.abs() / max * bar_width as f64).round() as usize
            } else {
                0
            };
            let bar_color = if p.y >= 0.0 { color } else { BEARISH_COLOR };
            let mut spans = vec![Span::raw(format!("  {:<12} ", p.x))];
            spans.extend(bar(filled, bar_width, bar_color));
            spans.push(Span::styled(
                format!(" {}", format_currency(p.y)),
                Style::default().fg(Color::Gray),
            ));
            Line::from(spans)
        })
        .collect()
}

fn pie_series(slices: &[PieSlice], width: usize) -> Vec<Line<'static>> {
    let bar_width = width.saturating_sub(LABEL_WIDTH + 24).max(4);
    slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let pct = slice.share(slices);
            let color = SLICE_COLORS[i % SLICE_COLORS.len()];
            let filled = (pct / 100.0 * bar_width as f64).round().max(0.0) as usize;
            let mut spans = vec![Span::styled(
                format!("    {:<width$} ", slice.label, width = LABEL_WIDTH - 4),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )];
            spans.extend(bar(filled, bar_width, color));
            spans.push(Span::raw(format!(" {:5.1}% ", pct)));
            spans.push(Span::styled(
                format_currency(slice.value),
                Style::default().fg(Color::DarkGray),
            ));
            Line::from(spans)
        })
        .collect()
}

/// Merges consecutive candles so that at most `max` remain.
fn downsample(candles: &[Candle], max: usize) -> Vec<Candle> {
    if max == 0 || candles.len() <= max {
        return candles.to_vec();
    }
    let chunk = candles.len().div_ceil(max);
    candles
        .chunks(chunk)
        .filter_map(|group| {
            let first = group.first()?;
            let last = group.last()?;
            Some(Candle {
                date: first.date,
                open: first.open,
                close: last.close,
                high: group.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max),
                low: group.iter().map(|c| c.low).fold(f64::INFINITY, f64::min),
            })
        })
        .collect()
}

fn candle_char(candle: &Candle, band_low: f64, band_high: f64) -> char {
    let body_top = candle.open.max(candle.close);
    let body_bottom = candle.open.min(candle.close);
    if body_top >= band_low && body_bottom <= band_high {
        '┃'
    } else if candle.high >= band_low && candle.low <= band_high {
        '│'
    } else {
        ' '
    }
}

fn candlestick_series(candles: &[Candle], width: usize, height: usize) -> Vec<Line<'static>> {
    let columns = width.saturating_sub(Y_AXIS_WIDTH + 4).max(1);
    let candles = downsample(candles, columns);
    let max = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let min = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    if !max.is_finite() || !min.is_finite() {
        return Vec::new();
    }
    let step = if max > min { (max - min) / height as f64 } else { 1.0 };

    let mut lines = Vec::with_capacity(height + 1);
    for row in 0..height {
        let band_high = max - step * row as f64;
        let band_low = band_high - step;
        let axis = if row == 0 {
            format_price(max)
        } else if row + 1 == height {
            format_price(min)
        } else if row == height / 2 {
            format_price((max + min) / 2.0)
        } else {
            String::new()
        };
        let mut spans = vec![Span::styled(
            format!("{:>width$} ┤", axis, width = Y_AXIS_WIDTH),
            Style::default().fg(Color::DarkGray),
        )];
        spans.extend(candles.iter().map(|c| {
            let color = if c.is_bullish() { BULLISH_COLOR } else { BEARISH_COLOR };
            Span::styled(candle_char(c, band_low, band_high).to_string(), Style::default().fg(color))
        }));
        lines.push(Line::from(spans));
    }

    if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
        let first_label = first.date.format("%Y-%m-%d").to_string();
        let last_label = last.date.format("%Y-%m-%d").to_string();
        let gap = candles.len().saturating_sub(first_label.len() + last_label.len());
        lines.push(Line::from(Span::styled(
            format!(
                "{:>width$}  {}{}{}",
                "",
                first_label,
                " ".repeat(gap),
                last_label,
                width = Y_AXIS_WIDTH
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

/// Renders `spec` as text lines fitting `width` columns.
pub fn render_chart(spec: &ChartSpec, width: u16, color: Color) -> Vec<Line<'static>> {
    let width = width as usize;
    let mut lines = vec![chart_title(spec)];
    for series in &spec.series {
        match &series.data {
            SeriesData::Line(points) => lines.extend(line_series(points, width, color)),
            SeriesData::Pie(slices) => {
                lines.push(Line::from(Span::styled(
                    format!("   {}", series.name),
                    Style::default().fg(Color::Yellow),
                )));
                lines.extend(pie_series(slices, width));
            }
            SeriesData::Candlestick(candles) => lines.extend(candlestick_series(candles, width, 12)),
        }
    }
    lines
}
