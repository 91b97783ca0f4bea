//! Chart rendering: bars for categories, braille lines for trends.

use ratatui::layout::{Alignment, Rect};
use ratatui::symbols;
use ratatui::widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::core::chart::{ChartKind, ChartSeries, ChartSpec};
use crate::ui::theme::Theme;

/// Shown in place of a plot when a chart request lacks its axis keys.
pub const MISSING_AXIS_NOTICE: &str = "Chart requires xKey and yKey.";

const MIN_BAR_WIDTH: u16 = 3;
const MAX_BAR_WIDTH: u16 = 12;

/// Render a chart request into `area`. A request with no rows renders
/// nothing; one with rows but without both axis keys gets a notice
/// instead of a plot.
pub fn render_chart(f: &mut Frame, area: Rect, spec: &ChartSpec, theme: &Theme) {
    if spec.data.is_empty() {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.section_border)
        .title(" Chart ")
        .title_style(theme.section_title);
    let series = match spec.series() {
        Some(series) => series,
        None => {
            let notice = Paragraph::new(MISSING_AXIS_NOTICE)
                .style(theme.hint)
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(notice, area);
            return;
        }
    };
    match spec.kind {
        ChartKind::Bar => render_bars(f, area, block, &series, theme),
        ChartKind::Line => render_line(f, area, block, spec, &series, theme),
    }
}

fn render_bars(f: &mut Frame, area: Rect, block: Block, series: &ChartSeries, theme: &Theme) {
    let points = series.bar_points();
    let bar_width = points
        .iter()
        .map(|(label, _)| label.width() as u16)
        .max()
        .unwrap_or(MIN_BAR_WIDTH)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
    let data: Vec<(&str, u64)> = points
        .iter()
        .map(|(label, value)| (label.as_str(), *value))
        .collect();
    let chart = BarChart::default()
        .block(block)
        .data(&data)
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(theme.chart_series)
        .value_style(theme.chart_labels)
        .label_style(theme.chart_labels);
    f.render_widget(chart, area);
}

fn render_line(
    f: &mut Frame,
    area: Rect,
    block: Block,
    spec: &ChartSpec,
    series: &ChartSeries,
    theme: &Theme,
) {
    let points = series.line_points();
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_series)
        .data(&points);

    // Label only the first and last category; anything denser collides
    // in narrow panes.
    let mut x_labels: Vec<String> = Vec::new();
    if let Some(first) = series.labels.first() {
        x_labels.push(first.clone());
    }
    if series.labels.len() > 1 {
        if let Some(last) = series.labels.last() {
            x_labels.push(last.clone());
        }
    }
    let (x_title, y_title) = spec.axis_keys().unwrap_or(("x", "y"));
    let y_bounds = series.y_bounds();
    let y_labels = [format_axis_value(y_bounds[0]), format_axis_value(y_bounds[1])];

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(x_title)
                .style(theme.chart_axis)
                .bounds(series.x_bounds())
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(y_title)
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn format_axis_value(value: f64) -> String {
    if value.fract() == 0.0 || value.abs() >= 100.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
