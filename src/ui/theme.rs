//! Color and style definitions for the chat view.

use ratatui::style::{Color, Modifier, Style};

/// Styles for every visual element the renderer draws. A single dark
/// palette, chosen to stay readable on the common terminal backgrounds.
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub assistant_text: Style,
    pub error_text: Style,
    pub hint: Style,
    pub input_border: Style,
    pub input_title: Style,
    pub busy: Style,
    pub section_border: Style,
    pub section_title: Style,
    pub table_header: Style,
    pub table_row: Style,
    pub chart_series: Style,
    pub chart_axis: Style,
    pub chart_labels: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            assistant_text: Style::default().fg(Color::White),
            error_text: Style::default().fg(Color::Red),
            hint: Style::default().fg(Color::DarkGray),
            input_border: Style::default().fg(Color::DarkGray),
            input_title: Style::default().fg(Color::Gray),
            busy: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            section_border: Style::default().fg(Color::DarkGray),
            section_title: Style::default().fg(Color::Gray),
            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            chart_series: Style::default().fg(Color::Cyan),
            chart_axis: Style::default().fg(Color::Gray),
            chart_labels: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}
