//! Dataset rendering as a terminal table.

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::core::dataset::{cell_text, header_label, TabularDataset};
use crate::ui::theme::Theme;

const MIN_COLUMN_WIDTH: u16 = 4;
const MAX_COLUMN_WIDTH: u16 = 28;

/// Render a dataset as a bordered table. Columns come from the first
/// record; rows missing a column show a blank cell. An empty dataset
/// renders nothing at all, leaving the area blank.
pub fn render_table(f: &mut Frame, area: Rect, rows: &TabularDataset, theme: &Theme) {
    if rows.is_empty() {
        return;
    }
    let columns = rows.columns();
    let headers: Vec<String> = columns.iter().map(|column| header_label(column)).collect();
    let mut widths: Vec<u16> = headers
        .iter()
        .map(|header| capped_width(header))
        .collect();

    let mut body = Vec::with_capacity(rows.len());
    for record in rows.records() {
        let mut cells = Vec::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            let text = cell_text(record.get(*column));
            widths[index] = widths[index].max(capped_width(&text));
            cells.push(Cell::from(text));
        }
        body.push(Row::new(cells).style(theme.table_row));
    }

    let header = Row::new(
        headers
            .into_iter()
            .map(Cell::from)
            .collect::<Vec<_>>(),
    )
    .style(theme.table_header);
    let constraints: Vec<Constraint> = widths
        .into_iter()
        .map(|width| Constraint::Length(width.max(MIN_COLUMN_WIDTH)))
        .collect();

    let table = Table::new(body, constraints)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.section_border)
                .title(" Data ")
                .title_style(theme.section_title),
        );
    f.render_widget(table, area);
}

fn capped_width(text: &str) -> u16 {
    text.width().min(MAX_COLUMN_WIDTH as usize) as u16
}
