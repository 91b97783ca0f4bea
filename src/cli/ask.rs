//! One-shot `ask` command: send a single message and print the reply to
//! stdout, for scripting and quick checks without the full-screen view.

use std::error::Error;

use unicode_width::UnicodeWidthStr;

use crate::api::AssistantReply;
use crate::core::chart::ChartSpec;
use crate::core::classify::{classify, Presentation};
use crate::core::dataset::{cell_text, header_label, TabularDataset};
use crate::core::gateway::AssistantGateway;
use crate::ui::chart::MISSING_AXIS_NOTICE;

pub async fn run_ask(gateway: &AssistantGateway, message: &str) -> Result<(), Box<dyn Error>> {
    let message = message.trim();
    if message.is_empty() {
        eprintln!("Usage: crmchat ask <message>");
        std::process::exit(1);
    }
    match gateway.send_message(message).await {
        Ok(reply) => {
            print!("{}", render_reply(&reply));
            Ok(())
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

/// Format one reply for plain stdout, part by part, blank lines between
/// parts. Charts cannot be drawn on a plain stream, so they become a
/// one-line summary; a chart with no rows prints nothing, just as it
/// draws nothing in the full-screen view.
fn render_reply(reply: &AssistantReply) -> String {
    let mut out = String::new();
    for part in classify(reply).parts() {
        match part {
            Presentation::Text(text) => {
                if !text.is_empty() {
                    out.push_str(text);
                    out.push('\n');
                }
            }
            Presentation::Table(rows) => {
                if let Some(table) = plain_table(rows) {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(&table);
                }
            }
            // Checked before the axis keys, so an empty chart stays
            // silent rather than raising the axis notice.
            Presentation::Chart(spec) if spec.data.is_empty() => {}
            Presentation::Chart(spec) => {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&describe_chart(spec));
                out.push('\n');
            }
            // parts() already flattened any combination.
            Presentation::Combined(_) => {}
        }
    }
    if out.is_empty() {
        out.push_str("(empty reply)\n");
    }
    out
}

/// Align a dataset into padded text columns. `None` for an empty dataset.
fn plain_table(rows: &TabularDataset) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let columns = rows.columns();
    let headers: Vec<String> = columns.iter().map(|column| header_label(column)).collect();
    let mut widths: Vec<usize> = headers.iter().map(|header| header.width()).collect();
    let mut body: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for record in rows.records() {
        let mut cells = Vec::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            let text = cell_text(record.get(*column));
            widths[index] = widths[index].max(text.width());
            cells.push(text);
        }
        body.push(cells);
    }
    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    for cells in &body {
        push_row(&mut out, cells, &widths);
    }
    Some(out)
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // Pad by display width, not char count, so wide glyphs line up.
        if index + 1 < cells.len() {
            for _ in cell.width()..widths[index] {
                out.push(' ');
            }
        }
    }
    out.push('\n');
}

fn describe_chart(spec: &ChartSpec) -> String {
    match spec.axis_keys() {
        Some((x_key, y_key)) => {
            let rows = spec.data.len();
            let noun = if rows == 1 { "row" } else { "rows" };
            format!(
                "[{} chart: {} by {}, {} {}]",
                spec.kind.as_str(),
                y_key,
                x_key,
                rows,
                noun
            )
        }
        None => MISSING_AXIS_NOTICE.to_string(),
    }
}
