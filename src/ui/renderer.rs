//! Frame composition for the chat view.
//!
//! Layout is a one-line header, the reply area, and the compose box. The
//! reply area subdivides by which slots the current reply filled: text on
//! top, then the table, then the chart. Slots that are empty simply do
//! not get a region.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::core::app::App;
use crate::core::conversation::OutputSlots;
use crate::ui::chart::render_chart;
use crate::ui::table::render_table;

const MAX_INPUT_LINES: u16 = 6;

pub fn ui(f: &mut Frame, app: &App) {
    let (title, output, input) = frame_chunks(app, f.area());
    render_title(f, title, app);
    render_output(f, output, app);
    render_input(f, input, app);
}

/// Upper bound for the text scroll offset at the given frame size, taken
/// from the same layout math the next draw will use. Zero when the reply
/// fits its region or no text is on screen.
pub fn max_text_scroll(app: &App, frame: Rect) -> u16 {
    let slots = app.conversation.slots();
    let (_, output, _) = frame_chunks(app, frame);
    match output_regions(slots, output).text {
        Some(region) => wrapped_line_count(&slots.text, region.width).saturating_sub(region.height),
        None => 0,
    }
}

fn frame_chunks(app: &App, frame: Rect) -> (Rect, Rect, Rect) {
    let input_height = (app.input.line_count() as u16).clamp(1, MAX_INPUT_LINES) + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(input_height),
        ])
        .split(frame);
    (chunks[0], chunks[1], chunks[2])
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            format!("crmchat v{}", env!("CARGO_PKG_VERSION")),
            app.theme.title,
        ),
        Span::styled(format!("  {}", app.base_url), app.theme.hint),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn render_output(f: &mut Frame, area: Rect, app: &App) {
    let slots = app.conversation.slots();
    if slots.is_empty() {
        let hint = Paragraph::new("Ask the CRM assistant anything to get started.")
            .style(app.theme.hint)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(hint, area);
        return;
    }
    let regions = output_regions(slots, area);
    if let Some(region) = regions.text {
        render_text(f, region, app);
    }
    if let Some(region) = regions.table {
        render_table(f, region, &slots.table, &app.theme);
    }
    if let (Some(region), Some(spec)) = (regions.chart, &slots.chart) {
        render_chart(f, region, spec, &app.theme);
    }
}

/// Where each filled slot draws inside the output area. Slots the reply
/// left empty get no region.
#[derive(Default)]
struct OutputRegions {
    text: Option<Rect>,
    table: Option<Rect>,
    chart: Option<Rect>,
}

fn output_regions(slots: &OutputSlots, area: Rect) -> OutputRegions {
    let has_text = !slots.text.is_empty();
    let has_table = !slots.table.is_empty();
    let has_chart = slots
        .chart
        .as_ref()
        .is_some_and(|spec| !spec.data.is_empty());

    let mut constraints: Vec<Constraint> = Vec::new();
    if has_text {
        if has_table || has_chart {
            let wrapped = wrapped_line_count(&slots.text, area.width);
            let cap = (area.height / 3).max(3);
            constraints.push(Constraint::Length(wrapped.min(cap)));
        } else {
            constraints.push(Constraint::Min(1));
        }
    }
    if has_table {
        constraints.push(Constraint::Min(5));
    }
    if has_chart {
        if has_table {
            constraints.push(Constraint::Length((area.height / 2).min(12)));
        } else {
            constraints.push(Constraint::Min(5));
        }
    }

    let mut regions = OutputRegions::default();
    if constraints.is_empty() {
        return regions;
    }
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut index = 0;
    if has_text {
        regions.text = Some(split[index]);
        index += 1;
    }
    if has_table {
        regions.table = Some(split[index]);
        index += 1;
    }
    if has_chart {
        regions.chart = Some(split[index]);
    }
    regions
}

fn render_text(f: &mut Frame, area: Rect, app: &App) {
    let slots = app.conversation.slots();
    let style = if slots.text.starts_with("Error: ") {
        app.theme.error_text
    } else {
        app.theme.assistant_text
    };
    let total = wrapped_line_count(&slots.text, area.width);
    let max_scroll = total.saturating_sub(area.height);
    let scroll = app.scroll.min(max_scroll);
    let paragraph = Paragraph::new(slots.text.as_str())
        .style(style)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.busy_symbol() {
        Some(symbol) => Line::from(Span::styled(
            format!(" Working {symbol} "),
            app.theme.busy,
        )),
        None => Line::from(vec![
            Span::styled(" Message ", app.theme.input_title),
            Span::styled(
                "(Enter sends, Shift+Enter adds a line, Ctrl+C quits) ",
                app.theme.hint,
            ),
        ]),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.input_border)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(app.input.widget(), inner);
}

/// Estimate how many rows `text` occupies at `width` once word-wrapped.
/// Used only to size regions and clamp scrolling, so being off by a line
/// on pathological input is harmless.
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let width = width as usize;
    let mut count: u16 = 0;
    for line in text.lines() {
        let rows = if line.is_empty() {
            1
        } else {
            line.width().div_ceil(width)
        };
        count = count.saturating_add(rows as u16);
    }
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::turn::TurnMessage;
    use crate::utils::test_utils::buffer_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;

    fn app_with_reply(raw: serde_json::Value) -> App {
        let mut app = App::new("http://localhost:8000/api".to_string());
        app.input.paste("question");
        let turn_id = match app.conversation.submit("question") {
            crate::core::conversation::Submission::Accepted { turn_id, .. } => turn_id,
            other => panic!("expected acceptance, got {other:?}"),
        };
        let reply = serde_json::from_value(raw).unwrap();
        app.apply_turn_message(turn_id, TurnMessage::Reply(reply));
        app
    }

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(70, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_empty_conversation_shows_hint() {
        let app = App::new("http://localhost:8000/api".to_string());
        let screen = draw(&app);
        assert!(screen.contains("crmchat"));
        assert!(screen.contains("Ask the CRM assistant anything"));
        assert!(screen.contains("Enter sends"));
    }

    #[test]
    fn test_text_reply_is_visible() {
        let app = app_with_reply(json!({"reply": "Hi there"}));
        let screen = draw(&app);
        assert!(screen.contains("Hi there"));
    }

    #[test]
    fn test_error_text_is_visible() {
        let mut app = App::new("http://localhost:8000/api".to_string());
        let turn_id = match app.conversation.submit("hello") {
            crate::core::conversation::Submission::Accepted { turn_id, .. } => turn_id,
            other => panic!("expected acceptance, got {other:?}"),
        };
        app.apply_turn_message(turn_id, TurnMessage::Failed("Backend down".to_string()));
        let screen = draw(&app);
        assert!(screen.contains("Error: Backend down"));
    }

    #[test]
    fn test_busy_turn_shows_working_indicator() {
        let mut app = App::new("http://localhost:8000/api".to_string());
        app.conversation.submit("hello");
        let screen = draw(&app);
        assert!(screen.contains("Working"));
    }

    #[test]
    fn test_combined_reply_renders_every_region() {
        let app = app_with_reply(json!({
            "reply": "Revenue by account",
            "dataset": [
                {"account_name": "Acme", "revenue": 100},
                {"account_name": "Globex", "revenue": 200}
            ],
            "chart": {"xKey": "account_name", "yKey": "revenue", "type": "bar"}
        }));
        let screen = draw(&app);
        assert!(screen.contains("Revenue by account"));
        assert!(screen.contains("ACCOUNT NAME"));
        assert!(screen.contains(" Data "));
        assert!(screen.contains(" Chart "));
    }

    #[test]
    fn test_table_only_reply_has_no_chart_frame() {
        let app = app_with_reply(json!({
            "reply": "",
            "dataset": [{"account_name": "Acme", "revenue": 100}]
        }));
        let screen = draw(&app);
        assert!(screen.contains(" Data "));
        assert!(!screen.contains(" Chart "));
    }

    #[test]
    fn test_max_text_scroll_measures_overflow() {
        let app = app_with_reply(json!({ "reply": "line\n".repeat(30).trim_end() }));
        // A 40x10 frame keeps one title row and a three-row compose box,
        // leaving six rows for thirty reply lines.
        assert_eq!(max_text_scroll(&app, Rect::new(0, 0, 40, 10)), 24);
        assert_eq!(max_text_scroll(&app, Rect::new(0, 0, 40, 40)), 0);
        let idle = App::new("http://localhost:8000/api".to_string());
        assert_eq!(max_text_scroll(&idle, Rect::new(0, 0, 40, 10)), 0);
    }

    #[test]
    fn test_wrapped_line_count_estimates() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("short", 10), 1);
        assert_eq!(wrapped_line_count("a\nb\nc", 10), 3);
        assert_eq!(wrapped_line_count("aaaaaaaaaaaaaaaaaaaa", 10), 2);
    }
}
