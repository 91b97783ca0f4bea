//! The interactive chat session: terminal setup, event routing, teardown.

use std::error::Error;
use std::io;
use std::time::Duration;

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::Rect;
use ratatui::Terminal;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use crate::core::app::App;
use crate::core::conversation::Submission;
use crate::core::gateway::AssistantGateway;
use crate::core::turn::{TurnOutcome, TurnService};
use crate::ui::renderer::{max_text_scroll, ui};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const WHEEL_SCROLL_LINES: u16 = 3;
const PAGE_SCROLL_LINES: u16 = 10;

/// Run the full-screen chat session until the user quits.
pub async fn run_chat(base_url: String) -> Result<(), Box<dyn Error>> {
    info!(base_url = %base_url, "starting chat session");
    let gateway = AssistantGateway::new(base_url.clone());
    let mut app = App::new(base_url);
    let (service, mut outcomes) = TurnService::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &gateway, &service, &mut outcomes).await;

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    gateway: &AssistantGateway,
    service: &TurnService,
    outcomes: &mut UnboundedReceiver<TurnOutcome>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;
        if app.exit_requested {
            return Ok(());
        }
        // Short poll keeps the busy indicator animating and the outcome
        // channel drained while no input arrives.
        if event::poll(POLL_INTERVAL)? {
            let size = terminal.size()?;
            let frame = Rect::new(0, 0, size.width, size.height);
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(app, gateway, service, key, frame);
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse, frame),
                Event::Paste(text) => app.input.paste(&text),
                _ => {}
            }
        }
        while let Ok((message, turn_id)) = outcomes.try_recv() {
            app.apply_turn_message(turn_id, message);
        }
    }
}

fn handle_key(
    app: &mut App,
    gateway: &AssistantGateway,
    service: &TurnService,
    key: KeyEvent,
    frame: Rect,
) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_exit();
        }
        KeyCode::Enter if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            app.input.insert_newline();
        }
        KeyCode::Enter => submit_draft(app, gateway, service),
        KeyCode::PageUp => app.scroll_up(PAGE_SCROLL_LINES),
        KeyCode::PageDown => {
            let max_scroll = max_text_scroll(app, frame);
            app.scroll_down(PAGE_SCROLL_LINES, max_scroll);
        }
        _ => app.input.handle_key(key),
    }
}

fn submit_draft(app: &mut App, gateway: &AssistantGateway, service: &TurnService) {
    let draft = app.input.text();
    match app.conversation.submit(&draft) {
        Submission::Accepted { turn_id, message } => {
            service.spawn_turn(gateway.clone(), message, turn_id);
        }
        // Blank drafts and submissions while a turn is in flight are
        // ignored; the draft stays in the compose area untouched.
        Submission::RejectedEmpty | Submission::RejectedBusy => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, frame: Rect) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(WHEEL_SCROLL_LINES),
        MouseEventKind::ScrollDown => {
            let max_scroll = max_text_scroll(app, frame);
            app.scroll_down(WHEEL_SCROLL_LINES, max_scroll);
        }
        _ => {}
    }
}
