//! Top-level application state for the interactive chat view.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

use crate::core::conversation::Conversation;
use crate::core::turn::TurnMessage;
use crate::ui::theme::Theme;
use crate::utils::input::sanitize_text_input;

const PULSE_FRAMES: [&str; 3] = ["○", "◐", "●"];
const PULSE_FRAME_MS: u128 = 300;

/// The multi-line compose area, wrapping the textarea widget.
#[derive(Debug)]
pub struct InputState {
    textarea: TextArea<'static>,
}

impl InputState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Ask about accounts, pipeline, or revenue");
        InputState { textarea }
    }

    /// Feed one key press into the textarea. Tab is widened to spaces so
    /// the buffer never holds literal tabs.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Tab {
            self.textarea.insert_str("    ");
            return;
        }
        self.textarea.input(tui_textarea::Input::from(key));
    }

    pub fn insert_newline(&mut self) {
        self.textarea.insert_str("\n");
    }

    pub fn paste(&mut self, text: &str) {
        self.textarea.insert_str(sanitize_text_input(text));
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }

    pub fn line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    pub fn widget(&self) -> &TextArea<'static> {
        &self.textarea
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the renderer and event loop share.
#[derive(Debug)]
pub struct App {
    pub conversation: Conversation,
    pub input: InputState,
    pub theme: Theme,
    pub base_url: String,
    /// Scroll offset into the text region, in wrapped lines from the top.
    pub scroll: u16,
    pub exit_requested: bool,
}

impl App {
    pub fn new(base_url: String) -> Self {
        App {
            conversation: Conversation::new(),
            input: InputState::new(),
            theme: Theme::default(),
            base_url,
            scroll: 0,
            exit_requested: false,
        }
    }

    /// Route one turn outcome into the conversation. When the completion
    /// applies, the compose area is cleared and the view scrolls back to
    /// the top of the new reply.
    pub fn apply_turn_message(&mut self, turn_id: u64, message: TurnMessage) -> bool {
        let outcome = match message {
            TurnMessage::Reply(reply) => Ok(reply),
            TurnMessage::Failed(detail) => Err(detail),
        };
        if !self.conversation.complete(turn_id, outcome) {
            return false;
        }
        self.input.clear();
        self.scroll = 0;
        true
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Scroll toward the end of the reply, stopping at `max_scroll`, the
    /// renderer's bound for the current layout.
    pub fn scroll_down(&mut self, lines: u16, max_scroll: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(max_scroll);
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Animated indicator shown while a turn is in flight.
    pub fn busy_symbol(&self) -> Option<&'static str> {
        let started = self.conversation.in_flight_since()?;
        let frame = (started.elapsed().as_millis() / PULSE_FRAME_MS) as usize % PULSE_FRAMES.len();
        Some(PULSE_FRAMES[frame])
    }
}
