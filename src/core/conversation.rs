//! Conversation state: one turn in flight at most, one reply on screen.
//!
//! The conversation is the only writer of presentation state. The event
//! loop feeds it submissions and completions; everything else reads. Each
//! completed reply replaces the previous one wholesale, so the display
//! never mixes parts of two different turns.

use std::time::Instant;

use tracing::debug;

use crate::api::AssistantReply;
use crate::core::chart::ChartSpec;
use crate::core::classify::{classify, Presentation};
use crate::core::dataset::TabularDataset;
use crate::core::turn::ChatTurn;

/// Request lifecycle. There is no queue: while a turn is in flight, new
/// submissions are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnPhase {
    Idle,
    InFlight { turn_id: u64, started: Instant },
}

/// What `submit` decided to do with the input.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The message was accepted and a backend request for `turn_id`
    /// should be spawned with `message`.
    Accepted { turn_id: u64, message: String },
    /// Input was blank after trimming; nothing changed.
    RejectedEmpty,
    /// A turn is already in flight; nothing changed.
    RejectedBusy,
}

/// The current reply, split into its display slots. At most one of each
/// kind; an empty slot renders as nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSlots {
    pub text: String,
    pub table: TabularDataset,
    pub chart: Option<ChartSpec>,
}

impl OutputSlots {
    pub fn clear(&mut self) {
        self.text.clear();
        self.table.clear();
        self.chart = None;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.table.is_empty() && self.chart.is_none()
    }
}

/// Drives the submit/complete cycle and owns the presentation slots.
#[derive(Debug)]
pub struct Conversation {
    phase: TurnPhase,
    slots: OutputSlots,
    last_turn: Option<ChatTurn>,
    next_turn_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Conversation {
            phase: TurnPhase::Idle,
            slots: OutputSlots::default(),
            last_turn: None,
            next_turn_id: 1,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, TurnPhase::InFlight { .. })
    }

    /// When the in-flight turn started, for the busy indicator.
    pub fn in_flight_since(&self) -> Option<Instant> {
        match self.phase {
            TurnPhase::InFlight { started, .. } => Some(started),
            TurnPhase::Idle => None,
        }
    }

    pub fn slots(&self) -> &OutputSlots {
        &self.slots
    }

    pub fn last_turn(&self) -> Option<&ChatTurn> {
        self.last_turn.as_ref()
    }

    /// Try to start a turn from raw input. Trims first; whitespace-only
    /// input and submissions while busy are rejected without consuming a
    /// turn id or touching any state.
    pub fn submit(&mut self, input: &str) -> Submission {
        let message = input.trim();
        if message.is_empty() {
            return Submission::RejectedEmpty;
        }
        if self.is_in_flight() {
            debug!("submission rejected, a turn is already in flight");
            return Submission::RejectedBusy;
        }
        let turn_id = self.next_turn_id;
        self.next_turn_id += 1;
        self.phase = TurnPhase::InFlight {
            turn_id,
            started: Instant::now(),
        };
        self.last_turn = Some(ChatTurn::new(message));
        debug!(turn_id, "message accepted");
        Submission::Accepted {
            turn_id,
            message: message.to_string(),
        }
    }

    /// Settle a turn with its backend outcome. Returns whether the
    /// completion was applied; completions for anything but the currently
    /// in-flight turn id are ignored so a late result can never clobber
    /// newer state.
    pub fn complete(&mut self, turn_id: u64, outcome: Result<AssistantReply, String>) -> bool {
        match self.phase {
            TurnPhase::InFlight { turn_id: current, .. } if current == turn_id => {}
            _ => {
                debug!(turn_id, "ignoring completion for inactive turn");
                return false;
            }
        }
        self.slots.clear();
        match outcome {
            Ok(reply) => {
                self.apply(classify(&reply));
                if let Some(turn) = self.last_turn.as_mut() {
                    turn.reply = Some(reply.reply);
                }
            }
            Err(detail) => {
                self.slots.text = format!("Error: {detail}");
                if let Some(turn) = self.last_turn.as_mut() {
                    turn.error = Some(detail);
                }
            }
        }
        self.phase = TurnPhase::Idle;
        true
    }

    fn apply(&mut self, part: Presentation) {
        match part {
            Presentation::Text(text) => self.slots.text = text,
            Presentation::Table(rows) => self.slots.table = rows,
            Presentation::Chart(spec) => self.slots.chart = Some(spec),
            Presentation::Combined(parts) => {
                for part in parts {
                    self.apply(part);
                }
            }
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
