//! Turn bookkeeping and the async service that resolves turns.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::api::AssistantReply;
use crate::core::gateway::AssistantGateway;

/// One user message and what came back for it. Created when a message is
/// accepted and settled exactly once, with either a reply or an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatTurn {
    pub message: String,
    pub reply: Option<String>,
    pub error: Option<String>,
}

impl ChatTurn {
    pub fn new(message: impl Into<String>) -> Self {
        ChatTurn {
            message: message.into(),
            reply: None,
            error: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.reply.is_some() || self.error.is_some()
    }
}

/// Outcome of one backend round trip. Failure details are already
/// user-facing text; the gateway normalized them.
#[derive(Debug, Clone)]
pub enum TurnMessage {
    Reply(AssistantReply),
    Failed(String),
}

/// An outcome tagged with the turn it belongs to. The tag lets the
/// receiving side drop results from turns it no longer cares about.
pub type TurnOutcome = (TurnMessage, u64);

/// Dispatches backend round trips onto the runtime and reports each result
/// back over a channel, tagged with its turn id.
pub struct TurnService {
    tx: UnboundedSender<TurnOutcome>,
}

impl TurnService {
    pub fn new() -> (Self, UnboundedReceiver<TurnOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TurnService { tx }, rx)
    }

    /// Resolve one turn in the background. The spawned task owns its
    /// gateway clone and message; results arrive on the receiver paired
    /// with this service.
    pub fn spawn_turn(&self, gateway: AssistantGateway, message: String, turn_id: u64) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            debug!(turn_id, "dispatching turn to backend");
            let outcome = match gateway.send_message(&message).await {
                Ok(reply) => TurnMessage::Reply(reply),
                Err(err) => TurnMessage::Failed(err.to_string()),
            };
            // A closed receiver means the UI already shut down.
            let _ = tx.send((outcome, turn_id));
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, message: TurnMessage, turn_id: u64) {
        let _ = self.tx.send((message, turn_id));
    }
}
