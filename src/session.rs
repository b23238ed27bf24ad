use serde::Serialize;

use crate::conversation::Conversation;
use crate::profile::ProfileStore;

/// Where the turn pipeline is, or where the last turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    #[default]
    Idle,
    Gating,
    Dispatching,
    Rejected,
    Completed,
    Failed,
}

impl TurnState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::Rejected | TurnState::Completed | TurnState::Failed)
    }
}

/// Everything one chat session owns. The surface holding it passes it to
/// [`crate::pipeline::run_turn`] explicitly; nothing is kept globally.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatSession {
    pub profile: ProfileStore,
    pub conversation: Conversation,
    pub state: TurnState,
}

impl ChatSession {
    pub fn new(profile: ProfileStore) -> Self {
        Self {
            profile,
            conversation: Conversation::new(),
            state: TurnState::Idle,
        }
    }

    /// Drops the whole transcript. Safe to call on an empty session.
    pub fn clear_history(&mut self) {
        self.conversation.clear();
        self.state = TurnState::Idle;
    }
}
