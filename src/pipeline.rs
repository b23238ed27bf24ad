//! One chat turn: gate the question, record it with the profile context,
//! ask the model, check the answer, record the answer.
//!
//! Every way a turn can end is a [`TurnOutcome`] value. Each step appends a
//! whole turn or nothing, so an aborted turn never leaves half a record.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::constants::{
    OFF_TOPIC_ANSWER_NOTICE, OFF_TOPIC_QUESTION_NOTICE, PROFILE_INCOMPLETE_NOTICE,
    SYSTEM_INSTRUCTION,
};
use crate::conversation::Role;
use crate::domain_gate::is_in_domain;
use crate::llm_interaction::{ChatMessage, CompletionClient};
use crate::response_validator;
use crate::session::{ChatSession, TurnState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The domain gate found no fitness keyword in the question.
    OffTopicQuestion,
    /// The model answered with its refusal sentence.
    OffTopicAnswer,
}

impl Rejection {
    pub fn notice(&self) -> &'static str {
        match self {
            Rejection::OffTopicQuestion => OFF_TOPIC_QUESTION_NOTICE,
            Rejection::OffTopicAnswer => OFF_TOPIC_ANSWER_NOTICE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Height or weight is unset; the turn never started.
    AwaitingProfile,
    Rejected { reason: Rejection },
    Failed { error: String },
    Completed { answer: String },
}

impl TurnOutcome {
    pub fn state(&self) -> TurnState {
        match self {
            TurnOutcome::AwaitingProfile => TurnState::Idle,
            TurnOutcome::Rejected { .. } => TurnState::Rejected,
            TurnOutcome::Failed { .. } => TurnState::Failed,
            TurnOutcome::Completed { .. } => TurnState::Completed,
        }
    }

    /// Warning or error text to show next to the transcript, if any.
    pub fn notice(&self) -> Option<&str> {
        match self {
            TurnOutcome::AwaitingProfile => Some(PROFILE_INCOMPLETE_NOTICE),
            TurnOutcome::Rejected { reason } => Some(reason.notice()),
            TurnOutcome::Failed { error } => Some(error.as_str()),
            TurnOutcome::Completed { .. } => None,
        }
    }
}

/// The two messages sent for a question. Earlier turns are never included.
pub fn build_request(user_text: &str) -> [ChatMessage; 2] {
    [
        ChatMessage::system(SYSTEM_INSTRUCTION),
        ChatMessage::user(user_text),
    ]
}

/// Runs one turn against `session` and leaves `session.state` at the
/// terminal state of the returned outcome.
pub async fn run_turn(
    session: &mut ChatSession,
    user_text: &str,
    client: &dyn CompletionClient,
) -> TurnOutcome {
    let outcome = drive_turn(session, user_text, client).await;
    session.state = outcome.state();
    outcome
}

async fn drive_turn(
    session: &mut ChatSession,
    user_text: &str,
    client: &dyn CompletionClient,
) -> TurnOutcome {
    let Some(profile) = session.profile.snapshot() else {
        debug!("Profile incomplete, staying idle");
        return TurnOutcome::AwaitingProfile;
    };

    session.state = TurnState::Gating;
    if !is_in_domain(user_text) {
        warn!("Question rejected by domain gate");
        return TurnOutcome::Rejected {
            reason: Rejection::OffTopicQuestion,
        };
    }

    session.conversation.push(Role::User, user_text);
    session
        .conversation
        .push(Role::System, profile.context_sentence());

    session.state = TurnState::Dispatching;
    debug!(turns = session.conversation.len(), "Dispatching completion request");
    let answer = match client.complete(&build_request(user_text)).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!(error = %e, "Completion request failed");
            return TurnOutcome::Failed {
                error: format!("Error in generating response: {}", e),
            };
        }
    };

    if !response_validator::accepts(&answer) {
        warn!("Model refused the question as off-topic");
        return TurnOutcome::Rejected {
            reason: Rejection::OffTopicAnswer,
        };
    }

    session.conversation.push(Role::Assistant, answer.clone());
    info!(turns = session.conversation.len(), "Turn completed");
    TurnOutcome::Completed { answer }
}
