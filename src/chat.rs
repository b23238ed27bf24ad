// Terminal chat: the same turn pipeline as the web UI, one line per question.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::conversation::Role;
use crate::llm_interaction::CompletionClient;
use crate::pipeline::{run_turn, TurnOutcome};
use crate::session::ChatSession;

const CLEAR_COMMAND: &str = "/clear";
const QUIT_COMMAND: &str = "/quit";

/// Reads questions from `input` until EOF or `/quit`, writing the transcript to `output`.
pub async fn run_terminal_chat<R, W>(
    session: &mut ChatSession,
    client: &dyn CompletionClient,
    input: R,
    mut output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Starting terminal chat session...");
    let mut lines = input.lines();

    if let Some(profile) = session.profile.snapshot() {
        write_line(&mut output, &profile.context_sentence()).await?;
    }
    write_line(
        &mut output,
        "Ask a fitness question... (/clear to clear history, /quit to exit)",
    )
    .await?;

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == QUIT_COMMAND {
            break;
        }
        if text == CLEAR_COMMAND {
            session.clear_history();
            write_line(&mut output, "Chat history cleared.").await?;
            continue;
        }

        let outcome = run_turn(session, text, client).await;
        match &outcome {
            TurnOutcome::Completed { answer } => {
                write_line(&mut output, &format!("{}: {}", speaker(Role::Assistant), answer)).await?;
                write_line(&mut output, "---").await?;
            }
            TurnOutcome::Failed { error } => {
                write_line(&mut output, &format!("[error] {}", error)).await?;
            }
            TurnOutcome::Rejected { reason } => {
                write_line(&mut output, &format!("[warning] {}", reason.notice())).await?;
            }
            TurnOutcome::AwaitingProfile => {
                write_line(&mut output, &format!("[warning] {}", outcome.notice().unwrap_or_default())).await?;
            }
        }
    }

    info!(turns = session.conversation.len(), "Chat session finished.");
    Ok(())
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::System => "System",
        Role::Assistant => "Assistant",
    }
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
