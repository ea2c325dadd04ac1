//! Network task: owns the API clients and executes UI commands.
//!
//! Each command is spawned as its own task so a slow request never blocks
//! later ones. In-flight requests are neither cancelled nor deduplicated;
//! the UI's sequence-number guard handles out-of-order list responses.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use paperdesk_api::{ApiError, ChatClient, PaperClient};

use crate::tui_event::{BackendCommand, BackendEvent, FetchOutcome};

pub struct BackendContext {
    pub identity: String,
    pub papers: PaperClient,
    pub chat: ChatClient,
}

/// Receive commands until the channel closes or shutdown is requested.
pub async fn run(
    ctx: Arc<BackendContext>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            maybe_cmd = cmd_rx.recv() => {
                let Some(cmd) = maybe_cmd else { break };
                let ctx = ctx.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    handle_command(&ctx, cmd, &tx).await;
                });
            }
        }
    }
}

async fn handle_command(
    ctx: &BackendContext,
    cmd: BackendCommand,
    tx: &mpsc::UnboundedSender<BackendEvent>,
) {
    match cmd {
        BackendCommand::ListPapers { seq } => {
            let event = match ctx.papers.list_papers(&ctx.identity).await {
                Ok(papers) => BackendEvent::PapersLoaded { seq, papers },
                Err(e) => {
                    tracing::warn!(error = %e, "list refresh failed");
                    BackendEvent::PapersFailed {
                        seq,
                        error: user_message(&e),
                    }
                }
            };
            let _ = tx.send(event);
        }
        BackendCommand::UploadPaper { path } => {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => ctx
                    .papers
                    .upload_paper(&ctx.identity, &file_name, bytes)
                    .await
                    .map_err(|e| user_message(&e)),
                Err(e) => Err(format!("could not read {}: {e}", path.display())),
            };
            let _ = tx.send(BackendEvent::UploadFinished { result });
        }
        BackendCommand::DeletePaper { id, title } => {
            let result = ctx
                .papers
                .delete_paper(&ctx.identity, &title)
                .await
                .map_err(|e| user_message(&e));
            let _ = tx.send(BackendEvent::DeleteFinished { id, result });
        }
        BackendCommand::FetchPaper { paper_id } => {
            let outcome = match ctx.papers.get_paper(&ctx.identity, &paper_id).await {
                Ok(Some(paper)) => FetchOutcome::Found(paper),
                Ok(None) => FetchOutcome::Missing,
                Err(e) => FetchOutcome::Failed(user_message(&e)),
            };
            let _ = tx.send(BackendEvent::PaperFetched { paper_id, outcome });
        }
        BackendCommand::Ask { paper_id, question } => {
            // ask() never fails; the fallback reply is produced client-side.
            let answer = ctx.chat.ask(&paper_id, &question).await;
            let _ = tx.send(BackendEvent::AnswerReady { paper_id, answer });
        }
    }
}

/// User-facing rendering of an API error: server detail verbatim, everything
/// else through Display.
fn user_message(err: &ApiError) -> String {
    match err {
        ApiError::Server { detail, .. } => detail.clone(),
        other => other.to_string(),
    }
}
