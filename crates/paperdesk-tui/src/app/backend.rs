use crate::app::App;
use crate::model::chat::{ChatMessage, FetchPhase, Role};
use crate::model::upload::UploadPhase;
use crate::tui_event::{BackendEvent, FetchOutcome};

impl App {
    /// Apply one completed backend event to the view state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::PapersLoaded { seq, papers } => {
                // Discard late arrivals from superseded refreshes: a stale
                // response must not overwrite a newer collection.
                if seq != self.list_seq {
                    tracing::debug!(seq, latest = self.list_seq, "discarding stale list response");
                    return;
                }
                self.list_pending = false;
                self.loaded_once = true;
                self.papers = papers;
                self.recompute_filtered();
            }
            BackendEvent::PapersFailed { seq, error } => {
                if seq != self.list_seq {
                    return;
                }
                // Collection stays stale; the failure is only surfaced.
                self.list_pending = false;
                self.status = Some(format!("Refresh failed: {error}"));
            }
            BackendEvent::UploadFinished { result } => match result {
                Ok(paper) => {
                    self.upload.phase = UploadPhase::Succeeded(paper);
                    self.status = Some("Paper uploaded and processed".to_string());
                    // Exactly one re-fetch; the success panel keeps the
                    // returned record (with key_findings) regardless.
                    self.request_refresh();
                }
                Err(error) => {
                    self.upload.phase = UploadPhase::Failed(error);
                }
            },
            BackendEvent::DeleteFinished { id, result } => match result {
                Ok(()) => {
                    self.status = Some("Paper deleted".to_string());
                    if self.selected_paper().is_some_and(|p| p.id == id) {
                        // The refresh below drops the row; the cursor clamps
                        // on recompute.
                        self.cursor = self.cursor.saturating_sub(1);
                    }
                    self.request_refresh();
                }
                Err(error) => {
                    // Failed delete: displayed collection is left untouched.
                    self.status = Some(format!("Delete failed: {error}"));
                }
            },
            BackendEvent::PaperFetched { paper_id, outcome } => {
                if let Some(chat) = &mut self.chat
                    && chat.paper_id == paper_id
                {
                    chat.fetch = match outcome {
                        FetchOutcome::Found(paper) => FetchPhase::Found(paper),
                        FetchOutcome::Missing => FetchPhase::Missing,
                        FetchOutcome::Failed(error) => FetchPhase::Failed(error),
                    };
                }
            }
            BackendEvent::AnswerReady { paper_id, answer } => {
                if let Some(chat) = &mut self.chat
                    && chat.paper_id == paper_id
                {
                    chat.messages.push(ChatMessage {
                        role: Role::Assistant,
                        text: answer,
                    });
                    chat.pending = false;
                }
            }
        }
    }
}
