use crate::action::Action;
use crate::app::{App, InputMode, Screen};
use crate::model::chat::{ChatMessage, ChatState, Role};
use crate::model::upload::UploadPhase;
use crate::tui_event::BackendCommand;

/// Append or backspace-delete on a simple end-of-line edit buffer.
fn edit_text(buffer: &mut String, ch: char) {
    if ch == '\x08' {
        buffer.pop();
    } else {
        buffer.push(ch);
    }
}

impl App {
    /// Process a user action and update state. Returns true if the app
    /// should quit.
    pub fn update(&mut self, action: Action) -> bool {
        // Passive actions first; they apply regardless of modals.
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                return false;
            }
            Action::Resize(_w, h) => {
                self.visible_rows = (h as usize).saturating_sub(8).max(1);
                return false;
            }
            _ => {}
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return false;
        }

        // Help overlay
        if self.show_help {
            if matches!(
                action,
                Action::ToggleHelp | Action::NavigateBack | Action::Quit
            ) {
                self.show_help = false;
            }
            return false;
        }

        // Delete confirmation modal: Enter confirms, Esc cancels
        if let Some(id) = self.confirm_delete.clone() {
            match action {
                Action::DrillIn => {
                    self.confirm_delete = None;
                    self.confirm_selected_delete(&id);
                }
                Action::NavigateBack | Action::Delete => {
                    self.confirm_delete = None;
                }
                Action::Quit => {
                    self.confirm_delete = None;
                    self.confirm_quit = true;
                }
                _ => {}
            }
            return false;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
                return false;
            }
            Action::ToggleHelp => {
                self.show_help = true;
                return false;
            }
            _ => {}
        }

        match self.screen {
            Screen::Library => self.update_library(action),
            Screen::Upload => self.update_upload(action),
            Screen::Chat => self.update_chat(action),
        }
        false
    }

    // ── Library screen ──────────────────────────────────────────────

    fn update_library(&mut self, action: Action) {
        if self.input_mode == InputMode::Search {
            match action {
                Action::TextInput(c) => {
                    edit_text(&mut self.search_query, c);
                    self.recompute_filtered();
                }
                Action::TextConfirm => {
                    self.input_mode = InputMode::Normal;
                }
                Action::TextCancel => {
                    self.input_mode = InputMode::Normal;
                    self.search_query.clear();
                    self.recompute_filtered();
                }
                _ => {}
            }
            return;
        }

        match action {
            Action::MoveDown => {
                if self.cursor + 1 < self.filtered.len() {
                    self.cursor += 1;
                }
            }
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::GoTop => self.cursor = 0,
            Action::GoBottom => {
                self.cursor = self.filtered.len().saturating_sub(1);
            }
            Action::PageDown => {
                self.cursor = (self.cursor + self.visible_rows)
                    .min(self.filtered.len().saturating_sub(1));
            }
            Action::PageUp => {
                self.cursor = self.cursor.saturating_sub(self.visible_rows);
            }
            Action::StartSearch => {
                self.input_mode = InputMode::Search;
            }
            Action::DrillIn => self.open_chat(),
            Action::Delete => {
                let selected = self.selected_paper().map(|p| p.id.clone());
                if let Some(id) = selected {
                    self.confirm_delete = Some(id);
                }
            }
            Action::OpenUpload => {
                self.screen = Screen::Upload;
                self.file_picker.refresh_entries();
            }
            Action::Refresh => self.request_refresh(),
            Action::NavigateBack => {
                if !self.search_query.is_empty() {
                    self.search_query.clear();
                    self.recompute_filtered();
                }
            }
            _ => {}
        }
    }

    /// Open the chat screen for the selected paper; the full record is
    /// fetched independently of the list.
    fn open_chat(&mut self) {
        let Some(paper) = self.selected_paper() else {
            return;
        };
        let paper_id = if paper.id.is_empty() {
            paper.paper_id.clone()
        } else {
            paper.id.clone()
        };
        if paper_id.is_empty() {
            return;
        }
        self.chat = Some(ChatState::new(paper_id.clone()));
        self.screen = Screen::Chat;
        self.input_mode = InputMode::Compose;
        self.send(BackendCommand::FetchPaper { paper_id });
    }

    /// Delete is keyed by stable id; the title is the wire key and is
    /// resolved from the collection at confirmation time.
    fn confirm_selected_delete(&mut self, id: &str) {
        let Some(paper) = self.papers.iter().find(|p| p.id == id) else {
            return;
        };
        let title = paper.title.clone();
        self.status = Some(format!("Deleting \u{201C}{title}\u{201D}..."));
        self.send(BackendCommand::DeletePaper {
            id: id.to_string(),
            title,
        });
    }

    // ── Upload screen ───────────────────────────────────────────────

    fn update_upload(&mut self, action: Action) {
        match action {
            Action::MoveDown => {
                if self.file_picker.cursor + 1 < self.file_picker.entries.len() {
                    self.file_picker.cursor += 1;
                }
            }
            Action::MoveUp => {
                self.file_picker.cursor = self.file_picker.cursor.saturating_sub(1);
            }
            Action::GoTop => self.file_picker.cursor = 0,
            Action::GoBottom => {
                self.file_picker.cursor = self.file_picker.entries.len().saturating_sub(1);
            }
            Action::DrillIn => self.pick_entry(),
            Action::StartUpload => self.start_upload(),
            Action::NavigateBack => {
                self.screen = Screen::Library;
            }
            Action::Refresh => self.request_refresh(),
            _ => {}
        }
    }

    /// Enter a directory, or select the file under the cursor. Non-PDF
    /// files are rejected here, before ever entering the selected state.
    /// File selection is disabled while an upload is in flight.
    fn pick_entry(&mut self) {
        if self.upload.in_progress() {
            return;
        }
        if self.file_picker.enter_directory() {
            return;
        }
        let Some(entry) = self.file_picker.entries.get(self.file_picker.cursor) else {
            return;
        };
        if entry.is_pdf {
            let path = entry.path.clone();
            self.upload.select(path);
            self.status = None;
        } else {
            self.status = Some("Please select a PDF file".to_string());
        }
    }

    fn start_upload(&mut self) {
        if self.upload.in_progress() {
            return;
        }
        let Some(path) = self.upload.selected_path().cloned() else {
            return;
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.upload.phase = UploadPhase::Uploading(file_name);
        self.send(BackendCommand::UploadPaper { path });
    }

    // ── Chat screen ─────────────────────────────────────────────────

    fn update_chat(&mut self, action: Action) {
        match action {
            Action::TextInput(c) => {
                if let Some(chat) = &mut self.chat {
                    edit_text(&mut chat.compose, c);
                }
            }
            Action::TextConfirm => self.send_question(),
            Action::TextCancel | Action::NavigateBack => {
                // Transcript is transient: dropped on leaving the screen.
                self.chat = None;
                self.screen = Screen::Library;
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    /// Append the user bubble, mark a reply pending, and send the question.
    /// At most one question may be outstanding at a time.
    fn send_question(&mut self) {
        let Some(chat) = &mut self.chat else { return };
        if chat.pending {
            return;
        }
        let question = chat.compose.trim().to_string();
        if question.is_empty() {
            return;
        }
        chat.compose.clear();
        chat.messages.push(ChatMessage {
            role: Role::User,
            text: question.clone(),
        });
        chat.pending = true;
        let paper_id = chat.paper_id.clone();
        self.send(BackendCommand::Ask { paper_id, question });
    }
}
