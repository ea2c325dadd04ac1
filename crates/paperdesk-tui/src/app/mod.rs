mod backend;
mod update;

use std::path::PathBuf;

use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;

use paperdesk_api::Paper;

use crate::model::chat::ChatState;
use crate::model::library::filtered_indices;
use crate::model::upload::UploadState;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Library,
    Upload,
    Chat,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Compose,
}

/// State for the upload screen's file picker.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory (dirs first, then files).
    pub entries: Vec<FileEntry>,
    /// Cursor position in the entries list.
    pub cursor: usize,
}

/// A single entry in the file picker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_pdf: bool,
}

impl FilePickerState {
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut state = Self {
            current_dir,
            entries: Vec::new(),
            cursor: 0,
        };
        state.refresh_entries();
        state
    }

    /// Refresh the entries list from the current directory.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        // Parent directory entry
        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                is_pdf: false,
            });
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.current_dir) {
            let mut dirs = Vec::new();
            let mut files = Vec::new();

            for entry in read_dir.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden files/dirs
                if name.starts_with('.') {
                    continue;
                }

                if path.is_dir() {
                    dirs.push(FileEntry {
                        name,
                        path,
                        is_dir: true,
                        is_pdf: false,
                    });
                } else {
                    let is_pdf = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.eq_ignore_ascii_case("pdf"))
                        .unwrap_or(false);
                    files.push(FileEntry {
                        name,
                        path,
                        is_dir: false,
                        is_pdf,
                    });
                }
            }

            dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            entries.extend(dirs);
            entries.extend(files);
        }

        self.entries = entries;
        self.cursor = 0;
    }

    /// Enter the directory at cursor, or return false if not a directory.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_dir
        {
            self.current_dir = entry.path.clone();
            self.refresh_entries();
            return true;
        }
        false
    }
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    /// Height of the visible list area (set on resize, used for page up/down).
    pub visible_rows: usize,

    /// Identity shown in the footer. The network task holds its own copy and
    /// threads it through every backend call.
    pub identity: String,

    // Library screen
    /// The server-authoritative collection, wholly replaced on every
    /// successful refresh. Never patched optimistically.
    pub papers: Vec<Paper>,
    /// Indices into `papers` matching the current search query.
    pub filtered: Vec<usize>,
    pub cursor: usize,
    pub search_query: String,
    /// Sequence number of the most recently issued list refresh. Responses
    /// tagged with an older number are discarded on arrival.
    pub list_seq: u64,
    /// A refresh is outstanding.
    pub list_pending: bool,
    /// At least one refresh has completed (drives the empty-state copy).
    pub loaded_once: bool,
    /// Stable id of the paper awaiting delete confirmation.
    pub confirm_delete: Option<String>,
    /// One-line message area for errors and results.
    pub status: Option<String>,

    // Upload screen
    pub upload: UploadState,
    pub file_picker: FilePickerState,

    // Chat screen (None unless the chat screen is open)
    pub chat: Option<ChatState>,

    /// Channel to send commands to the network task.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(identity: String, theme: Theme) -> Self {
        Self {
            screen: Screen::Library,
            input_mode: InputMode::Normal,
            theme,
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            visible_rows: 20,
            identity,
            papers: Vec::new(),
            filtered: Vec::new(),
            cursor: 0,
            search_query: String::new(),
            list_seq: 0,
            list_pending: false,
            loaded_once: false,
            confirm_delete: None,
            status: None,
            upload: UploadState::default(),
            file_picker: FilePickerState::new(),
            chat: None,
            backend_cmd_tx: None,
        }
    }

    pub(crate) fn send(&self, cmd: BackendCommand) {
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(cmd);
        }
    }

    /// Issue a collection refresh tagged with a fresh sequence number.
    pub fn request_refresh(&mut self) {
        self.list_seq += 1;
        self.list_pending = true;
        self.send(BackendCommand::ListPapers { seq: self.list_seq });
    }

    /// Recompute `filtered` for the current query.
    ///
    /// Stabilises the cursor: if the paper previously under the cursor is
    /// still present after filtering, the cursor follows it to its new row.
    pub fn recompute_filtered(&mut self) {
        let prev_id = self.selected_paper().map(|p| p.id.clone());

        self.filtered = filtered_indices(&self.papers, &self.search_query);

        if let Some(id) = prev_id
            && let Some(new_pos) = self
                .filtered
                .iter()
                .position(|&i| self.papers[i].id == id)
        {
            self.cursor = new_pos;
            return;
        }
        self.cursor = self.cursor.min(self.filtered.len().saturating_sub(1));
    }

    /// The paper under the cursor (selection follows the cursor).
    pub fn selected_paper(&self) -> Option<&Paper> {
        self.filtered
            .get(self.cursor)
            .and_then(|&i| self.papers.get(i))
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        let chunks = Layout::vertical([
            Constraint::Length(1), // header bar
            Constraint::Min(5),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

        crate::view::header::render(f, chunks[0], self);

        let screen = self.screen.clone();
        match screen {
            Screen::Library => crate::view::library::render_in(f, self, chunks[1], chunks[2]),
            Screen::Upload => crate::view::upload::render_in(f, self, chunks[1], chunks[2]),
            Screen::Chat => crate::view::chat::render_in(f, self, chunks[1], chunks[2]),
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if let Some(id) = self.confirm_delete.clone() {
            let title = self
                .papers
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.title.clone())
                .unwrap_or_default();
            crate::view::confirm::render_delete(f, &self.theme, &title);
        }

        if self.confirm_quit {
            crate::view::confirm::render_quit(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
