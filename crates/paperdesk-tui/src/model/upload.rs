use std::path::PathBuf;

use paperdesk_api::Paper;

/// Local upload state machine:
/// `NoFile -> Selected -> Uploading -> (Succeeded | Failed)`.
///
/// `Succeeded` and `Failed` are terminal display states; selecting a new
/// file resets to `Selected` and clears the previous result or error.
#[derive(Debug, Clone)]
pub enum UploadPhase {
    NoFile,
    Selected(PathBuf),
    /// File name shown next to the spinner while the request is in flight.
    Uploading(String),
    /// Full returned record, including `key_findings` (only present here;
    /// later list responses omit them).
    Succeeded(Paper),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct UploadState {
    pub phase: UploadPhase,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            phase: UploadPhase::NoFile,
        }
    }
}

impl UploadState {
    /// A new file selection resets the machine and clears prior result/error.
    pub fn select(&mut self, path: PathBuf) {
        self.phase = UploadPhase::Selected(path);
    }

    pub fn selected_path(&self) -> Option<&PathBuf> {
        match &self.phase {
            UploadPhase::Selected(path) => Some(path),
            _ => None,
        }
    }

    pub fn in_progress(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading(_))
    }
}
