use paperdesk_api::Paper;

/// Who produced a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript bubble. Held only in the active chat screen's memory;
/// never persisted or fetched retroactively.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// Result of fetching the paper record backing a chat screen.
#[derive(Debug, Clone)]
pub enum FetchPhase {
    Loading,
    Found(Paper),
    /// The record is absent server-side (distinct from a failed request).
    Missing,
    Failed(String),
}

/// State of the chat screen for one paper. Dropped on leaving the screen,
/// so a re-opened chat always starts with an empty transcript.
#[derive(Debug, Clone)]
pub struct ChatState {
    pub paper_id: String,
    pub fetch: FetchPhase,
    pub messages: Vec<ChatMessage>,
    pub compose: String,
    /// A question is outstanding; exactly one reply clears it.
    pub pending: bool,
}

impl ChatState {
    pub fn new(paper_id: String) -> Self {
        Self {
            paper_id,
            fetch: FetchPhase::Loading,
            messages: Vec::new(),
            compose: String::new(),
            pending: false,
        }
    }

    /// Paper title for the header, when the record has arrived.
    pub fn title(&self) -> Option<&str> {
        match &self.fetch {
            FetchPhase::Found(paper) => Some(paper.title.as_str()),
            _ => None,
        }
    }
}
