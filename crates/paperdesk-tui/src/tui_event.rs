use std::path::PathBuf;

use paperdesk_api::Paper;

/// Commands sent from the UI thread to the network task.
#[derive(Debug)]
pub enum BackendCommand {
    /// Refresh the collection. `seq` tags the request so late arrivals from
    /// superseded refreshes can be discarded.
    ListPapers { seq: u64 },
    /// Read the file at `path` and upload it.
    UploadPaper { path: PathBuf },
    /// Delete one paper. The UI keys the operation by stable `id`; `title`
    /// is the wire key the backend requires.
    DeletePaper { id: String, title: String },
    /// Fetch the full record backing a chat screen.
    FetchPaper { paper_id: String },
    /// One stateless question about one paper.
    Ask { paper_id: String, question: String },
}

/// Events flowing from the network task back to the UI thread.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    PapersLoaded { seq: u64, papers: Vec<Paper> },
    /// The refresh failed; the collection stays stale.
    PapersFailed { seq: u64, error: String },
    UploadFinished { result: Result<Paper, String> },
    DeleteFinished { id: String, result: Result<(), String> },
    PaperFetched { paper_id: String, outcome: FetchOutcome },
    /// Always arrives, answer or fallback, exactly one per question.
    AnswerReady { paper_id: String, answer: String },
}

/// Tagged fetch-one result: absent records and failed requests are distinct.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Found(Paper),
    Missing,
    Failed(String),
}
