use thiserror::Error;

pub mod chat;
pub mod client;
pub mod paper;
pub mod session;

// Re-export for convenience
pub use chat::{ChatClient, FALLBACK_ANSWER};
pub use client::{ApiConfig, PaperClient, looks_like_pdf};
pub use paper::Paper;
pub use session::IdentityStore;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Local media-type validation failed; no request was sent.
    #[error("please select a PDF file")]
    InvalidFileType,
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response; `detail` carries the backend's message verbatim
    /// when one was provided.
    #[error("server error (HTTP {status}): {detail}")]
    Server { status: u16, detail: String },
    #[error("unexpected response shape: {0}")]
    Unexpected(String),
}
