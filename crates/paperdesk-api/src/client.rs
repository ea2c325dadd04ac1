//! HTTP repository client for the paper backend.
//!
//! Wraps the four collection operations (list, upload, delete, fetch-one).
//! Every request carries the configured timeout and, when one is set, the
//! `X-API-Key` header, applied uniformly rather than per-endpoint. No
//! operation retries automatically; callers own re-synchronizing the
//! collection after mutations.

use std::path::Path;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

use crate::ApiError;
use crate::paper::Paper;

/// Externally supplied client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base address, without a trailing slash.
    pub base_url: String,
    /// Attached as `X-API-Key` on every request when set.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct PaperClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl PaperClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, url).timeout(self.config.timeout);
        if let Some(ref key) = self.config.api_key {
            req = req.header("X-API-Key", key);
        }
        req
    }

    /// Fetch the full collection for one identity.
    ///
    /// A missing or null `papers` field is an empty collection. Elements that
    /// fail to decode are dropped individually rather than failing the whole
    /// list (field-level leniency lives in [`Paper`]'s deserializer).
    pub async fn list_papers(&self, identity: &str) -> Result<Vec<Paper>, ApiError> {
        let url = format!(
            "{}/papers?user_id={}",
            self.config.base_url,
            urlencoding::encode(identity)
        );
        let resp = self.request(Method::GET, url).send().await?;
        let resp = error_for_detail(resp).await?;
        let body: Value = resp.json().await?;

        let items = body["papers"].as_array().cloned().unwrap_or_default();
        let mut papers = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Paper>(item) {
                Ok(paper) => papers.push(paper),
                Err(e) => tracing::debug!(error = %e, "dropping undecodable paper record"),
            }
        }
        Ok(papers)
    }

    /// Upload one PDF and return the extracted record, including
    /// `key_findings`.
    ///
    /// The media type is validated locally first: a non-PDF payload is
    /// rejected with [`ApiError::InvalidFileType`] and no request is sent.
    /// Does not refresh the collection; callers re-issue
    /// [`list_papers`](Self::list_papers) afterward.
    pub async fn upload_paper(
        &self,
        identity: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Paper, ApiError> {
        if !looks_like_pdf(file_name, &bytes) {
            return Err(ApiError::InvalidFileType);
        }

        let url = format!("{}/upload", self.config.base_url);
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("user_id", identity.to_string());

        let resp = self.request(Method::POST, url).multipart(form).send().await?;
        let resp = error_for_detail(resp).await?;
        let body: Value = resp.json().await?;

        match body.get("paper") {
            Some(record) => serde_json::from_value(record.clone())
                .map_err(|e| ApiError::Unexpected(format!("upload result: {e}"))),
            None => Err(ApiError::Unexpected("upload result missing paper".into())),
        }
    }

    /// Delete one paper.
    ///
    /// The wire contract keys deletion by title; callers resolve the title
    /// from the paper's stable identifier at confirmation time. Interactive
    /// confirmation is owned by the caller. On failure the server-side
    /// collection is untouched.
    pub async fn delete_paper(&self, identity: &str, title: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}/papers/{}?user_id={}",
            self.config.base_url,
            urlencoding::encode(title),
            urlencoding::encode(identity)
        );
        let resp = self.request(Method::DELETE, url).send().await?;
        error_for_detail(resp).await?;
        Ok(())
    }

    /// Fetch one paper by its stable identifier.
    ///
    /// `Ok(None)` means the record is absent (404, or a 2xx body that isn't
    /// a paper); `Err` means the request itself failed. The two get distinct
    /// UI treatment.
    pub async fn get_paper(
        &self,
        identity: &str,
        paper_id: &str,
    ) -> Result<Option<Paper>, ApiError> {
        let url = format!(
            "{}/papers/{}?user_id={}",
            self.config.base_url,
            urlencoding::encode(paper_id),
            urlencoding::encode(identity)
        );
        let resp = self.request(Method::GET, url).send().await?;
        if resp.status().as_u16() == 404 {
            return Ok(None);
        }
        let resp = error_for_detail(resp).await?;
        let body: Value = resp.json().await?;

        match serde_json::from_value::<Paper>(body) {
            Ok(paper) => Ok(Some(paper)),
            Err(e) => {
                tracing::debug!(paper_id, error = %e, "paper body not decodable, treating as absent");
                Ok(None)
            }
        }
    }
}

/// Map a non-2xx response to [`ApiError::Server`], surfacing the backend's
/// `detail` message verbatim when present.
async fn error_for_detail(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let detail = match resp.json::<Value>().await {
        Ok(body) => body["detail"].as_str().map(str::to_string),
        Err(_) => None,
    }
    .unwrap_or_else(|| format!("HTTP {status}"));
    Err(ApiError::Server {
        status: status.as_u16(),
        detail,
    })
}

/// Local media-type gate for uploads: PDF extension or `%PDF-` magic.
pub fn looks_like_pdf(file_name: &str, bytes: &[u8]) -> bool {
    let ext_is_pdf = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    ext_is_pdf || bytes.starts_with(b"%PDF-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_is_accepted_case_insensitively() {
        assert!(looks_like_pdf("paper.pdf", b""));
        assert!(looks_like_pdf("PAPER.PDF", b""));
    }

    #[test]
    fn pdf_magic_is_accepted_without_extension() {
        assert!(looks_like_pdf("download", b"%PDF-1.7 ..."));
    }

    #[test]
    fn other_files_are_rejected() {
        assert!(!looks_like_pdf("notes.txt", b"plain text"));
        assert!(!looks_like_pdf("archive.zip", b"PK\x03\x04"));
    }

    /// The non-PDF rejection happens before any request is built: even with
    /// an unroutable base URL the error is the local validation one.
    #[tokio::test]
    async fn upload_rejects_non_pdf_without_network() {
        let client = PaperClient::new(ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiConfig::default()
        });
        let err = client
            .upload_paper("user_1_a", "notes.txt", b"plain text".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidFileType));
    }
}
