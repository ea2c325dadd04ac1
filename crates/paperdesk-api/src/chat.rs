//! Per-paper question/answer exchange.
//!
//! Each call is independent: no transcript is transmitted, any multi-turn
//! memory lives server-side. The client never propagates a failure: the
//! caller always receives exactly one reply string per question.

use serde_json::Value;

use crate::ApiError;
use crate::client::ApiConfig;

/// Reply used when the backend can't be reached or returns garbage.
pub const FALLBACK_ANSWER: &str = "Sorry, I encountered an error. Please try again.";

pub struct ChatClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ChatClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Ask one question about one paper.
    ///
    /// On transport failure, a non-2xx status, or an undecodable body this
    /// resolves to [`FALLBACK_ANSWER`] rather than an error.
    pub async fn ask(&self, paper_id: &str, question: &str) -> String {
        match self.try_ask(paper_id, question).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(paper_id, error = %e, "chat request failed");
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    async fn try_ask(&self, paper_id: &str, question: &str) -> Result<String, ApiError> {
        let url = format!(
            "{}/papers/{}/chat",
            self.config.base_url,
            urlencoding::encode(paper_id)
        );
        let mut req = self
            .http
            .post(&url)
            .timeout(self.config.timeout)
            .json(&serde_json::json!({ "question": question }));
        if let Some(ref key) = self.config.api_key {
            req = req.header("X-API-Key", key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                detail: format!("HTTP {status}"),
            });
        }

        let body: Value = resp.json().await?;
        body["answer"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Unexpected("chat reply missing answer".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Transport failure still yields exactly one reply, with the fixed text.
    #[tokio::test]
    async fn ask_falls_back_on_transport_failure() {
        let client = ChatClient::new(ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: std::time::Duration::from_millis(200),
            ..ApiConfig::default()
        });
        let answer = client.ask("p1", "what is this paper about?").await;
        assert_eq!(answer, FALLBACK_ANSWER);
    }
}
