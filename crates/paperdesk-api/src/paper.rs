//! The `Paper` record and its tolerant wire decoding.
//!
//! The backend is not consistent about how it encodes list-valued metadata:
//! depending on the storage path, `authors` and `tags` arrive either as a
//! JSON array or as a JSON-encoded string *containing* an array. Both forms
//! decode to the same `Vec<String>`; anything malformed degrades to an empty
//! sequence rather than failing the surrounding response.

use serde::{Deserialize, Deserializer};

/// One uploaded document's extracted metadata record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paper {
    /// Stable identifier assigned by the backend.
    #[serde(default)]
    pub id: String,
    /// Secondary identifier, display-only.
    #[serde(default)]
    pub paper_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "seq_or_encoded")]
    pub authors: Vec<String>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default, deserialize_with = "seq_or_encoded")]
    pub tags: Vec<String>,
    /// Only populated in the immediate result of an upload; later list
    /// responses omit it.
    #[serde(default)]
    pub key_findings: Vec<String>,
    pub file_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl Paper {
    /// `created_at` in localized short form ("Jan 15, 2024"); falls back to
    /// the raw string when the timestamp doesn't parse.
    pub fn created_short(&self) -> String {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&self.created_at) {
            return dt.with_timezone(&chrono::Local).format("%b %-d, %Y").to_string();
        }
        // Backend sometimes emits naive timestamps without an offset.
        if let Ok(naive) =
            chrono::NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
        {
            return naive.format("%b %-d, %Y").to_string();
        }
        self.created_at.clone()
    }
}

/// Accept a sequence of strings delivered either directly or as a
/// JSON-encoded string. Malformed input decodes to empty, never errors.
fn seq_or_encoded<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Seq(Vec<String>),
        Encoded(String),
        Other(serde_json::Value),
    }

    Ok(match Wire::deserialize(deserializer) {
        Ok(Wire::Seq(items)) => items,
        Ok(Wire::Encoded(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::debug!(error = %e, "malformed string-encoded sequence, using empty");
                Vec::new()
            }
        },
        Ok(Wire::Other(v)) => {
            tracing::debug!(value = %v, "unexpected sequence encoding, using empty");
            Vec::new()
        }
        Err(_) => Vec::new(),
    })
}
