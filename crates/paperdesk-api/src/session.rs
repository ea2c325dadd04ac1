//! Per-user session identity.
//!
//! The backend scopes every collection to an opaque identity string. The
//! store keeps exactly one such string in a file under the platform data
//! directory, created lazily on first access and reused until explicitly
//! cleared. Identity is always passed to the clients as an argument, never
//! read from ambient state.

use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const IDENTITY_FILE: &str = "identity";

pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    /// Store at the platform data directory: `<data_dir>/paperdesk/identity`.
    pub fn open_default() -> Option<Self> {
        let dir = dirs::data_dir()?.join("paperdesk");
        Some(Self {
            path: dir.join(IDENTITY_FILE),
        })
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The persisted identity, creating and persisting a new one if absent.
    pub fn get(&self) -> io::Result<String> {
        if let Ok(existing) = std::fs::read_to_string(&self.path) {
            let trimmed = existing.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }

        let identity = generate_identity();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &identity)?;
        tracing::info!(identity = %identity, "created new user session");
        Ok(identity)
    }

    /// Remove the persisted identity; the next [`get`](Self::get) generates
    /// a fresh one.
    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// `user_<unix-millis>_<random-suffix>`: collision-resistant by timestamp
/// plus suffix, not cryptographically unique.
pub fn generate_identity() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let suffix: String = (0..9)
        .map(|_| ALPHABET[fastrand::usize(..ALPHABET.len())] as char)
        .collect();
    format!("user_{millis}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_persists_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::at(dir.path().join("identity"));

        let first = store.get().unwrap();
        let second = store.get().unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("user_"));
    }

    #[test]
    fn clear_then_get_yields_fresh_identity() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::at(dir.path().join("identity"));

        let first = store.get().unwrap();
        store.clear().unwrap();
        let second = store.get().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn clear_on_missing_store_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::at(dir.path().join("never-created"));
        assert!(store.clear().is_ok());
    }

    #[test]
    fn get_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::at(dir.path().join("nested").join("deeper").join("identity"));
        assert!(store.get().is_ok());
    }
}
