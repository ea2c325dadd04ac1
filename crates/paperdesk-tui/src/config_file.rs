use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub backend: Option<BackendConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/paperdesk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("paperdesk").join("config.toml"))
}

/// Load config by cascading CWD `.paperdesk.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".paperdesk.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        backend: Some(BackendConfig {
            base_url: overlay
                .backend
                .as_ref()
                .and_then(|b| b.base_url.clone())
                .or_else(|| base.backend.as_ref().and_then(|b| b.base_url.clone())),
            api_key: overlay
                .backend
                .as_ref()
                .and_then(|b| b.api_key.clone())
                .or_else(|| base.backend.as_ref().and_then(|b| b.api_key.clone())),
            timeout_secs: overlay
                .backend
                .as_ref()
                .and_then(|b| b.timeout_secs)
                .or_else(|| base.backend.as_ref().and_then(|b| b.timeout_secs)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_round_trip_toml() {
        let config = ConfigFile {
            backend: Some(BackendConfig {
                base_url: Some("http://papers.example:8000".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            parsed.backend.unwrap().base_url.unwrap(),
            "http://papers.example:8000"
        );
    }

    #[test]
    fn absent_fields_deserialize_as_none() {
        let toml_str = "[backend]\nbase_url = \"http://localhost:8000\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let backend = parsed.backend.unwrap();
        assert!(backend.api_key.is_none());
        assert!(backend.timeout_secs.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            backend: Some(BackendConfig {
                base_url: Some("http://base:8000".to_string()),
                api_key: Some("base-key".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            backend: Some(BackendConfig {
                base_url: Some("http://overlay:8000".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        let backend = merged.backend.unwrap();
        assert_eq!(backend.base_url.unwrap(), "http://overlay:8000");
        // Absent overlay field falls back to base.
        assert_eq!(backend.api_key.unwrap(), "base-key");
    }

    #[test]
    fn merge_theme_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            display: Some(DisplayConfig {
                theme: Some("modern".to_string()),
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.display.unwrap().theme.unwrap(), "modern");
    }
}
