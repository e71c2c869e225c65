use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base address of the external processing service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bulk export settings
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// Settings for the bulk export archive
#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Folder name inside the archive; also names the `.zip` itself
    #[serde(default = "default_folder")]
    pub folder: String,
}

fn default_folder() -> String {
    "cinematic_snapshots".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults on any
    /// read or parse failure. The `CINEGRADE_API_URL` environment variable
    /// overrides the configured service address.
    pub fn load(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        };

        if let Ok(url) = std::env::var("CINEGRADE_API_URL") {
            config.api_base_url = url;
        }

        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            export: ExportConfig::default(),
        }
    }
}
