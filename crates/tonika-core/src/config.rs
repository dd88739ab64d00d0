//! Service configuration.
//!
//! Resolution order: built-in defaults, then `tonika.toml` (or an explicit
//! path), then `TONIKA_*` environment variables. CLI flags are applied on
//! top by the binary.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::analysis::SanitizePolicy;
use crate::error::{CoreError, CoreResult};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "tonika.toml";

/// Default text-classification model.
pub const DEFAULT_MODEL_ID: &str = "tired-racoon/tonika_sentim";

/// Default inference server URL.
pub const DEFAULT_MODEL_URL: &str = "http://127.0.0.1:8080";

/// Default API URL used by the dashboard.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
    pub cors: CorsSettings,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_upload_bytes: 20 * 1024 * 1024,
            cors: CorsSettings::default(),
        }
    }
}

/// Cross-origin policy.
///
/// An empty origin list allows any origin, and then credentials are never
/// allowed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsSettings {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub url: String,
    pub model_id: String,
    pub timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_MODEL_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub sanitize_single_text: bool,
    pub sanitize_batch: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sanitize_single_text: true,
            sanitize_batch: true,
        }
    }
}

impl AnalysisSettings {
    pub fn policy(&self) -> SanitizePolicy {
        SanitizePolicy {
            single_text: self.sanitize_single_text,
            batch: self.sanitize_batch,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from `tonika.toml` when present,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let default_path = Path::new(CONFIG_FILE);
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None if default_path.exists() => Self::from_file(default_path)?,
            None => Self::default(),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading configuration");
        Self::from_toml_str(&content)
            .map_err(|e| CoreError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::config(e.to_string()))
    }

    /// Apply `TONIKA_*` environment overrides.
    pub fn apply_env(&mut self) -> CoreResult<()> {
        if let Ok(host) = std::env::var("TONIKA_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("TONIKA_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| CoreError::config(format!("TONIKA_PORT is not a port: '{port}'")))?;
        }
        if let Ok(limit) = std::env::var("TONIKA_MAX_UPLOAD_BYTES") {
            self.server.max_upload_bytes = limit.parse().map_err(|_| {
                CoreError::config(format!("TONIKA_MAX_UPLOAD_BYTES is not a size: '{limit}'"))
            })?;
        }
        if let Ok(origins) = std::env::var("TONIKA_CORS_ORIGINS") {
            self.server.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty() && o != "*")
                .collect();
        }
        if let Ok(url) = std::env::var("TONIKA_MODEL_URL") {
            self.model.url = url;
        }
        if let Ok(model_id) = std::env::var("TONIKA_MODEL_ID") {
            self.model.model_id = model_id;
        }
        Ok(())
    }

    /// Address the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
