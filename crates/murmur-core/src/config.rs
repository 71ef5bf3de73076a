use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the murmur client.
///
/// Loaded from `~/.murmur/config.toml` by default. Each section corresponds
/// to one collaborator boundary: the terminal itself, the conversational
/// backend, and the speech-synthesis backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MurmurConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl Default for MurmurConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            chat: ChatConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl MurmurConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MurmurConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Terminal-facing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Render replies with non-ASCII characters escaped.
    pub escape_output: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            escape_output: false,
        }
    }
}

/// Conversational backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Base URL of the conversational backend.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub access_token: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8800".to_string(),
            access_token: String::new(),
            timeout_secs: 120,
        }
    }
}

/// Speech-synthesis backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Base URL of the synthesis model server.
    pub endpoint: String,
    /// Speaker identity used for every reply.
    pub speaker_id: u32,
    /// Path the synthesized WAV is written to. Overwritten each turn.
    pub output_path: PathBuf,
    /// Language marker token wrapped around each reply before synthesis.
    pub language_marker: String,
    /// Speaker roster printed at startup, indexed by speaker id.
    pub speakers: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:7860".to_string(),
            speaker_id: 0,
            output_path: PathBuf::from("reply.wav"),
            language_marker: "ZH".to_string(),
            speakers: Vec::new(),
        }
    }
}
