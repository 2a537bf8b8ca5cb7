//! # Site Configuration
//!
//! Configuration is resolved once at process start and then passed by
//! reference to whatever needs it; nothing in the crate reads the
//! environment on its own.
//!
//! Sources, later ones winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config path`)
//! 3. Environment variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `WRAPWEFT_SUPABASE_URL` (or `NEXT_PUBLIC_SUPABASE_URL`) | `remote.url` |
//! | `WRAPWEFT_SUPABASE_ANON_KEY` (or `NEXT_PUBLIC_SUPABASE_ANON_KEY`) | `remote.anon_key` |
//! | `WRAPWEFT_REPORT_LEAD_FAILURES` | `contact.report_failure_to_user` |
//!
//! ```toml
//! [remote]
//! url = "https://example.supabase.co"
//! anon_key = "public-anon-key"
//!
//! [contact]
//! report_failure_to_user = true
//!
//! [deck]
//! output_dir = "exports"
//! ```

use crate::deck::DeckContent;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub remote: Option<RemoteConfig>,
    pub contact: ContactConfig,
    pub deck: DeckConfig,
}

/// Connection settings for the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout_secs: u64,
    pub collections_table: String,
    pub contacts_table: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            timeout_secs: 10,
            collections_table: "collections".to_string(),
            contacts_table: "contacts".to_string(),
        }
    }
}

impl RemoteConfig {
    /// A remote store counts as configured only when both URL and key are set.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

/// Lead submission policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// When false, a failed insert is logged and the user still sees success.
    pub report_failure_to_user: bool,
    /// Delay applied when no lead store is configured.
    pub simulated_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub file_name: String,
    pub output_dir: PathBuf,
    pub content: DeckContent,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            file_name: "WrapWeftCo_Presentation.pptx".to_string(),
            output_dir: PathBuf::from("."),
            content: DeckContent::default(),
        }
    }
}

impl SiteConfig {
    /// Defaults, then `path` if given, then the process environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let config = config.with_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(*key).filter(|v| !v.is_empty()));

        let url = first(&["WRAPWEFT_SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]);
        let key = first(&["WRAPWEFT_SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]);
        if url.is_some() || key.is_some() {
            let remote = self.remote.get_or_insert_with(RemoteConfig::default);
            if let Some(url) = url {
                remote.url = url;
            }
            if let Some(key) = key {
                remote.anon_key = key;
            }
        }

        if let Some(flag) = first(&["WRAPWEFT_REPORT_LEAD_FAILURES"]) {
            self.contact.report_failure_to_user =
                matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        self
    }

    /// The remote settings, only when they are complete.
    pub fn remote(&self) -> Option<&RemoteConfig> {
        self.remote.as_ref().filter(|remote| remote.is_configured())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = self.remote() {
            if !(remote.url.starts_with("http://") || remote.url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "remote.url must be an http(s) URL, got {:?}",
                    remote.url
                )));
            }
            if remote.timeout_secs == 0 {
                return Err(ConfigError::Invalid("remote.timeout_secs must be positive".into()));
            }
        }
        if self.deck.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("deck.file_name must not be empty".into()));
        }
        Ok(())
    }
}
