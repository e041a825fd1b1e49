//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use wkquiz_core::quiz::DEFAULT_STOP_WORD;

use crate::wanikani::{ReviewSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Environment variable that overrides `api_token`.
pub const TOKEN_ENV_VAR: &str = "WKQUIZ_API_TOKEN";

/// Top-level wkquiz configuration.
///
/// Note: Custom Debug impl masks the API token to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Personal access token for the WaniKani API.
    #[serde(default)]
    pub api_token: String,
    /// API root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Input that ends the quiz.
    #[serde(default = "default_stop_word")]
    pub stop_word: String,
    /// Endpoint used to decide which subjects have been reviewed.
    #[serde(default)]
    pub review_source: ReviewSource,
    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for QuizConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizConfig")
            .field("api_token", &"***")
            .field("base_url", &self.base_url)
            .field("stop_word", &self.stop_word)
            .field("review_source", &self.review_source)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_stop_word() -> String {
    DEFAULT_STOP_WORD.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: default_base_url(),
            stop_word: default_stop_word(),
            review_source: ReviewSource::default(),
            timeout_secs: default_timeout(),
        }
    }
}

impl QuizConfig {
    /// The API token, or an error if none was configured.
    pub fn require_token(&self) -> Result<&str> {
        let token = self.api_token.trim();
        anyhow::ensure!(
            !token.is_empty(),
            "no API token configured; set `api_token` in wkquiz.toml or {TOKEN_ENV_VAR}"
        );
        Ok(token)
    }

    /// Apply an environment token override and expand `${VAR}` references.
    fn resolve(mut self, env_token: Option<String>) -> Self {
        if let Some(token) = env_token.filter(|t| !t.is_empty()) {
            self.api_token = token;
        }
        self.api_token = resolve_env_vars(&self.api_token);
        self.base_url = resolve_env_vars(&self.base_url);
        self
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `wkquiz.toml` in the current directory
/// 2. `~/.config/wkquiz/config.toml`
///
/// Environment variable override: `WKQUIZ_API_TOKEN`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("wkquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    Ok(config.resolve(std::env::var(TOKEN_ENV_VAR).ok()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("wkquiz"))
}
