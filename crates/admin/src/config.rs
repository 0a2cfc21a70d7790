//! Admin client configuration

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;

/// Configuration loaded from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Base URL of the back-office REST API
    pub api_url: String,
    /// Per-request transport timeout for uploads and creates
    pub request_timeout: Duration,
    /// Draft storage file; the platform config directory when unset
    pub storage_path: Option<PathBuf>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            storage_path: None,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let request_timeout_ms = match get("BACKOFFICE_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("BACKOFFICE_REQUEST_TIMEOUT_MS must be a number of milliseconds")?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        Ok(Self {
            api_url: get("BACKOFFICE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            request_timeout: Duration::from_millis(request_timeout_ms),
            storage_path: get("BACKOFFICE_STORAGE_PATH").map(PathBuf::from),
        })
    }
}

/// Load `.env.local` then `.env` from the repository root, without
/// overriding variables already set.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
