// Application configuration
// Defaults, overridden by LPP_* environment variables, overridden again by CLI flags

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BATCH_DELAY_MS: u64 = 500;
pub const DEFAULT_BATCH_LIMIT: usize = 100;

pub const METADATA_FILE: &str = "metadata.json";
pub const CATALOG_FILE: &str = "problems.json";
pub const MANIFEST_FILE: &str = "AllProblems.h";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub root: PathBuf,
    pub api_url: String,
    pub api_timeout: Duration,
    /// Pause between items of a batch, to respect the API's rate limit
    pub batch_delay: Duration,
    /// Page size used when paging through the problem list
    pub batch_limit: usize,
    /// Optional solution template overriding the embedded one
    pub template_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            batch_delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
            batch_limit: DEFAULT_BATCH_LIMIT,
            template_path: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse_u64 = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            root: lookup("LPP_ROOT").map(PathBuf::from).unwrap_or(defaults.root),
            api_url: lookup("LPP_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            api_timeout: parse_u64("LPP_API_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.api_timeout),
            batch_delay: parse_u64("LPP_BATCH_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.batch_delay),
            batch_limit: parse_u64("LPP_BATCH_LIMIT")
                .filter(|limit| *limit > 0)
                .map(|limit| limit as usize)
                .unwrap_or(defaults.batch_limit),
            template_path: lookup("LPP_TEMPLATE").map(PathBuf::from),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn problems_dir(&self) -> PathBuf {
        self.root.join("src").join("Problems")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.problems_dir().join(MANIFEST_FILE)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }
}
