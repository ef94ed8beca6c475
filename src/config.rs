//! Configuration management for appium-page

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Page configuration
///
/// The wait timeout used by `wait_text`, `wait_predicate` and friends has no
/// built-in default and must be supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    /// Timeout for text/predicate waits in milliseconds
    pub wait_timeout_ms: u64,

    /// Poll interval for text/predicate waits in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Timeout for generic element waits in milliseconds
    #[serde(default = "default_element_timeout_ms")]
    pub element_timeout_ms: u64,

    /// Poll interval for generic element waits in milliseconds
    #[serde(default = "default_element_poll_interval_ms")]
    pub element_poll_interval_ms: u64,

    /// Duration of every swipe gesture in milliseconds
    #[serde(default = "default_swipe_duration_ms")]
    pub swipe_duration_ms: u64,

    /// Delay before the failure screenshot of a loud lookup, in milliseconds
    #[serde(default = "default_snapshot_settle_ms")]
    pub snapshot_settle_ms: u64,

    /// Directory receiving screenshots
    #[serde(default)]
    pub snapshot_dir: Option<PathBuf>,

    /// Project root, used when no snapshot directory is configured
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_element_timeout_ms() -> u64 {
    10_000
}

fn default_element_poll_interval_ms() -> u64 {
    10
}

fn default_swipe_duration_ms() -> u64 {
    1000
}

fn default_snapshot_settle_ms() -> u64 {
    1000
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

impl PageConfig {
    /// Create a configuration with the given wait timeout and defaults elsewhere
    pub fn new(wait_timeout: Duration) -> Self {
        Self {
            wait_timeout_ms: wait_timeout.as_millis() as u64,
            poll_interval_ms: default_poll_interval_ms(),
            element_timeout_ms: default_element_timeout_ms(),
            element_poll_interval_ms: default_element_poll_interval_ms(),
            swipe_duration_ms: default_swipe_duration_ms(),
            snapshot_settle_ms: default_snapshot_settle_ms(),
            snapshot_dir: None,
            project_root: default_project_root(),
        }
    }

    /// Set the snapshot directory
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    /// Set the project root
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    /// Set the generic element wait timeout and poll interval
    pub fn with_element_wait(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.element_timeout_ms = timeout.as_millis() as u64;
        self.element_poll_interval_ms = poll_interval.as_millis() as u64;
        self
    }

    /// Set the poll interval of text/predicate waits
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval_ms = poll_interval.as_millis() as u64;
        self
    }

    /// Set the delay taken before a failure screenshot
    pub fn with_snapshot_settle(mut self, settle: Duration) -> Self {
        self.snapshot_settle_ms = settle.as_millis() as u64;
        self
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn element_poll_interval(&self) -> Duration {
        Duration::from_millis(self.element_poll_interval_ms)
    }

    pub fn swipe_duration(&self) -> Duration {
        Duration::from_millis(self.swipe_duration_ms)
    }

    pub fn snapshot_settle(&self) -> Duration {
        Duration::from_millis(self.snapshot_settle_ms)
    }

    /// Directory screenshots are written to
    pub fn snapshot_dir(&self) -> PathBuf {
        self.snapshot_dir
            .clone()
            .unwrap_or_else(|| self.project_root.join("report").join("snapshot"))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let wait_timeout = env::var("APPIUM_PAGE_WAIT_TIMEOUT_MS")
            .map_err(|_| Error::configuration("APPIUM_PAGE_WAIT_TIMEOUT_MS is not set"))?
            .parse()
            .map_err(|_| Error::configuration("Invalid APPIUM_PAGE_WAIT_TIMEOUT_MS"))?;

        let mut config = PageConfig::new(Duration::from_millis(wait_timeout));

        if let Some(value) = parse_env_ms("APPIUM_PAGE_POLL_INTERVAL_MS")? {
            config.poll_interval_ms = value;
        }

        if let Some(value) = parse_env_ms("APPIUM_PAGE_ELEMENT_TIMEOUT_MS")? {
            config.element_timeout_ms = value;
        }

        if let Some(value) = parse_env_ms("APPIUM_PAGE_ELEMENT_POLL_INTERVAL_MS")? {
            config.element_poll_interval_ms = value;
        }

        if let Some(value) = parse_env_ms("APPIUM_PAGE_SWIPE_DURATION_MS")? {
            config.swipe_duration_ms = value;
        }

        if let Some(value) = parse_env_ms("APPIUM_PAGE_SNAPSHOT_SETTLE_MS")? {
            config.snapshot_settle_ms = value;
        }

        if let Ok(dir) = env::var("APPIUM_PAGE_SNAPSHOT_DIR") {
            config.snapshot_dir = Some(PathBuf::from(dir));
        }

        if let Ok(root) = env::var("APPIUM_PAGE_PROJECT_ROOT") {
            config.project_root = PathBuf::from(root);
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))
    }
}

fn parse_env_ms(key: &str) -> Result<Option<u64>> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| Error::configuration(format!("Invalid {}", key))),
        Err(_) => Ok(None),
    }
}
