use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Server configuration.
///
/// Loaded from defaults, then an optional YAML file, then the environment,
/// then command-line flags (see `main.rs`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to
    pub listen_addr: String,
    /// Directory served by `/files/<name>`; file routes answer 404 when unset
    pub directory: Option<PathBuf>,
    /// Deadline for each socket read
    pub read_timeout_secs: u64,
    /// Deadline for writing the whole response
    pub write_timeout_secs: u64,
    /// Upper bound on a buffered request (head plus body)
    pub max_request_bytes: usize,
    /// Emit the double blank-line terminator older clients of this server expect
    pub legacy_framing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4221".to_string(),
            directory: None,
            read_timeout_secs: 10,
            write_timeout_secs: 10,
            max_request_bytes: 1024 * 1024,
            legacy_framing: false,
        }
    }
}

impl Config {
    /// The YAML file at `path` (or defaults), overridden by the process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.apply_env_from(|key| std::env::var(key).ok()))
    }

    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(s).context("invalid YAML configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
    }

    /// Overrides fields from `LISTEN` and `BEACON_DIRECTORY` as returned by `lookup`.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("LISTEN") {
            self.listen_addr = addr;
        }
        if let Some(dir) = lookup("BEACON_DIRECTORY") {
            self.directory = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}
