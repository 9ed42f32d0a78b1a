//! Configurator settings — YAML file, environment, then command line.
//!
//! Every field is optional in the file. Precedence, lowest to highest:
//! built-in defaults, config file, `RECLOSER_*` environment variables,
//! command-line flags.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::i18n::DEFAULT_LANGUAGE;
use crate::source::{FixtureSource, HttpSource, LayoutSource, SourceError};

pub const ENV_ENDPOINT: &str = "RECLOSER_ENDPOINT";
pub const ENV_LANGUAGE: &str = "RECLOSER_LANGUAGE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the JSON gateway. Takes precedence over `fixture`.
    pub endpoint: Option<String>,
    /// Inventory document (YAML or JSON) to serve instead of a backend.
    pub fixture: Option<PathBuf>,
    /// Preferred label language.
    pub language: String,
    /// Languages the TUI cycles through with `l`.
    pub languages: Vec<String>,
    pub request_timeout_secs: u64,
    /// Where the TUI writes its log (stderr is the screen).
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            fixture: None,
            language: DEFAULT_LANGUAGE.to_string(),
            languages: vec![DEFAULT_LANGUAGE.to_string(), "ptBr".to_string()],
            request_timeout_secs: 10,
            log_file: PathBuf::from("recloser-configurator.log"),
        }
    }
}

/// Command-line values that override file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub fixture: Option<PathBuf>,
    pub language: Option<String>,
}

impl Config {
    /// Defaults when `path` is `None`; otherwise the file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parse YAML. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply `RECLOSER_*` variables from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply `RECLOSER_*` variables from `lookup`. Blank values are ignored.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.endpoint = Some(endpoint);
        }
        if let Some(language) = get(ENV_LANGUAGE) {
            self.language = language;
        }
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = Some(endpoint);
        }
        if let Some(fixture) = overrides.fixture {
            self.fixture = Some(fixture);
        }
        if let Some(language) = overrides.language {
            self.language = language;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The cycle list, guaranteed to contain the preferred language.
    pub fn language_cycle(&self) -> Vec<String> {
        let mut cycle = self.languages.clone();
        if !cycle.contains(&self.language) {
            cycle.insert(0, self.language.clone());
        }
        cycle
    }

    /// Build the configured layout source.
    pub fn source(&self) -> Result<Arc<dyn LayoutSource>, SourceError> {
        if let Some(endpoint) = &self.endpoint {
            let source = HttpSource::with_timeout(endpoint, self.request_timeout())?;
            info!("using HTTP layout source at {}", source.base_url());
            return Ok(Arc::new(source));
        }
        if let Some(path) = &self.fixture {
            info!("using fixture layout source {}", path.display());
            return Ok(Arc::new(FixtureSource::from_path(path)?));
        }
        info!("using built-in sample inventory");
        Ok(Arc::new(FixtureSource::sample()))
    }
}
