//! Settings file.
//!
//! Looked up in this order: `--config PATH`, the `EDC_CONFIG` environment
//! variable, then `edc-death-report.toml` in the working directory. A missing
//! file means defaults.
//!
//! ```toml
//! vocabulary_dir = "vocab"
//! store = "reports.json"
//! user = "site-01"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use edc_model::VocabularyRegistry;
use edc_vocabulary::{VOCABULARY_ENV_VAR, load_default_registry, load_registry_dir};

pub const CONFIG_ENV_VAR: &str = "EDC_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "edc-death-report.toml";
/// Recorded as `user_created`/`user_modified` when no user is configured.
pub const DEFAULT_USER: &str = "edc";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory of `<kind>.csv` files overriding the built-in vocabularies.
    pub vocabulary_dir: Option<PathBuf>,
    /// Store file used when a command gets no `--store`.
    pub store: Option<PathBuf>,
    pub user: Option<String>,
}

impl Settings {
    /// Resolve and read the settings file.
    ///
    /// An explicitly named file must exist. A file found through the
    /// environment or the working directory is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            return Self::load_from(path);
        }
        let candidate = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if candidate.is_file() {
            Self::load_from(&candidate)
        } else {
            debug!(path = %candidate.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("serialize config")?;
        std::fs::write(path, content).with_context(|| format!("write config {}", path.display()))
    }

    /// The store path: the command's flag wins over the settings file.
    pub fn store_path(&self, flag: Option<&Path>) -> Result<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.store.clone())
            .context("no store file given (use --store or set `store` in the config file)")
    }

    pub fn user_or_default<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.or(self.user.as_deref()).unwrap_or(DEFAULT_USER)
    }

    /// Vocabulary directory from the settings file or `EDC_VOCABULARY_DIR`.
    pub fn vocabulary_dir(&self) -> Option<PathBuf> {
        self.vocabulary_dir
            .clone()
            .or_else(|| std::env::var_os(VOCABULARY_ENV_VAR).map(PathBuf::from))
    }

    pub fn load_vocabularies(&self) -> Result<VocabularyRegistry> {
        match self.vocabulary_dir() {
            Some(dir) => load_registry_dir(&dir)
                .with_context(|| format!("load vocabularies from {}", dir.display())),
            None => load_default_registry().context("load built-in vocabularies"),
        }
    }
}
