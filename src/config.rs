//! Configuration management for tunescout.
//!
//! This module handles loading and accessing configuration values from the
//! `apis.json` key file, environment variables and `.env` files. Service
//! clients never read the environment themselves; they receive a [`Config`]
//! from the command layer.
//!
//! The configuration system follows a layered approach:
//! 1. `apis.json` in the current working directory, or next to the executable
//! 2. Environment variables (populated from the `.env` file in the local data
//!    directory when it exists)
//! 3. Application defaults (where applicable)

use std::{collections::HashMap, env, path::PathBuf};

use serde_json::Value;

use crate::{Error, Result};

/// Name of the flat JSON key file searched for at startup.
pub const APIS_FILE: &str = "apis.json";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and loads environment
/// variables from `tunescout/.env` in the platform-specific local data
/// directory. Variables that are already set in the environment win over the
/// file. A missing `.env` file is not an error.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/tunescout/.env`
/// - macOS: `~/Library/Application Support/tunescout/.env`
/// - Windows: `%LOCALAPPDATA%/tunescout/.env`
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<()> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Configuration(format!("{}: {}", parent.display(), e)))?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunescout/.env");
    path
}

/// Returns the locations searched for `apis.json`, in priority order.
///
/// The current working directory comes first, then the directory holding the
/// running executable.
pub fn apis_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(APIS_FILE)];
    if let Some(dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
    {
        candidates.push(dir.join(APIS_FILE));
    }
    candidates
}

/// Key/value configuration with a file layer and an environment fallback.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl Config {
    /// Loads the first `apis.json` found by [`apis_file_candidates`].
    ///
    /// When no file exists the configuration consists of the environment
    /// alone.
    pub async fn load() -> Result<Self> {
        for candidate in apis_file_candidates() {
            if candidate.is_file() {
                return Self::from_file(candidate).await;
            }
        }

        tracing::debug!("no {} found, using environment only", APIS_FILE);
        Ok(Self::default())
    }

    /// Reads a flat JSON object of upper-case keys to values.
    ///
    /// String and number values are accepted; any other value is ignored with
    /// a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the file cannot be read, is not
    /// valid JSON, or is not a JSON object.
    pub async fn from_file(path: PathBuf) -> Result<Self> {
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))?;

        let json: Value = serde_json::from_str(&content)
            .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))?;

        let Value::Object(object) = json else {
            return Err(Error::Configuration(format!(
                "{} must contain a JSON object",
                path.display()
            )));
        };

        let mut values = HashMap::new();
        for (key, value) in object {
            match value {
                Value::String(s) => {
                    values.insert(key, s);
                }
                Value::Number(n) => {
                    values.insert(key, n.to_string());
                }
                other => {
                    tracing::warn!(
                        key = %key,
                        value = %other,
                        "ignoring non-scalar configuration value"
                    );
                }
            }
        }

        tracing::debug!(path = %path.display(), keys = values.len(), "loaded configuration file");
        Ok(Self {
            values,
            source: Some(path),
        })
    }

    /// Builds a configuration from in-memory values, still falling back to the
    /// environment for keys it doesn't contain.
    pub fn from_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: None,
        }
    }

    /// Path of the file the values were read from, if any.
    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// Looks a key up in the file layer, then in the environment.
    ///
    /// Empty values count as missing.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .filter(|v| !v.is_empty())
            .or_else(|| env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Like [`Config::get`] but a missing key is a configuration error.
    pub fn require(&self, key: &str) -> Result<String> {
        self.get(key).ok_or_else(|| {
            Error::Configuration(format!(
                "{key} not found in {APIS_FILE} or the environment"
            ))
        })
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}
