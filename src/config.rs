//! Optional key-binding configuration.
//!
//! ```toml
//! [keys]
//! exit = "capslock"
//!
//! [keys.bindings]
//! "ctrl+v" = "enter_visual_block"
//! "q" = "none"
//! ```
//!
//! Unknown fields are ignored so configuration files can grow without
//! breaking older engines.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::key::KeyCombination;
use crate::keymap::Keymap;
use crate::types::Action;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid key `{0}`")]
    InvalidKey(String),
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct KeysConfig {
    /// The mode-exit key.
    #[serde(default = "KeysConfig::default_exit")]
    pub exit: String,
    /// Extra bindings applied over the standard table, key to action name.
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            exit: Self::default_exit(),
            bindings: BTreeMap::new(),
        }
    }
}

impl KeysConfig {
    fn default_exit() -> String {
        "esc".to_string()
    }
}

impl ConfigFile {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build the keymap described by this configuration.
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        let exit: KeyCombination = self.keys.exit.parse()?;
        let mut map = Keymap::with_exit_key(exit);
        for (key, action) in &self.keys.bindings {
            let combo: KeyCombination = key.parse()?;
            let action: Action = action.parse()?;
            debug!(target: "config", key = %combo, action = action.name(), "binding");
            map.bind(combo, action);
        }
        Ok(map)
    }
}

pub fn load_from(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = ConfigFile::from_toml_str(&content)?;
    debug!(target: "config", path = %path.display(), bindings = file.keys.bindings.len(), "config_loaded");
    Ok(file)
}
