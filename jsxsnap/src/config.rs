//! Configuration module for jsxsnap.
//!
//! This module handles loading the harness configuration:
//! where fixtures live, which plugin binary the resolved configurations point
//! at, and how the compiler backend is invoked.

use dirs::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backend::{CONFIG_PLACEHOLDER, INPUT_PLACEHOLDER};
use crate::error::{JsxSnapError, Result};
use crate::resolver::PLUGIN_FILE_NAME;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "jsxsnap.toml";

/// Environment variable that switches a run into record mode.
pub const UPDATE_ENV_VAR: &str = "UPDATE";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Directory whose subdirectories are fixtures.
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: String,

    /// Plugin file name, resolved against the working directory.
    #[serde(default = "default_plugin_file")]
    pub plugin_file: String,

    /// Compiler backend invocation.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// How to invoke the compiler backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// Program to run.
    #[serde(default = "default_backend_program")]
    pub program: String,

    /// Arguments; `{input}` and `{config}` are substituted per fixture.
    #[serde(default = "default_backend_args")]
    pub args: Vec<String>,
}

fn default_fixtures_dir() -> String {
    "tests/fixtures".to_string()
}

fn default_plugin_file() -> String {
    PLUGIN_FILE_NAME.to_string()
}

fn default_backend_program() -> String {
    "npx".to_string()
}

fn default_backend_args() -> Vec<String> {
    vec![
        "swc".to_string(),
        INPUT_PLACEHOLDER.to_string(),
        "--config-file".to_string(),
        CONFIG_PLACEHOLDER.to_string(),
        "--no-swcrc".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixtures_dir: default_fixtures_dir(),
            plugin_file: default_plugin_file(),
            backend: BackendConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: default_backend_program(),
            args: default_backend_args(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. User's home directory
    /// 3. System configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(JsxSnapError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| JsxSnapError::Config(format!("Failed to parse configuration: {}", e)))
    }

    /// Check for config in current directory.
    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Check for config in home directory.
    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("jsxsnap").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Check for config in system config directory.
    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("jsxsnap").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
