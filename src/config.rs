//! Configuration management for grid-tui.
//!
//! Supports layered configuration: defaults → working directory → user → env

use crate::domain::GridLayout;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub layout: GridLayout,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub todo: TodoConfig,
}

impl AppConfig {
    /// Load configuration with hierarchy: defaults → working dir → user → env
    pub fn load(working_dir: Option<&PathBuf>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Local config (.grid-tui.toml in the working directory)
        if let Some(dir) = working_dir {
            let local_config = dir.join(".grid-tui.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        // 3. User config (~/.config/grid-tui/config.toml)
        if let Some(config_dir) = directories::ProjectDirs::from("com", "grid-tui", "grid-tui") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (GRID_TUI__*)
        builder = builder.add_source(
            Environment::with_prefix("GRID_TUI")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Load configuration with default settings only
    pub fn load_defaults() -> Self {
        Self::default()
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.ui.validate()
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI refresh rate in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Enable vim-style selection movement (j/k/h/l)
    #[serde(default = "default_vim_navigation")]
    pub vim_navigation: bool,
    /// Width of one cell box, borders included
    #[serde(default = "default_cell_width")]
    pub cell_width: u16,
    /// Height of one cell box, borders included
    #[serde(default = "default_cell_height")]
    pub cell_height: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            vim_navigation: default_vim_navigation(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
        }
    }
}

impl UiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        // A bordered box needs one row/column of content
        if self.cell_width < 3 || self.cell_height < 3 {
            return Err(ConfigError::Invalid(format!(
                "cells must be at least 3x3, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_vim_navigation() -> bool {
    true
}

fn default_cell_width() -> u16 {
    12
}

fn default_cell_height() -> u16 {
    3
}

/// To-do list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoConfig {
    /// Show and persist the to-do list
    #[serde(default = "default_todo_enabled")]
    pub enabled: bool,
    /// Storage key; the list lives in `<key>.json`
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Override for the data directory
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            enabled: default_todo_enabled(),
            storage_key: default_storage_key(),
            directory: None,
        }
    }
}

impl TodoConfig {
    /// Resolve the file backing the to-do list, if any
    pub fn storage_path(&self) -> Option<PathBuf> {
        match &self.directory {
            Some(dir) => Some(dir.join(format!("{}.json", self.storage_key))),
            None => crate::services::TodoStore::default_path(&self.storage_key),
        }
    }
}

fn default_todo_enabled() -> bool {
    true
}

fn default_storage_key() -> String {
    "st-todo-list".to_string()
}
