// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Runtime configuration.
//!
//! Settings come from an optional YAML or JSON file, then command-line flags
//! override individual values.

use crate::engine::filter::SearchScope;
use crate::io::serialization::Format;
use crate::media::repository::DEFAULT_KEY_PREFIX;
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the media storage directory.
pub const STORE_DIR_ENV: &str = "PROJDASH_PATH";

/// Project list looked up in the working directory when none is configured.
pub const DEFAULT_PROJECTS_FILE: &str = "projects.json";

/// Default storage quota, in bytes, for attached media.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Parser)]
#[command(name = "projdash", version, about = "Project status dashboard")]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project list (YAML or JSON)
    #[arg(short, long)]
    pub projects: Option<PathBuf>,

    /// Directory holding attached media
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Keep attached media in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Fields matched by the search box
    #[arg(long, value_enum)]
    pub search_scope: Option<SearchScope>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub projects_file: Option<PathBuf>,
    pub store_dir: Option<PathBuf>,
    pub ephemeral: bool,
    pub key_prefix: String,
    pub search_scope: SearchScope,
    /// `None` disables the quota
    pub quota_bytes: Option<u64>,
    pub window: WindowConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            projects_file: None,
            store_dir: None,
            ephemeral: false,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            search_scope: SearchScope::default(),
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
            window: WindowConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&text)?,
            Format::Yaml => serde_yaml::from_str(&text)?,
        };
        Ok(config)
    }

    /// Configuration file (if any) with command-line overrides applied.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.projects {
            self.projects_file = Some(path.clone());
        }
        if let Some(dir) = &cli.store_dir {
            self.store_dir = Some(dir.clone());
        }
        if cli.ephemeral {
            self.ephemeral = true;
        }
        if let Some(scope) = cli.search_scope {
            self.search_scope = scope;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_prefix.trim().is_empty() {
            bail!("key_prefix must not be empty");
        }
        if self.window.width < 200.0 || self.window.height < 200.0 {
            bail!(
                "window size {}x{} is too small",
                self.window.width,
                self.window.height
            );
        }
        Ok(())
    }

    /// Project list to load, if one is configured or present in the
    /// working directory.
    pub fn projects_path(&self) -> Option<PathBuf> {
        self.projects_file.clone().or_else(|| {
            let fallback = PathBuf::from(DEFAULT_PROJECTS_FILE);
            fallback.exists().then_some(fallback)
        })
    }

    /// Directory for persisted media, by priority:
    /// 1. configured or `--store-dir`
    /// 2. `PROJDASH_PATH`
    /// 3. platform data directory
    /// 4. `~/.projdash`
    pub fn resolve_store_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.store_dir {
            return Ok(dir.clone());
        }

        if let Ok(env_path) = std::env::var(STORE_DIR_ENV) {
            return Ok(PathBuf::from(env_path));
        }

        if let Some(data_dir) = dirs::data_dir() {
            return Ok(data_dir.join("projdash").join("media"));
        }

        if let Some(home) = dirs::home_dir() {
            return Ok(home.join(".projdash").join("media"));
        }

        bail!("Could not determine a storage directory: set --store-dir or {}", STORE_DIR_ENV)
    }
}
