//! Workspace management
//!
//! A workspace is the directory holding one user's lists, items, config,
//! and cache. Opening a workspace creates the structure on first use;
//! there is no separate init step.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use thiserror::Error;

use super::{Cache, Config, ItemStore, ListStore};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Workspace path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Could not determine a data directory for this platform")]
    NoDataDir,
}

/// A Daily workspace
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens the workspace at the given path, creating it on first use
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if root.exists() && !root.is_dir() {
            return Err(WorkspaceError::NotADirectory(root).into());
        }

        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create workspace: {}", root.display()))?;

        let config_path = root.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Daily CLI configuration

# Theme applied to new lists: default, blue, green, pink, purple, yellow
default_theme = "default"

# Render items with a completion glyph
bullet_points = true

# How many outstanding items `daily pending` shows by default
pending_limit = 3
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let config = Config::load(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the workspace at an explicit path, or the platform default
    pub fn open_default(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(path) => Self::open(path),
            None => Self::open(Self::default_root()?),
        }
    }

    /// Returns the platform-default workspace root
    pub fn default_root() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "daily", "daily-cli").ok_or(WorkspaceError::NoDataDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the list store
    pub fn list_store(&self) -> ListStore {
        ListStore::for_workspace(&self.root)
    }

    /// Returns the item store
    pub fn item_store(&self) -> ItemStore {
        ItemStore::for_workspace(&self.root)
    }

    /// Returns the cache directory
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(".cache")
    }

    /// Opens the SQLite cache for this workspace
    pub fn cache(&self) -> Result<Cache> {
        Cache::open(&self.root)
    }

    /// Gets the cache if it's fresh, or rebuilds it if stale
    pub fn get_or_rebuild_cache(&self) -> Result<Cache> {
        let mut cache = self.cache()?;

        if cache.is_stale()? {
            let lists = self.list_store().read_all()?;
            let items = self.item_store().read_all()?;
            cache.rebuild(&lists, &items)?;
        }

        Ok(cache)
    }
}
