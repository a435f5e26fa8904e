//! JSON storage for lists
//!
//! Lists are few and change rarely, so they live in a single
//! pretty-printed `lists.json` document. Writes follow the same
//! lock-then-rename discipline as the item store.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{ListId, TaskList};

/// Store for list records in a single JSON document
pub struct ListStore {
    path: PathBuf,
}

impl ListStore {
    /// Creates a new list store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a workspace
    pub fn for_workspace(root: &Path) -> Self {
        Self::new(root.join("lists.json"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all lists, oldest first
    pub fn read_all(&self) -> Result<Vec<TaskList>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open list store: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on list store")?;

        let reader = BufReader::new(&file);
        let mut lists: Vec<TaskList> = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse list store: {}", self.path.display()))?;

        lists.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(lists)
    }

    /// Writes all lists to the store (full rewrite)
    pub fn write_all(&self, lists: &[TaskList]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on list store")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, lists)
                .context("Failed to serialize lists")?;
            writeln!(writer).context("Failed to write list store")?;

            writer.flush().context("Failed to flush list store")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Finds a list by ID
    pub fn find(&self, id: &ListId) -> Result<Option<TaskList>> {
        Ok(self.read_all()?.into_iter().find(|l| &l.id == id))
    }
}
