//! JSONL storage for items
//!
//! Items are stored in `items.jsonl` with one JSON object per line.
//! Uses file locking for concurrent access safety.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{Item, ItemId, ListId};

/// Store for item data in JSONL format
pub struct ItemStore {
    path: PathBuf,
}

impl ItemStore {
    /// Creates a new item store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a workspace
    pub fn for_workspace(root: &Path) -> Self {
        Self::new(root.join("items.jsonl"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all items from the store
    pub fn read_all(&self) -> Result<HashMap<ItemId, Item>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open item store: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on item store")?;

        let reader = BufReader::new(&file);
        let mut items = HashMap::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let item: Item = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse item at line {}", line_num + 1))?;

            items.insert(item.id.clone(), item);
        }

        // Lock is released when file is dropped
        Ok(items)
    }

    /// Reads the items belonging to a specific list
    pub fn read_for_list(&self, list_id: &ListId) -> Result<Vec<Item>> {
        let all = self.read_all()?;
        Ok(all
            .into_values()
            .filter(|item| &item.list == list_id)
            .collect())
    }

    /// Writes all items to the store (full rewrite)
    pub fn write_all(&self, items: &HashMap<ItemId, Item>) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            file.lock_exclusive()
                .context("Failed to acquire write lock on item store")?;

            let mut writer = BufWriter::new(&file);

            // Sort by ID for consistent output
            let mut sorted: Vec<_> = items.values().collect();
            sorted.sort_by(|a, b| a.id.cmp(&b.id));

            for item in sorted {
                let line = serde_json::to_string(item).context("Failed to serialize item")?;
                writeln!(writer, "{}", line).context("Failed to write item")?;
            }

            writer.flush().context("Failed to flush item store")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Appends a single item (used for quick adds without full rewrite)
    pub fn append(&self, item: &Item) -> Result<()> {
        self.append_all(std::slice::from_ref(item))
    }

    /// Appends a batch of items under one lock
    pub fn append_all(&self, items: &[Item]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open item store: {}", self.path.display()))?;

        // Acquire exclusive lock
        file.lock_exclusive()
            .context("Failed to acquire write lock on item store")?;

        let mut writer = BufWriter::new(&file);
        for item in items {
            let line = serde_json::to_string(item).context("Failed to serialize item")?;
            writeln!(writer, "{}", line).context("Failed to write item")?;
        }

        writer.flush().context("Failed to flush item store")?;

        Ok(())
    }

    /// Updates a single item (reads all, updates, writes all)
    pub fn update(&self, item: &Item) -> Result<()> {
        let mut items = self.read_all()?;
        items.insert(item.id.clone(), item.clone());
        self.write_all(&items)
    }

    /// Removes an item by ID
    pub fn remove(&self, item_id: &ItemId) -> Result<bool> {
        let mut items = self.read_all()?;
        let removed = items.remove(item_id).is_some();
        if removed {
            self.write_all(&items)?;
        }
        Ok(removed)
    }
}
