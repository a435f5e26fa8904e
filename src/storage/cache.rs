//! SQLite cache for fast queries
//!
//! The cache sits in `.cache/daily.db` and mirrors data from the
//! source-of-truth files (lists.json and items.jsonl). Cache
//! invalidation is based on file modification times.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{Item, ItemId, TaskList};

/// An item row as mirrored in the cache
#[derive(Debug, Clone)]
pub struct CachedItem {
    pub id: String,
    pub list_id: String,
    pub list_name: String,
    pub text: String,
    pub completed: bool,
    pub priority: bool,
}

/// Per-list item counts for the status overview
#[derive(Debug, Clone)]
pub struct ListCounts {
    pub list_id: String,
    pub name: String,
    pub open: usize,
    pub completed: usize,
    pub archived: usize,
}

/// SQLite cache for fast queries
pub struct Cache {
    /// Path to the lists.json file (for mtime comparison)
    lists_path: PathBuf,

    /// Path to the items.jsonl file (for mtime comparison)
    items_path: PathBuf,

    /// Database connection
    conn: Connection,
}

impl Cache {
    /// Schema version - bump when schema changes to force rebuild
    const SCHEMA_VERSION: i32 = 1;

    /// Creates or opens the cache for a workspace
    pub fn open(root: &Path) -> Result<Self> {
        let cache_dir = root.join(".cache");
        let db_path = cache_dir.join("daily.db");
        let lists_path = root.join("lists.json");
        let items_path = root.join("items.jsonl");

        // Ensure cache directory exists
        fs::create_dir_all(&cache_dir).with_context(|| {
            format!("Failed to create cache directory: {}", cache_dir.display())
        })?;

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open cache database: {}", db_path.display()))?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let mut cache = Self {
            lists_path,
            items_path,
            conn,
        };

        cache.ensure_schema()?;

        Ok(cache)
    }

    /// Ensures the schema is up to date
    fn ensure_schema(&mut self) -> Result<()> {
        let current_version = self.get_schema_version()?;

        if current_version != Self::SCHEMA_VERSION {
            self.create_schema()?;
        }

        Ok(())
    }

    /// Gets the current schema version
    fn get_schema_version(&self) -> Result<i32> {
        let result: Option<i32> = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .optional()?;

        Ok(result.unwrap_or(0))
    }

    /// Creates the schema from scratch
    fn create_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            DROP TABLE IF EXISTS items;
            DROP TABLE IF EXISTS lists;
            DROP TABLE IF EXISTS cache_meta;

            CREATE TABLE lists (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                theme TEXT NOT NULL,
                bullet_points INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE items (
                id TEXT PRIMARY KEY,
                list_id TEXT NOT NULL,
                text TEXT NOT NULL,
                completed INTEGER NOT NULL,
                priority INTEGER NOT NULL,
                archived INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                sort_order INTEGER
            );

            CREATE TABLE cache_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX idx_items_list ON items(list_id);
            CREATE INDEX idx_items_completed ON items(completed);
            ",
        )?;

        // Set schema version
        self.conn.execute(
            &format!("PRAGMA user_version = {}", Self::SCHEMA_VERSION),
            [],
        )?;

        Ok(())
    }

    /// Checks if the cache needs to be rebuilt
    pub fn is_stale(&self) -> Result<bool> {
        let cache_mtime = self.get_cache_mtime()?;

        for path in [&self.lists_path, &self.items_path] {
            if path.exists() {
                let mtime = fs::metadata(path)?.modified()?;
                if mtime > cache_mtime {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Gets the cache modification time (uses stored timestamp)
    fn get_cache_mtime(&self) -> Result<SystemTime> {
        let mtime_str: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM cache_meta WHERE key = 'last_rebuild'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        match mtime_str {
            Some(s) => {
                // Stored at nanosecond precision so a rebuild is never
                // older than the source write it just mirrored
                let timestamp: u64 = s.parse().unwrap_or(0);
                Ok(SystemTime::UNIX_EPOCH + std::time::Duration::from_nanos(timestamp))
            }
            None => Ok(SystemTime::UNIX_EPOCH),
        }
    }

    /// Updates the cache modification time
    fn update_cache_mtime(&self) -> Result<()> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        self.conn.execute(
            "INSERT OR REPLACE INTO cache_meta (key, value) VALUES ('last_rebuild', ?1)",
            params![now.to_string()],
        )?;

        Ok(())
    }

    /// Rebuilds the cache from source data
    pub fn rebuild(&mut self, lists: &[TaskList], items: &HashMap<ItemId, Item>) -> Result<()> {
        let tx = self.conn.transaction()?;

        // Clear existing data
        tx.execute("DELETE FROM items", [])?;
        tx.execute("DELETE FROM lists", [])?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO lists (id, name, theme, bullet_points, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;

            for list in lists {
                stmt.execute(params![
                    list.id.to_string(),
                    list.name,
                    list.theme.key(),
                    list.bullet_points as i64,
                    list.created_at.to_rfc3339(),
                ])?;
            }
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO items (id, list_id, text, completed, priority, archived, created_at, sort_order)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;

            for item in items.values() {
                stmt.execute(params![
                    item.id.to_string(),
                    item.list.to_string(),
                    item.text,
                    item.completed as i64,
                    item.priority as i64,
                    item.archived as i64,
                    item.created_at.to_rfc3339(),
                    item.sort_order,
                ])?;
            }
        }

        tx.commit()?;

        self.update_cache_mtime()?;

        Ok(())
    }

    /// Query: search visible items by text, matching list names too
    pub fn search(&self, query: &str) -> Result<Vec<CachedItem>> {
        let pattern = format!("%{}%", query);

        let mut stmt = self.conn.prepare(
            "SELECT i.id, i.list_id, l.name, i.text, i.completed, i.priority
             FROM items i
             JOIN lists l ON l.id = i.list_id
             WHERE i.archived = 0
             AND (i.text LIKE ?1 OR l.name LIKE ?1)
             ORDER BY l.name, i.created_at",
        )?;

        let hits = stmt
            .query_map(params![pattern], |row| {
                Ok(CachedItem {
                    id: row.get(0)?,
                    list_id: row.get(1)?,
                    list_name: row.get(2)?,
                    text: row.get(3)?,
                    completed: row.get::<_, i64>(4)? != 0,
                    priority: row.get::<_, i64>(5)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(hits)
    }

    /// Query: per-list item counts, oldest list first
    pub fn counts(&self) -> Result<Vec<ListCounts>> {
        let mut stmt = self.conn.prepare(
            "SELECT l.id, l.name,
                    COALESCE(SUM(i.completed = 0 AND i.archived = 0), 0),
                    COALESCE(SUM(i.completed = 1 AND i.archived = 0), 0),
                    COALESCE(SUM(i.archived = 1), 0)
             FROM lists l
             LEFT JOIN items i ON i.list_id = l.id
             GROUP BY l.id, l.name
             ORDER BY l.created_at, l.name",
        )?;

        let counts = stmt
            .query_map([], |row| {
                Ok(ListCounts {
                    list_id: row.get(0)?,
                    name: row.get(1)?,
                    open: row.get::<_, i64>(2)? as usize,
                    completed: row.get::<_, i64>(3)? as usize,
                    archived: row.get::<_, i64>(4)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(counts)
    }
}
