//! Identifier types for lists and items
//!
//! ID Format:
//! - List IDs: `l-{7-char-hash}` (e.g., `l-7f2b4c1`)
//! - Item IDs: `i-{7-char-hash}` (e.g., `i-9d3e5f2`)
//!
//! Hash is derived from seed text + creation timestamp, ensuring
//! uniqueness. The same text at different times produces different IDs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid list ID format: expected 'l-{{7-char-hash}}', got '{0}'")]
    InvalidListId(String),

    #[error("Invalid item ID format: expected 'i-{{7-char-hash}}', got '{0}'")]
    InvalidItemId(String),
}

/// Generates a 7-character hash from seed text and timestamp
fn generate_hash(seed: &str, timestamp: DateTime<Utc>) -> String {
    let input = format!("{}{}", seed, timestamp.timestamp_nanos_opt().unwrap_or(0));
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

fn parse_hash<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let hash = s.trim().strip_prefix(prefix)?;
    if hash.len() == 7 && hash.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hash)
    } else {
        None
    }
}

/// List ID in the format `l-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListId {
    hash: String,
}

impl ListId {
    /// Creates a new list ID from the list name and creation timestamp
    pub fn new(name: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: generate_hash(name, timestamp),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l-{}", self.hash)
    }
}

impl FromStr for ListId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hash = parse_hash(s, "l-").ok_or_else(|| IdError::InvalidListId(s.to_string()))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }
}

impl TryFrom<String> for ListId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ListId> for String {
    fn from(id: ListId) -> Self {
        id.to_string()
    }
}

/// Item ID in the format `i-{7-char-hash}`
///
/// Assigned once at creation; stable across edits, archival, and sync.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId {
    hash: String,
}

impl ItemId {
    /// Creates a new item ID from the item text and creation timestamp
    pub fn new(text: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: generate_hash(text, timestamp),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i-{}", self.hash)
    }
}

impl FromStr for ItemId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hash = parse_hash(s, "i-").ok_or_else(|| IdError::InvalidItemId(s.to_string()))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }
}

impl TryFrom<String> for ItemId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.to_string()
    }
}
