//! Display themes for lists
//!
//! Theme keys are free-form strings in stored data; anything outside the
//! known set folds to [`Theme::Default`]. The color table lives here and
//! nowhere else, so every render path agrees on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display color key for a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Default,
    Blue,
    Green,
    Pink,
    Purple,
    Yellow,
}

impl Theme {
    /// Every known theme, in display order
    pub const ALL: [Theme; 6] = [
        Theme::Default,
        Theme::Blue,
        Theme::Green,
        Theme::Pink,
        Theme::Purple,
        Theme::Yellow,
    ];

    /// Parses a theme key; unknown keys fall back to the default theme
    pub fn from_key(key: &str) -> Self {
        match key {
            "blue" => Theme::Blue,
            "green" => Theme::Green,
            "pink" => Theme::Pink,
            "purple" => Theme::Purple,
            "yellow" => Theme::Yellow,
            _ => Theme::Default,
        }
    }

    /// Returns the stored key for this theme
    pub fn key(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Pink => "pink",
            Theme::Purple => "purple",
            Theme::Yellow => "yellow",
        }
    }

    /// Returns the display color as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            Theme::Default => "#8E8E93",
            Theme::Blue => "#007AFF",
            Theme::Green => "#34C759",
            Theme::Pink => "#FF2D55",
            Theme::Purple => "#AF52DE",
            Theme::Yellow => "#FFCC00",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        Theme::from_key(&value)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.key().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_parse() {
        assert_eq!(Theme::from_key("blue"), Theme::Blue);
        assert_eq!(Theme::from_key("green"), Theme::Green);
        assert_eq!(Theme::from_key("pink"), Theme::Pink);
        assert_eq!(Theme::from_key("purple"), Theme::Purple);
        assert_eq!(Theme::from_key("yellow"), Theme::Yellow);
        assert_eq!(Theme::from_key("default"), Theme::Default);
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        assert_eq!(Theme::from_key("nonexistent-key"), Theme::Default);
        assert_eq!(
            Theme::from_key("nonexistent-key").color(),
            Theme::from_key("default").color()
        );
    }

    #[test]
    fn key_roundtrip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_key(theme.key()), theme);
        }
    }

    #[test]
    fn colors_are_distinct() {
        let mut colors: Vec<_> = Theme::ALL.iter().map(|t| t.color()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), Theme::ALL.len());
    }

    #[test]
    fn serde_folds_unknown_keys() {
        let theme: Theme = serde_json::from_str(r#""turquoise""#).unwrap();
        assert_eq!(theme, Theme::Default);

        let theme: Theme = serde_json::from_str(r#""pink""#).unwrap();
        assert_eq!(theme, Theme::Pink);

        assert_eq!(serde_json::to_string(&Theme::Pink).unwrap(), r#""pink""#);
    }
}
