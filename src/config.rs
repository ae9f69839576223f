//! Application configuration.
//!
//! The configuration is loaded from a JSON file (see `main.rs` for the
//! lookup path).  Every key is optional; a missing key falls back to the
//! stock setup: a 7×4 grid under the number row, a 185 px dock margin at the
//! bottom and a 375 px sidebar margin on the right.
//!
//! # Example
//!
//! ```json
//! {
//!   "grid": ["1234567", "qwertyu", "asdfghj", "zxcvbnm"],
//!   "margins": { "bottom": 185, "right": 375 },
//!   "menu_bar_height": 22,
//!   "singletons": {
//!     "padded_full": "-",
//!     "full": "=",
//!     "upper_left": "[",
//!     "upper_right": "]",
//!     "upper_large": "'",
//!     "lower_large": "/"
//!   },
//!   "focus": [
//!     { "hotkey": "h:ctrl,shift", "direction": "left" }
//!   ]
//! }
//! ```

use crate::binding::{default_focus_bindings, FocusBinding, SingletonKeys};
use crate::grid::Grid;
use crate::layout::{GridLayout, LayoutError, ScreenMargins, DEFAULT_MENU_BAR_HEIGHT};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// One string per grid row, one cell label per character.
    pub grid: Vec<String>,

    /// Pixels reserved at each screen edge.
    pub margins: ScreenMargins,

    /// Vertical offset applied to every window, for the system menu bar.
    pub menu_bar_height: f64,

    /// Keys for the named full-window layouts.
    pub singletons: SingletonKeys,

    /// Directional focus shortcuts.  Replaces the defaults entirely when
    /// present.
    pub focus: Vec<FocusBinding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: ["1234567", "qwertyu", "asdfghj", "zxcvbnm"]
                .map(String::from)
                .to_vec(),
            margins: ScreenMargins {
                bottom: 185.0,
                right: 375.0,
                ..Default::default()
            },
            menu_bar_height: DEFAULT_MENU_BAR_HEIGHT,
            singletons: SingletonKeys::default(),
            focus: default_focus_bindings(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but an absent file is `Ok(None)`.
    ///
    /// Unreadable or malformed files are still errors.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        match Self::load(path) {
            Ok(cfg) => Ok(Some(cfg)),
            Err(ConfigError::Read(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Build the validated grid layout this configuration describes.
    pub fn layout(&self) -> Result<GridLayout, LayoutError> {
        let grid = Grid::from_rows(self.grid.as_slice())?;
        GridLayout::new(grid, self.margins, self.menu_bar_height)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Singleton;
    use crate::operation::Direction;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "grid": ["abc", "def"],
            "margins": { "right": 100 },
            "menu_bar_height": 0,
            "singletons": {
                "padded_full": "1",
                "full": "2",
                "upper_left": "3",
                "upper_right": "4",
                "upper_large": "5",
                "lower_large": "6"
            },
            "focus": [
                { "hotkey": "left:cmd", "direction": "left" }
            ]
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.grid, vec!["abc", "def"]);
        assert_eq!(cfg.margins.right, 100.0);
        assert_eq!(cfg.margins.bottom, 0.0);
        assert_eq!(cfg.menu_bar_height, 0.0);
        assert_eq!(cfg.singletons.key(Singleton::LowerLarge), '6');
        assert_eq!(cfg.focus.len(), 1);
        assert_eq!(cfg.focus[0].hotkey.to_string(), "left:cmd");
        assert_eq!(cfg.focus[0].direction, Direction::Left);

        let layout = cfg.layout().unwrap();
        assert_eq!((layout.rows(), layout.columns()), (2, 2));
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        let d = Config::default();
        assert_eq!(cfg.grid, d.grid);
        assert_eq!(cfg.margins, d.margins);
        assert_eq!(cfg.menu_bar_height, 22.0);
        assert_eq!(cfg.singletons, d.singletons);
        assert_eq!(cfg.focus, d.focus);
    }

    #[test]
    fn default_layout_is_stock() {
        let layout = Config::default().layout().unwrap();
        assert_eq!(layout.grid().rows(), 4);
        assert_eq!(layout.grid().columns(), 7);
        assert_eq!(layout.rows(), 3);
        assert_eq!(layout.columns(), 6);
    }

    #[test]
    fn partial_margins_zero_the_rest() {
        let cfg: Config = serde_json::from_str(r#"{ "margins": { "bottom": 50 } }"#).unwrap();
        assert_eq!(cfg.margins.bottom, 50.0);
        assert_eq!(cfg.margins.right, 0.0);
    }

    #[test]
    fn invalid_grid_surfaces_from_layout() {
        let cfg: Config = serde_json::from_str(r#"{ "grid": ["ab", "c"] }"#).unwrap();
        assert!(matches!(cfg.layout(), Err(LayoutError::Grid(_))));
    }

    #[test]
    fn invalid_focus_direction_fails_to_parse() {
        let json = r#"{ "focus": [{ "hotkey": "h:ctrl", "direction": "north" }] }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "grid": ["ab"], "future_section": { "key": 42 } }"#;
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    /// Write `contents` to a fresh file under the system temp dir.
    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("slategrid-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/slategrid.json")).unwrap_err();
        assert!(matches!(&err, ConfigError::Read(e) if e.kind() == ErrorKind::NotFound));
        assert!(err.to_string().starts_with("failed to read config"));
    }

    #[test]
    fn optional_missing_file_is_none() {
        let res = Config::load_optional(Path::new("/nonexistent/slategrid.json")).unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn optional_malformed_file_is_an_error() {
        let path = temp_config("trailing-comma.json", r#"{ "grid": ["ab"], }"#);
        let err = Config::load_optional(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn optional_invalid_value_is_an_error() {
        let path = temp_config(
            "bad-direction.json",
            r#"{ "focus": [{ "hotkey": "h:ctrl", "direction": "north" }] }"#,
        );
        assert!(matches!(Config::load_optional(&path), Err(ConfigError::Parse(_))));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn optional_valid_file_loads() {
        let path = temp_config("valid.json", r#"{ "grid": ["ab", "cd"] }"#);
        let cfg = Config::load_optional(&path).unwrap().unwrap();
        assert_eq!(cfg.grid, vec!["ab", "cd"]);
        std::fs::remove_file(&path).ok();
    }
}
