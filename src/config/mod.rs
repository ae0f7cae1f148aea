//! Popup appearance and behaviour, read from a `config.toml` file.
//!
//! Every key is optional; missing keys take the values in [`defaults`].
//!
//! ```toml
//! width = 500
//! corner = "bottom-right"
//! duration = 8
//!
//! [stack]
//! release = "live-count"
//! ```

pub mod defaults;

use crate::error::{Error, Result};
use crate::Lifecycle::ButtonBindings;
use crate::Shell::color::parse_hex_color;
use crate::Stack::{Corner, Placement, ReleasePolicy, DEFAULT_STACK_KEY};
use defaults::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const APP_NAME: &str = "notistack";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub background_color: String,
    pub border_color: String,
    pub font_color: String,
    pub font: String,
    pub line_spacing: u32,
    pub padding: u32,
    pub width: u32,
    pub border_size: u32,
    pub pos_x: u32,
    pub pos_y: u32,
    pub corner: Corner,
    /// Seconds before auto-dismiss; 0 never expires.
    pub duration: u32,
    pub dismiss_button: u8,
    pub action_button: u8,
    pub stack: StackConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// IPC key of the shared stacking segment. All popups must agree on it.
    pub key: i32,
    pub release: ReleasePolicy,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STACK_KEY,
            release: ReleasePolicy::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
            font: DEFAULT_FONT.to_string(),
            line_spacing: DEFAULT_LINE_SPACING,
            padding: DEFAULT_PADDING,
            width: DEFAULT_WIDTH,
            border_size: DEFAULT_BORDER_SIZE,
            pos_x: DEFAULT_POS_X,
            pos_y: DEFAULT_POS_Y,
            corner: Corner::default(),
            duration: DEFAULT_DURATION_SECS,
            dismiss_button: DEFAULT_DISMISS_BUTTON,
            action_button: DEFAULT_ACTION_BUTTON,
            stack: StackConfig::default(),
        }
    }
}

impl Config {
    pub fn placement(&self) -> Placement {
        Placement {
            corner: self.corner,
            pos_x: self.pos_x,
            pos_y: self.pos_y,
            border_size: self.border_size,
        }
    }

    pub fn bindings(&self) -> ButtonBindings {
        ButtonBindings {
            dismiss: self.dismiss_button,
            action: self.action_button,
        }
    }

    /// Reject values the popup cannot be drawn with.
    pub fn validate(&self) -> Result<()> {
        for color in [&self.background_color, &self.border_color, &self.font_color] {
            parse_hex_color(color)?;
        }
        if self.width == 0 {
            return Err(Error::Config("width must be greater than zero".into()));
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Load from `explicit` if given, otherwise from the default location.
///
/// A missing default file yields the defaults; a missing explicit file is an error.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Load a config file. Unparsable TOML is reported and replaced by the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;

    let config = match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_matches_defaults_module() {
        let config = Config::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.padding, DEFAULT_PADDING);
        assert_eq!(config.corner, Corner::TopRight);
        assert_eq!(config.stack.key, 8432);
        assert_eq!(config.stack.release, ReleasePolicy::LastClaimant);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "width = 600\ncorner = \"bottom-left\"\n[stack]\nrelease = \"live-count\"\n",
        )
        .expect("failed to write config");

        let config = load_from_path(&path).expect("load should succeed");
        assert_eq!(config.width, 600);
        assert_eq!(config.corner, Corner::BottomLeft);
        assert_eq!(config.stack.release, ReleasePolicy::LiveCount);
        assert_eq!(config.stack.key, DEFAULT_STACK_KEY);
        assert_eq!(config.padding, DEFAULT_PADDING);
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "not = valid = toml").expect("failed to write invalid toml");

        let config = load_from_path(&path).expect("load should not error");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_color_is_a_config_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "font_color = \"red\"\n").expect("failed to write config");

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("absent.toml");
        assert!(matches!(load(Some(&path)), Err(Error::Config(_))));
    }

    #[test]
    fn bindings_and_placement_follow_config() {
        let config = Config {
            dismiss_button: 3,
            action_button: 1,
            pos_x: 5,
            ..Config::default()
        };
        assert_eq!(config.bindings(), ButtonBindings { dismiss: 3, action: 1 });
        assert_eq!(config.placement().pos_x, 5);
    }
}
