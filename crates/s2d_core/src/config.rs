use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::color::Color;
use crate::error::ConfigError;
use crate::viewport::ViewportMode;

/// Creation flags for the native window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct WindowFlags {
    pub resizable: bool,
    pub borderless: bool,
    pub fullscreen: bool,
    pub highdpi: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub viewport: ViewportMode,
    pub fps_cap: u32,
    pub vsync: bool,
    pub background: Color,
    pub flags: WindowFlags,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Simple 2D".to_string(),
            width: 640,
            height: 480,
            viewport: ViewportMode::Scale,
            fps_cap: 60,
            vsync: true,
            background: Color::BLACK,
            flags: WindowFlags::default(),
        }
    }
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }
}

pub fn load_window_config(path: &Path) -> Result<WindowConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: WindowConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_window_config(&config)?;
    Ok(config)
}

fn validate_window_config(config: &WindowConfig) -> Result<(), ConfigError> {
    if config.width == 0 || config.height == 0 {
        return Err(ConfigError::Invalid(
            "width and height must be > 0".to_string(),
        ));
    }
    if config.fps_cap == 0 {
        return Err(ConfigError::Invalid("fps_cap must be >= 1".to_string()));
    }
    Ok(())
}
