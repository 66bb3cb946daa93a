//! Shared configuration for texpaint
//!
//! This crate provides the single source of truth for surface dimensions,
//! brush defaults, persistence and fingertip tracking settings. Every field
//! has a default, so a settings file only needs the values it changes. Brush,
//! background and storage key defaults are the painting crate's own.

use std::path::Path;

use serde::{Deserialize, Serialize};
use texpaint_painting::{DEFAULT_BACKGROUND, DEFAULT_BRUSH_SIZE, Rgba8, STORAGE_KEY};
use thiserror::Error;

/// Default texture width in pixels
pub const DEFAULT_WIDTH: u32 = 512;

/// Default texture height in pixels
pub const DEFAULT_HEIGHT: u32 = 512;

/// How far past its origin the fingertip ray reaches
pub const DEFAULT_RAY_DISTANCE: f32 = 0.14;

/// Distance the fingertip ray origin sits behind the fingertip
pub const DEFAULT_RAY_OFFSET: f32 = -0.1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fingertip ray settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingertipConfig {
    /// Maximum ray length
    pub ray_distance: f32,
    /// Origin offset along the pointing direction; negative moves it ahead
    pub ray_offset: f32,
}

impl Default for FingertipConfig {
    fn default() -> Self {
        Self {
            ray_distance: DEFAULT_RAY_DISTANCE,
            ray_offset: DEFAULT_RAY_OFFSET,
        }
    }
}

/// Painting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Initial brush radius, clamped by the surface
    pub brush_size: i32,
    /// Initial brush color as RGBA
    pub brush_color: [u8; 4],
    /// Background color as RGBA
    pub background: [u8; 4],
    /// Key the drawing is saved under
    pub storage_key: String,
    pub fingertip: FingertipConfig,
    /// Enable debug level logging
    pub debug: bool,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            brush_size: DEFAULT_BRUSH_SIZE,
            brush_color: Rgba8::BLACK.into(),
            background: DEFAULT_BACKGROUND.into(),
            storage_key: STORAGE_KEY.to_string(),
            fingertip: FingertipConfig::default(),
            debug: false,
        }
    }
}

impl PaintConfig {
    /// Create a config with the given surface dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Total pixel count of the configured surface
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
