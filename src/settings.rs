//! Demo settings
//!
//! View geometry, movement tuning and the starting pose, loaded from an
//! optional JSON file. Missing fields fall back to the defaults.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Pose, ProjectionConfig};

/// Projection plane and field of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Columns cast per frame (view width in pixels)
    pub columns: usize,
    /// View height in pixels
    pub height: u32,
    /// Horizontal field of view (degrees)
    pub fov_deg: f32,
    /// Override for the derived eye-to-plane distance
    pub plane_distance: Option<f32>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            columns: TARGET_WIDTH,
            height: TARGET_HEIGHT as u32,
            fov_deg: FIELD_OF_VIEW,
            plane_distance: None,
        }
    }
}

impl ViewSettings {
    /// Projection for a level with the given block size
    ///
    /// A field of view outside (0°, 180°) or a non-positive plane distance
    /// falls back to the default.
    pub fn projection(&self, block_size: f32) -> ProjectionConfig {
        let fov_deg = if self.fov_deg.is_finite() && self.fov_deg > 0.0 && self.fov_deg < 180.0 {
            self.fov_deg
        } else {
            log::warn!(
                "Field of view {}° is outside (0, 180), using {}°",
                self.fov_deg,
                FIELD_OF_VIEW
            );
            FIELD_OF_VIEW
        };

        let config = ProjectionConfig::new(self.columns, self.height, fov_deg, block_size);
        match self.plane_distance {
            Some(distance) if distance.is_finite() && distance > 0.0 => {
                config.with_plane_distance(distance)
            }
            Some(distance) => {
                log::warn!("Ignoring plane distance {}, deriving it from the view", distance);
                config
            }
            None => config,
        }
    }

    /// Width over height of the view
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            TARGET_ASPECT_RATIO
        } else {
            self.columns as f32 / self.height as f32
        }
    }
}

/// Movement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// World units per second
    pub move_speed: f32,
    /// Degrees per second
    pub turn_speed: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            move_speed: PLAYER_MOVE_SPEED,
            turn_speed: PLAYER_TURN_SPEED,
        }
    }
}

/// Starting pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartSettings {
    pub x: f32,
    pub y: f32,
    /// Heading in degrees (90 faces toward row 0)
    pub angle: f32,
}

impl Default for StartSettings {
    fn default() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            angle: PLAYER_START_ANGLE,
        }
    }
}

impl StartSettings {
    pub fn pose(&self) -> Pose {
        Pose::new(Vec2::new(self.x, self.y), self.angle)
    }
}

/// Demo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub view: ViewSettings,
    pub movement: MotionSettings,
    pub start: StartSettings,

    // === HUD ===
    /// Show the overhead map next to the view
    pub debug_overlay: bool,

    /// Level file (JSON 0/1 rows); the built-in level when unset
    pub level: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view: ViewSettings::default(),
            movement: MotionSettings::default(),
            start: StartSettings::default(),
            debug_overlay: true,
            level: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring invalid settings in {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read settings {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
