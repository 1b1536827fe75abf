//! Simulation configuration
//!
//! Defaults come from [`crate::consts`]. A JSON file can override any subset
//! of fields; missing fields keep their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Obstacle grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub columns: usize,
    /// Space between cells, both axes
    pub gap: f32,
    /// Space between the container edge and the grid
    pub padding: f32,
    pub row_height: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            gap: GRID_GAP,
            padding: GRID_PADDING,
            row_height: OBSTACLE_HEIGHT,
        }
    }
}

/// Game tuning and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Geometry ===
    pub container_width: f32,
    pub container_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Ball bounding square side (diameter)
    pub ball_size: f32,

    // === Starting positions ===
    pub paddle_start: Vec2,
    pub ball_start: Vec2,
    pub ball_start_vel: Vec2,

    // === Rules ===
    /// Paddle speed in px/ms while a direction is held
    pub paddle_speed: f32,
    /// Fraction of paddle velocity added to the ball on a top hit
    pub spin_factor: f32,
    pub starting_lives: u8,

    // === Obstacles ===
    pub grid: GridLayout,
    /// Prefix for obstacle image paths
    pub asset_base_url: String,

    // === Frame driver ===
    pub render_interval_ms: f64,
    pub max_frame_delta_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            container_width: CONTAINER_WIDTH,
            container_height: CONTAINER_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_size: BALL_SIZE,

            paddle_start: Vec2::new(PADDLE_START_X, PADDLE_START_Y),
            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),
            ball_start_vel: Vec2::new(BALL_START_VEL_X, BALL_START_VEL_Y),

            paddle_speed: PADDLE_SPEED,
            spin_factor: PADDLE_SPIN,
            starting_lives: STARTING_LIVES,

            grid: GridLayout::default(),
            asset_base_url: String::new(),

            render_interval_ms: RENDER_INTERVAL_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

impl SimConfig {
    #[inline]
    pub fn container_size(&self) -> Vec2 {
        Vec2::new(self.container_width, self.container_height)
    }

    #[inline]
    pub fn paddle_size(&self) -> Vec2 {
        Vec2::new(self.paddle_width, self.paddle_height)
    }

    #[inline]
    pub fn ball_box(&self) -> Vec2 {
        Vec2::splat(self.ball_size)
    }

    #[inline]
    pub fn ball_radius(&self) -> f32 {
        self.ball_size / 2.0
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject geometry the resolvers cannot handle.
    ///
    /// The tick loop assumes every size is positive and every body fits
    /// inside the container; this is the only place that is checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("container_width", self.container_width)?;
        positive("container_height", self.container_height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("ball_size", self.ball_size)?;
        positive("grid.row_height", self.grid.row_height)?;
        non_negative("paddle_speed", self.paddle_speed)?;
        non_negative("spin_factor", self.spin_factor)?;
        non_negative("grid.gap", self.grid.gap)?;
        non_negative("grid.padding", self.grid.padding)?;

        if self.paddle_width > self.container_width || self.paddle_height > self.container_height {
            return Err(ConfigError::DoesNotFit { body: "paddle" });
        }
        if self.ball_size > self.container_width || self.ball_size > self.container_height {
            return Err(ConfigError::DoesNotFit { body: "ball" });
        }
        if !self.ball_start_vel.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "ball_start_vel",
                value: f64::NAN,
            });
        }
        if self.grid.columns == 0 {
            return Err(ConfigError::InvalidValue {
                name: "grid.columns",
                value: 0.0,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::InvalidValue {
                name: "starting_lives",
                value: 0.0,
            });
        }
        if !(self.render_interval_ms.is_finite() && self.render_interval_ms > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "render_interval_ms",
                value: self.render_interval_ms,
            });
        }
        if !(self.max_frame_delta_ms.is_finite() && self.max_frame_delta_ms > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "max_frame_delta_ms",
                value: self.max_frame_delta_ms,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value as f64,
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value as f64,
        })
    }
}
