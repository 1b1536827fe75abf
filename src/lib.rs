//! Receipt Breakout - a breakout game whose bricks are receipt line items
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, game state)
//! - `driver`: Frame clock that feeds the simulation
//! - `input`: Key events folded into paddle intent
//! - `session`: Receipt loading and phase transitions outside the tick
//! - `receipts`: Receipt data and the `ReceiptSource` collaborator
//! - `config`: Data-driven game tuning

pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod receipts;
pub mod session;
pub mod sim;

pub use config::SimConfig;
pub use driver::{FrameDriver, Simulation};
pub use error::{ConfigError, SessionError, SourceError};
pub use input::{InputEvent, InputIntent};
pub use session::Session;

use glam::Vec2;

/// Game configuration constants
///
/// Distances are simulation pixels, times are milliseconds, velocities are
/// pixels per millisecond.
pub mod consts {
    /// Container (play field) dimensions
    pub const CONTAINER_WIDTH: f32 = 800.0;
    pub const CONTAINER_HEIGHT: f32 = 800.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_START_X: f32 = 100.0;
    pub const PADDLE_START_Y: f32 = 740.0;
    pub const PADDLE_SPEED: f32 = 0.5;

    /// Ball defaults (square bounding box, radius is half the width)
    pub const BALL_SIZE: f32 = 20.0;
    pub const BALL_START_X: f32 = 500.0;
    pub const BALL_START_Y: f32 = 700.0;
    pub const BALL_START_VEL_X: f32 = -0.3;
    pub const BALL_START_VEL_Y: f32 = -0.3;

    /// Fraction of paddle velocity imparted on a top hit
    pub const PADDLE_SPIN: f32 = 0.2;

    pub const STARTING_LIVES: u8 = 3;

    /// Obstacle grid
    pub const GRID_COLUMNS: usize = 4;
    pub const GRID_GAP: f32 = 20.0;
    pub const GRID_PADDING: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;

    /// Snapshot publish interval (~60fps)
    pub const RENDER_INTERVAL_MS: f64 = 16.0;
    /// Largest delta handed to a single tick
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
}

/// Linear integration: `pos + vel * dt`
#[inline]
pub fn apply_velocity(pos: Vec2, vel: Vec2, dt: f32) -> Vec2 {
    pos + vel * dt
}
