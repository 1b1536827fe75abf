//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module performs I/O:
//! - Elapsed time comes in as a parameter
//! - Input intent comes in as a parameter
//! - Stable iteration order (obstacle construction order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionFaces, Resolution, reflect_velocity, resolve_circle_rect, resolve_container};
pub use obstacle::{Obstacle, ObstacleField, grid_cell};
pub use rect::Rect;
pub use state::{Ball, GamePhase, GameState, Paddle};
pub use tick::{GameEvent, TickReport, tick};

use crate::config::SimConfig;
use crate::error::SessionError;
use crate::input::InputIntent;

/// The game state machine: one authoritative state and the config it runs on
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    config: SimConfig,
}

impl Game {
    pub fn new(config: SimConfig) -> Self {
        Self {
            state: GameState::new(&config),
            config,
        }
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Owned copy for presentation
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn tick(&mut self, input: &InputIntent, dt: f32) -> TickReport {
        tick(&mut self.state, &self.config, input, dt)
    }

    pub fn enter_needs_input(&mut self) -> Result<(), SessionError> {
        self.state.enter_needs_input(&self.config)
    }

    pub fn enter_ready_to_select(&mut self) -> Result<(), SessionError> {
        self.state.enter_ready_to_select(&self.config)
    }

    pub fn start_round(&mut self, obstacles: ObstacleField) -> Result<(), SessionError> {
        self.state.start_round(&self.config, obstacles)
    }
}
