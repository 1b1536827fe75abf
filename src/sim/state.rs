//! Game state and core simulation types
//!
//! `GameState` is the single authoritative record of a game. Only `tick` and
//! the reset-point transitions below mutate it; everyone else gets a clone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleField;
use super::rect::Rect;
use crate::config::SimConfig;
use crate::error::SessionError;

/// Top-level mode of the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing loaded yet
    #[default]
    None,
    /// No receipts exist; waiting for an upload
    NeedsInput,
    /// Receipts exist; waiting for the player to pick one
    ReadyToSelect,
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
    /// Every obstacle destroyed
    Won,
}

impl GamePhase {
    /// Whether the round has ended (either way)
    pub fn is_finished(&self) -> bool {
        match self {
            GamePhase::GameOver | GamePhase::Won => true,
            GamePhase::None | GamePhase::NeedsInput | GamePhase::ReadyToSelect | GamePhase::Playing => {
                false
            }
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
}

/// The ball; `pos` is the top-left of its bounding square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub paddle: Paddle,
    pub ball: Ball,
    pub obstacles: ObstacleField,
    /// Sum of rewards collected this round
    pub score: f64,
    pub lives: u8,
    pub phase: GamePhase,
}

impl GameState {
    /// Fresh state in the `None` phase, bodies at their starting positions
    pub fn new(config: &SimConfig) -> Self {
        Self {
            paddle: Paddle {
                pos: config.paddle_start,
                vel: Vec2::ZERO,
            },
            ball: Ball {
                pos: config.ball_start,
                vel: config.ball_start_vel,
            },
            obstacles: ObstacleField::default(),
            score: 0.0,
            lives: config.starting_lives,
            phase: GamePhase::None,
        }
    }

    pub fn paddle_rect(&self, config: &SimConfig) -> Rect {
        Rect::from_body(self.paddle.pos, config.paddle_size())
    }

    pub fn ball_rect(&self, config: &SimConfig) -> Rect {
        Rect::from_body(self.ball.pos, config.ball_box())
    }

    /// Ball centre in container space
    pub fn ball_center(&self, config: &SimConfig) -> Vec2 {
        self.ball.pos + Vec2::splat(config.ball_radius())
    }

    /// Reset bodies, score and lives, drop the obstacles, keep the phase
    fn reset(&mut self, config: &SimConfig) {
        let phase = self.phase;
        *self = Self::new(config);
        self.phase = phase;
    }

    /// No receipts available: ask for an upload
    pub fn enter_needs_input(&mut self, config: &SimConfig) -> Result<(), SessionError> {
        let to = GamePhase::NeedsInput;
        match self.phase {
            GamePhase::None | GamePhase::NeedsInput => {}
            GamePhase::ReadyToSelect | GamePhase::GameOver | GamePhase::Won => self.reset(config),
            GamePhase::Playing => return Err(self.illegal(to)),
        }
        self.set_phase(to);
        Ok(())
    }

    /// Receipts available: wait for a selection.
    ///
    /// Leaving a finished round starts a new game with fresh lives and score.
    pub fn enter_ready_to_select(&mut self, config: &SimConfig) -> Result<(), SessionError> {
        let to = GamePhase::ReadyToSelect;
        match self.phase {
            GamePhase::None | GamePhase::NeedsInput | GamePhase::ReadyToSelect => {}
            GamePhase::GameOver | GamePhase::Won => self.reset(config),
            GamePhase::Playing => return Err(self.illegal(to)),
        }
        self.set_phase(to);
        Ok(())
    }

    /// Start a round on `obstacles` with every body and counter at defaults
    pub fn start_round(&mut self, config: &SimConfig, obstacles: ObstacleField) -> Result<(), SessionError> {
        let to = GamePhase::Playing;
        match self.phase {
            GamePhase::ReadyToSelect => {}
            GamePhase::None
            | GamePhase::NeedsInput
            | GamePhase::Playing
            | GamePhase::GameOver
            | GamePhase::Won => return Err(self.illegal(to)),
        }
        *self = Self::new(config);
        log::info!(
            "Round started with {} obstacles worth {:.2}",
            obstacles.len(),
            obstacles.remaining_score()
        );
        self.obstacles = obstacles;
        self.set_phase(to);
        Ok(())
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
    }

    fn illegal(&self, to: GamePhase) -> SessionError {
        SessionError::InvalidTransition { from: self.phase, to }
    }
}
