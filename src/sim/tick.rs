//! Simulation tick
//!
//! Advances the game by one frame's elapsed time. Collisions are resolved
//! one after another, container then paddle then obstacles, and at most one
//! obstacle is destroyed per tick. At low frame rates or high speeds this can
//! miss a contact or register the same one on consecutive ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{resolve_circle_rect, resolve_container};
use super::rect::Rect;
use super::state::{Ball, GamePhase, GameState, Paddle};
use crate::apply_velocity;
use crate::config::SimConfig;
use crate::input::InputIntent;

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball hit the bottom wall
    BallLost { lives_left: u8 },
    /// Ball bounced off the top of the paddle
    PaddleHit,
    /// Obstacle at `index` destroyed, crediting `score`
    ObstacleDestroyed { index: usize, score: f64 },
    Won,
    GameOver,
}

/// Events produced by one tick, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Advance the game state by `dt` milliseconds.
///
/// Does nothing unless the phase is `Playing`. All updates are computed on
/// locals and written back together at the end.
pub fn tick(state: &mut GameState, config: &SimConfig, input: &InputIntent, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    match state.phase {
        GamePhase::Playing => {}
        GamePhase::None
        | GamePhase::NeedsInput
        | GamePhase::ReadyToSelect
        | GamePhase::GameOver
        | GamePhase::Won => return report,
    }

    let container = config.container_size();
    let mut score = state.score;
    let mut lives = state.lives;
    let mut phase = state.phase;
    let mut obstacles = std::mem::take(&mut state.obstacles);

    // Paddle: velocity straight from intent, stops dead at the walls. The
    // position moves with this tick's velocity, not the previous tick's.
    let paddle_vel = Vec2::new(input.horizontal() * config.paddle_speed, 0.0);
    let paddle_pos = apply_velocity(state.paddle.pos, paddle_vel, dt);
    let paddle = resolve_container(container, config.paddle_size(), paddle_pos, paddle_vel, false);

    // Ball vs container
    let ball_pos = apply_velocity(state.ball.pos, state.ball.vel, dt);
    let wall = resolve_container(container, config.ball_box(), ball_pos, state.ball.vel, true);
    let mut ball_pos = wall.pos;
    let mut ball_vel = wall.vel;

    if wall.faces.bottom {
        lives = lives.saturating_sub(1);
        log::debug!("Ball lost, {} lives left", lives);
        report.push(GameEvent::BallLost { lives_left: lives });
        if lives == 0 {
            phase = GamePhase::GameOver;
            report.push(GameEvent::GameOver);
        }
    }

    if phase == GamePhase::Playing {
        let radius = config.ball_radius();
        let paddle_rect = Rect::from_body(paddle.pos, config.paddle_size());

        let hit = resolve_circle_rect(ball_pos, ball_vel, radius, &paddle_rect);
        ball_pos = hit.pos;
        ball_vel = hit.vel;
        if hit.faces.top {
            ball_vel.x += paddle.vel.x * config.spin_factor;
            report.push(GameEvent::PaddleHit);
        }

        let struck = obstacles
            .iter()
            .enumerate()
            .filter(|(_, o)| o.active)
            .find_map(|(index, o)| {
                let res = resolve_circle_rect(ball_pos, ball_vel, radius, &o.rect);
                res.faces.any().then_some((index, res))
            });

        if let Some((index, res)) = struck {
            ball_pos = res.pos;
            ball_vel = res.vel;
            if let Some(reward) = obstacles.deactivate(index) {
                score += reward;
                log::debug!("Obstacle {} destroyed (+{:.2}, total {:.2})", index, reward, score);
                report.push(GameEvent::ObstacleDestroyed { index, score: reward });
            }
        }

        if obstacles.all_cleared() {
            phase = GamePhase::Won;
            report.push(GameEvent::Won);
        }

        // Flush-to-face correction can push the ball past a wall when it is
        // wedged between the paddle and the container edge.
        ball_pos = ball_pos.max(Vec2::ZERO).min(container - config.ball_box());
    }

    if phase != state.phase {
        log::info!("Phase {:?} -> {:?} (score {:.2})", state.phase, phase, score);
    }

    *state = GameState {
        paddle: Paddle {
            pos: paddle.pos,
            vel: paddle.vel,
        },
        ball: Ball {
            pos: ball_pos,
            vel: ball_vel,
        },
        obstacles,
        score,
        lives,
        phase,
    };

    report
}
