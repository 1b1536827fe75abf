//! Frame driver
//!
//! Turns display-frame timestamps into tick deltas. The simulation is
//! stepped exactly once per frame with the elapsed time; snapshots for the
//! presentation layer are published on their own, slower cadence.

use crate::config::SimConfig;
use crate::input::InputIntent;
use crate::sim::{Game, GameState, TickReport};

/// Anything the driver can step
pub trait Simulation {
    /// Advance by `dt` milliseconds
    fn tick(&mut self, input: &InputIntent, dt: f32) -> TickReport;

    /// Owned copy of the current state
    fn snapshot(&self) -> GameState;
}

impl Simulation for Game {
    fn tick(&mut self, input: &InputIntent, dt: f32) -> TickReport {
        Game::tick(self, input, dt)
    }

    fn snapshot(&self) -> GameState {
        Game::snapshot(self)
    }
}

/// Periodic clock feeding a [`Simulation`]
#[derive(Debug, Clone)]
pub struct FrameDriver {
    running: bool,
    /// Timestamp of the previous frame (ms)
    last_time: Option<f64>,
    /// Time since the last published snapshot (ms)
    since_publish: f64,
    render_interval_ms: f64,
    max_frame_delta_ms: f64,
    published: Option<GameState>,
    frames: u64,
}

impl FrameDriver {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            running: true,
            last_time: None,
            since_publish: 0.0,
            render_interval_ms: config.render_interval_ms,
            max_frame_delta_ms: config.max_frame_delta_ms,
            published: None,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resume stepping. The first frame after a start has a zero delta.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.last_time = None;
            log::info!("Frame driver started");
        }
    }

    /// Stop stepping. Frames delivered while stopped are ignored.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.last_time = None;
            log::info!("Frame driver stopped after {} frames", self.frames);
        }
    }

    /// Number of ticks issued so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Most recently published snapshot
    pub fn latest_snapshot(&self) -> Option<&GameState> {
        self.published.as_ref()
    }

    /// Handle one display frame at `timestamp_ms`.
    ///
    /// Returns the tick's report, or `None` while stopped.
    pub fn frame<S: Simulation>(
        &mut self,
        sim: &mut S,
        input: &InputIntent,
        timestamp_ms: f64,
    ) -> Option<TickReport> {
        if !self.running {
            return None;
        }

        let delta = self.delta(timestamp_ms);
        let report = sim.tick(input, delta as f32);
        self.frames += 1;

        self.since_publish += delta;
        if self.published.is_none() || self.since_publish >= self.render_interval_ms {
            self.published = Some(sim.snapshot());
            self.since_publish = 0.0;
        }

        Some(report)
    }

    fn delta(&mut self, timestamp_ms: f64) -> f64 {
        let last = self.last_time.replace(timestamp_ms).unwrap_or(timestamp_ms);
        let delta = timestamp_ms - last;

        if !delta.is_finite() || delta < 0.0 {
            log::warn!("Clock went backwards ({:.2}ms), using zero delta", delta);
            return 0.0;
        }
        if delta > self.max_frame_delta_ms {
            log::warn!(
                "Frame delta {:.1}ms clamped to {:.1}ms",
                delta,
                self.max_frame_delta_ms
            );
            return self.max_frame_delta_ms;
        }
        delta
    }
}
