//! Receipt Breakout entry point
//!
//! Runs a headless game against an in-memory receipt service: the paddle
//! follows the ball, frames arrive every 16ms, and the final state is printed
//! as JSON. Pass a config file path as the first argument to override tuning.

use receipt_breakout::receipts::{InMemoryReceipts, LineItem};
use receipt_breakout::sim::{GameEvent, GamePhase, GameState};
use receipt_breakout::{FrameDriver, InputEvent, InputIntent, Session, SimConfig, Simulation};

/// Give up after ten simulated minutes
const MAX_FRAMES: u64 = 60 * 60 * 10;
const FRAME_MS: f64 = 16.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Receipt Breakout (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    config.validate()?;

    let mut session = Session::new(config.clone(), InMemoryReceipts::new());
    session.refresh_receipts()?;

    let receipt = serde_json::to_vec(&sample_line_items())?;
    let id = session.upload("corner-store.json", &receipt)?;
    session.select_receipt(id)?;

    let mut driver = FrameDriver::new(&config);
    let mut intent = InputIntent::default();
    let mut time = 0.0;

    while session.phase() == GamePhase::Playing && driver.frames() < MAX_FRAMES {
        for event in steer(&session.snapshot(), &config, &intent) {
            intent.apply(event);
        }

        if let Some(report) = driver.frame(&mut session, &intent, time) {
            for event in &report.events {
                match event {
                    GameEvent::ObstacleDestroyed { index, score } => {
                        log::info!("Hit obstacle {} for {:.2}", index, score)
                    }
                    GameEvent::BallLost { lives_left } => log::info!("Ball lost, {} left", lives_left),
                    GameEvent::PaddleHit | GameEvent::Won | GameEvent::GameOver => {}
                }
            }
        }
        time += FRAME_MS;
    }

    let state = session.snapshot();
    match state.phase {
        GamePhase::Won => log::info!("Won! Earned {:.2} back", state.score),
        GamePhase::GameOver => log::info!("Game over with {:.2} earned", state.score),
        phase => log::info!("Stopped in {:?} after {} frames", phase, driver.frames()),
    }

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

/// Key events that keep the paddle under the ball
fn steer(state: &GameState, config: &SimConfig, held: &InputIntent) -> Vec<InputEvent> {
    let ball_x = state.ball_center(config).x;
    let paddle = state.paddle_rect(config);
    let dead_zone = paddle.size.x * 0.25;

    let want_left = ball_x < paddle.center().x - dead_zone;
    let want_right = ball_x > paddle.center().x + dead_zone;

    let mut events = Vec::new();
    match (held.left, want_left) {
        (false, true) => events.push(InputEvent::LeftPressed),
        (true, false) => events.push(InputEvent::LeftReleased),
        _ => {}
    }
    match (held.right, want_right) {
        (false, true) => events.push(InputEvent::RightPressed),
        (true, false) => events.push(InputEvent::RightReleased),
        _ => {}
    }
    events
}

fn sample_line_items() -> Vec<LineItem> {
    [
        ("Coffee", 4.5),
        ("Bagel", 2.25),
        ("Orange juice", 3.99),
        ("Newspaper", 1.5),
        ("Bananas", 0.89),
        ("Granola", 5.49),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, price))| LineItem {
        price,
        path: format!("images/item-{}.png", i),
        name: name.to_string(),
    })
    .collect()
}
