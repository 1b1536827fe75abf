use glam::Vec2;
use proptest::prelude::*;

use receipt_breakout::receipts::LineItem;
use receipt_breakout::sim::{
    Game, GamePhase, ObstacleField, Rect, resolve_circle_rect, resolve_container,
};
use receipt_breakout::{InputIntent, SimConfig};

fn line_items(prices: &[f64]) -> Vec<LineItem> {
    prices
        .iter()
        .enumerate()
        .map(|(i, price)| LineItem {
            price: *price,
            path: format!("images/{}.png", i),
            name: format!("item {}", i),
        })
        .collect()
}

/// A game in the Playing phase
fn playing_game(config: SimConfig, prices: &[f64]) -> Game {
    let field = ObstacleField::from_line_items(&line_items(prices), &config).unwrap();
    let mut game = Game::new(config);
    game.enter_ready_to_select().unwrap();
    game.start_round(field).unwrap();
    game
}

fn velocity() -> impl Strategy<Value = Vec2> {
    (0.0f32..std::f32::consts::TAU, 0.05f32..1.0).prop_map(|(angle, speed)| Vec2::new(angle.cos(), angle.sin()) * speed)
}

fn frames() -> impl Strategy<Value = Vec<(bool, bool, f32)>> {
    prop::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..40.0), 1..300)
}

fn inside(pos: Vec2, size: Vec2, container: Vec2) -> bool {
    let far = container - size;
    pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= far.x && pos.y <= far.y
}

proptest! {
    #[test]
    fn bodies_stay_inside_container(
        start in (0.0f32..780.0, 200.0f32..780.0),
        vel in velocity(),
        prices in prop::collection::vec(0.0f64..50.0, 1..12),
        frames in frames(),
    ) {
        let config = SimConfig {
            ball_start: Vec2::new(start.0, start.1),
            ball_start_vel: vel,
            ..Default::default()
        };
        let mut game = playing_game(config.clone(), &prices);

        for (left, right, dt) in frames {
            game.tick(&InputIntent { left, right }, dt);
            let state = game.state();
            prop_assert!(inside(state.ball.pos, config.ball_box(), config.container_size()),
                "ball escaped: {:?}", state.ball.pos);
            prop_assert!(inside(state.paddle.pos, config.paddle_size(), config.container_size()),
                "paddle escaped: {:?}", state.paddle.pos);
        }
    }

    #[test]
    fn score_and_obstacles_are_monotonic(
        vel in velocity(),
        prices in prop::collection::vec(0.0f64..50.0, 1..12),
        frames in frames(),
    ) {
        let config = SimConfig {
            ball_start_vel: vel,
            ..Default::default()
        };
        let mut game = playing_game(config, &prices);
        let mut score = game.state().score;
        let mut active: Vec<bool> = game.state().obstacles.iter().map(|o| o.active).collect();

        for (left, right, dt) in frames {
            game.tick(&InputIntent { left, right }, dt);
            let state = game.state();

            prop_assert!(state.score >= score);
            for (was, now) in active.iter().zip(state.obstacles.iter()) {
                prop_assert!(*was || !now.active, "obstacle reactivated");
            }
            let destroyed = active.iter().zip(state.obstacles.iter())
                .filter(|(was, now)| **was && !now.active)
                .count();
            prop_assert!(destroyed <= 1, "{} obstacles destroyed in one tick", destroyed);

            // Won exactly when the board is clear
            prop_assert_eq!(state.phase == GamePhase::Won, state.obstacles.all_cleared());

            score = state.score;
            active = state.obstacles.iter().map(|o| o.active).collect();
        }
    }

    #[test]
    fn ticks_after_the_round_are_noops(
        vel in velocity(),
        frames in frames(),
    ) {
        let config = SimConfig {
            ball_start_vel: vel,
            starting_lives: 1,
            ..Default::default()
        };
        let mut game = playing_game(config, &[1.0, 2.0]);

        for (left, right, dt) in frames {
            let before = game.snapshot();
            game.tick(&InputIntent { left, right }, dt);
            if before.phase != GamePhase::Playing {
                prop_assert_eq!(game.snapshot(), before);
            }
            prop_assert!(game.state().lives <= 1);
            if game.state().lives == 0 {
                prop_assert_eq!(game.phase(), GamePhase::GameOver);
            }
        }
    }

    #[test]
    fn non_bottom_wall_reflection_preserves_speed(
        along in 10.0f32..700.0,
        overshoot in 0.01f32..15.0,
        vel in velocity(),
        wall in 0usize..3,
    ) {
        let container = Vec2::new(800.0, 800.0);
        let size = Vec2::splat(20.0);
        let pos = match wall {
            0 => Vec2::new(-overshoot, along),
            1 => Vec2::new(780.0 + overshoot, along),
            _ => Vec2::new(along, -overshoot),
        };
        let res = resolve_container(container, size, pos, vel, true);

        prop_assert_eq!(res.faces.count(), 1);
        prop_assert!(!res.faces.bottom);
        prop_assert!((res.vel.length() - vel.length()).abs() < 1e-5);
        if res.faces.top {
            prop_assert_eq!(res.vel, Vec2::new(vel.x, -vel.y));
        } else {
            prop_assert_eq!(res.vel, Vec2::new(-vel.x, vel.y));
        }
    }

    #[test]
    fn ball_resting_on_top_wall_reflects(
        x in 10.0f32..700.0,
        vel in velocity(),
    ) {
        let res = resolve_container(Vec2::new(800.0, 800.0), Vec2::splat(20.0), Vec2::new(x, 0.0), vel, true);
        prop_assert!(res.faces.top);
        prop_assert_eq!(res.vel, Vec2::new(vel.x, -vel.y));
        prop_assert_eq!(res.pos, Vec2::new(x, 0.0));
    }

    #[test]
    fn diagonal_corner_hit_reflects_straight_back(
        corner in 0usize..4,
        dist in 0.5f32..7.0,
        speed in 0.05f32..1.0,
    ) {
        let rect = Rect::new(Vec2::new(200.0, 200.0), Vec2::new(165.0, 40.0));
        let radius = 10.0;
        let c = rect.corners()[corner];
        // Outward diagonal away from the rect at this corner
        let outward = (c - rect.center()).signum() * std::f32::consts::FRAC_1_SQRT_2;
        let center = c + outward * dist;
        let vel = -outward * speed;

        let res = resolve_circle_rect(center - Vec2::splat(radius), vel, radius, &rect);
        prop_assert_eq!(res.faces.count(), 1);
        prop_assert!((res.vel + vel).length() < 1e-4, "{:?} vs {:?}", res.vel, vel);
    }

    #[test]
    fn circle_rect_reports_at_most_one_face(
        cx in 100.0f32..500.0,
        cy in 100.0f32..400.0,
        vel in velocity(),
    ) {
        let rect = Rect::new(Vec2::new(200.0, 200.0), Vec2::new(165.0, 40.0));
        let radius = 10.0;
        let res = resolve_circle_rect(Vec2::new(cx, cy) - Vec2::splat(radius), vel, radius, &rect);
        prop_assert!(res.faces.count() <= 1);
        if !res.faces.any() {
            prop_assert_eq!(res.vel, vel);
        }
    }

    #[test]
    fn center_inside_rect_passes_through(
        cx in 200.01f32..364.99,
        cy in 200.01f32..239.99,
        vel in velocity(),
    ) {
        let rect = Rect::new(Vec2::new(200.0, 200.0), Vec2::new(165.0, 40.0));
        let radius = 10.0;
        let pos = Vec2::new(cx, cy) - Vec2::splat(radius);
        let res = resolve_circle_rect(pos, vel, radius, &rect);
        prop_assert!(!res.faces.any());
        prop_assert_eq!(res.pos, pos);
        prop_assert_eq!(res.vel, vel);
    }
}

#[test]
fn paddle_spin_adds_a_fifth_of_paddle_velocity() {
    let config = SimConfig::default();
    let mut game = playing_game(
        SimConfig {
            // Ball centre lands 5px above the paddle top after 20ms
            ball_start: Vec2::new(150.0, 715.0),
            ball_start_vel: Vec2::new(0.0, 0.5),
            ..config
        },
        &[1.0],
    );

    game.tick(&InputIntent { left: false, right: true }, 20.0);
    assert!((game.state().ball.vel.x - 0.1).abs() < 1e-6);
    assert_eq!(game.state().ball.vel.y, -0.5);
}

#[test]
fn one_life_left_then_game_over() {
    let config = SimConfig {
        ball_start: Vec2::new(600.0, 778.0),
        ball_start_vel: Vec2::new(0.0, 0.3),
        starting_lives: 1,
        ..Default::default()
    };
    let mut game = playing_game(config, &[1.0]);

    game.tick(&InputIntent::default(), 16.0);
    assert_eq!(game.state().lives, 0);
    assert_eq!(game.phase(), GamePhase::GameOver);

    let frozen = game.snapshot();
    game.tick(&InputIntent::default(), 16.0);
    assert_eq!(game.snapshot(), frozen);
}
