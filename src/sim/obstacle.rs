//! Obstacle field: one destructible brick per receipt line item

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::{GridLayout, SimConfig};
use crate::error::SessionError;
use crate::receipts::LineItem;

/// A single brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Goes true -> false once, when struck
    pub active: bool,
    /// Reward credited on deactivation
    pub score: f64,
    pub image_path: String,
    /// Line item description
    #[serde(default)]
    pub name: String,
    pub rect: Rect,
}

/// The bricks of one round, in construction order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Build a field from line items, laid out on the configured grid.
    ///
    /// Non-finite prices reject the whole list. Negative prices (discount
    /// lines) are worth nothing so the score can only grow.
    pub fn from_line_items(items: &[LineItem], config: &SimConfig) -> Result<Self, SessionError> {
        let mut obstacles = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            if !item.price.is_finite() {
                return Err(SessionError::InvalidPrice {
                    index,
                    price: item.price,
                });
            }
            let score = if item.price < 0.0 {
                log::warn!(
                    "Line item {} ({:?}) has negative price {}, scoring it as 0",
                    index,
                    item.name,
                    item.price
                );
                0.0
            } else {
                item.price
            };

            obstacles.push(Obstacle {
                active: true,
                score,
                image_path: asset_url(&config.asset_base_url, &item.path),
                name: item.name.clone(),
                rect: grid_cell(&config.grid, config.container_size().x, index),
            });
        }

        Ok(Self { obstacles })
    }

    /// Wrap pre-built obstacles (tests and custom layouts)
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.active).count()
    }

    /// True once every obstacle has been struck
    pub fn all_cleared(&self) -> bool {
        self.obstacles.iter().all(|o| !o.active)
    }

    /// Total reward still on the board
    pub fn remaining_score(&self) -> f64 {
        self.obstacles.iter().filter(|o| o.active).map(|o| o.score).sum()
    }

    /// Deactivate an obstacle, returning its reward.
    ///
    /// Returns `None` if the index is out of range or already inactive, so an
    /// obstacle can never be credited twice.
    pub(crate) fn deactivate(&mut self, index: usize) -> Option<f64> {
        let obstacle = self.obstacles.get_mut(index)?;
        if !obstacle.active {
            return None;
        }
        obstacle.active = false;
        Some(obstacle.score)
    }
}

/// Rect of the `index`-th cell of a row-major grid
pub fn grid_cell(grid: &GridLayout, container_width: f32, index: usize) -> Rect {
    let columns = grid.columns.max(1);
    let gaps = (columns - 1) as f32 * grid.gap;
    let cell_width = ((container_width - 2.0 * grid.padding - gaps) / columns as f32).max(0.0);

    let col = index % columns;
    let row = index / columns;
    let x = grid.padding + col as f32 * (cell_width + grid.gap);
    let y = grid.padding + row as f32 * (grid.row_height + grid.gap);

    Rect::new(Vec2::new(x, y), Vec2::new(cell_width, grid.row_height))
}

fn asset_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, path: &str) -> LineItem {
        LineItem {
            price,
            path: path.to_string(),
            name: format!("item {}", path),
        }
    }

    #[test]
    fn test_grid_cell_default_layout() {
        let config = SimConfig::default();
        // (800 - 2*40 - 3*20) / 4 = 165
        let first = grid_cell(&config.grid, 800.0, 0);
        assert_eq!(first.pos, Vec2::new(40.0, 40.0));
        assert_eq!(first.size, Vec2::new(165.0, 40.0));

        let fourth = grid_cell(&config.grid, 800.0, 3);
        assert_eq!(fourth.pos, Vec2::new(40.0 + 3.0 * 185.0, 40.0));
        assert_eq!(fourth.right(), 760.0);

        let fifth = grid_cell(&config.grid, 800.0, 4);
        assert_eq!(fifth.pos, Vec2::new(40.0, 100.0));
    }

    #[test]
    fn test_from_line_items_keeps_order() {
        let config = SimConfig::default();
        let items = vec![item(1.5, "a.png"), item(2.25, "b.png"), item(3.0, "c.png")];
        let field = ObstacleField::from_line_items(&items, &config).unwrap();

        assert_eq!(field.len(), 3);
        assert_eq!(field.active_count(), 3);
        let scores: Vec<f64> = field.iter().map(|o| o.score).collect();
        assert_eq!(scores, vec![1.5, 2.25, 3.0]);
        assert_eq!(field.get(1).unwrap().image_path, "/b.png");
        assert!((field.remaining_score() - 6.75).abs() < 1e-9);
    }

    #[test]
    fn test_negative_price_scores_zero() {
        let config = SimConfig::default();
        let field = ObstacleField::from_line_items(&[item(-2.0, "coupon.png")], &config).unwrap();
        assert_eq!(field.get(0).unwrap().score, 0.0);
    }

    #[test]
    fn test_nan_price_is_rejected() {
        let config = SimConfig::default();
        let err = ObstacleField::from_line_items(&[item(1.0, "a"), item(f64::NAN, "b")], &config)
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidPrice { index: 1, .. }));
    }

    #[test]
    fn test_deactivate_only_once() {
        let config = SimConfig::default();
        let mut field = ObstacleField::from_line_items(&[item(4.0, "a")], &config).unwrap();
        assert_eq!(field.deactivate(0), Some(4.0));
        assert_eq!(field.deactivate(0), None);
        assert_eq!(field.deactivate(7), None);
        assert!(field.all_cleared());
    }

    #[test]
    fn test_asset_url_joins_cleanly() {
        assert_eq!(asset_url("http://localhost:8000/", "/images/x.png"), "http://localhost:8000/images/x.png");
        assert_eq!(asset_url("", "images/x.png"), "/images/x.png");
    }
}
