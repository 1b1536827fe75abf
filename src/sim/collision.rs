//! Collision detection and response for axis-aligned geometry
//!
//! Two resolvers: a body against the inner walls of its container, and the
//! ball (a circle) against any rect. Both are pure: they take the current
//! position and velocity and return corrected copies plus the faces struck.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Which faces of a rect were struck during one resolution call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFaces {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl CollisionFaces {
    pub const NONE: Self = Self {
        top: false,
        right: false,
        bottom: false,
        left: false,
    };

    /// Whether any face was struck
    #[inline]
    pub fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }

    /// Number of faces struck
    pub fn count(&self) -> usize {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .filter(|f| **f)
            .count()
    }
}

/// Result of a resolution call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub pos: Vec2,
    pub vel: Vec2,
    pub faces: CollisionFaces,
}

impl Resolution {
    /// No contact: position and velocity pass through
    pub fn miss(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            faces: CollisionFaces::NONE,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Keep a body inside its container.
///
/// Each axis is checked on its own, so a body pushed into a container corner
/// reports two faces. With `reflect` the velocity component on a struck axis
/// is negated; without it the body just stops at the wall.
pub fn resolve_container(
    container_size: Vec2,
    body_size: Vec2,
    pos: Vec2,
    vel: Vec2,
    reflect: bool,
) -> Resolution {
    let mut new_pos = pos;
    let mut new_vel = vel;
    let mut faces = CollisionFaces::NONE;
    let far = container_size - body_size;

    if pos.x > far.x {
        if reflect {
            new_vel.x = -new_vel.x;
        }
        new_pos.x = far.x;
        faces.right = true;
    } else if pos.x < 0.0 {
        if reflect {
            new_vel.x = -new_vel.x;
        }
        new_pos.x = 0.0;
        faces.left = true;
    }

    if pos.y > far.y {
        if reflect {
            new_vel.y = -new_vel.y;
        }
        new_pos.y = far.y;
        faces.bottom = true;
    } else if pos.y <= 0.0 {
        // Resting exactly on the top wall still counts as a hit
        if reflect {
            new_vel.y = -new_vel.y;
        }
        new_pos.y = 0.0;
        faces.top = true;
    }

    Resolution {
        pos: new_pos,
        vel: new_vel,
        faces,
    }
}

/// Resolve the ball against a rect using the closest-point method.
///
/// `circle_pos` is the top-left of the circle's bounding square, so the
/// centre sits at `circle_pos + radius`. On contact the circle is moved flush
/// against the struck face and exactly one face is reported. When the
/// closest point is in both an x and a y extreme, right wins over left, left
/// over bottom, bottom over top.
pub fn resolve_circle_rect(circle_pos: Vec2, circle_vel: Vec2, radius: f32, rect: &Rect) -> Resolution {
    let center = circle_pos + Vec2::splat(radius);
    let closest = rect.closest_point(center);
    let offset = center - closest;

    if offset.length_squared() > radius * radius {
        return Resolution::miss(circle_pos, circle_vel);
    }

    let on_right = closest.x == rect.right();
    let on_left = closest.x == rect.left();
    let on_bottom = closest.y == rect.bottom();
    let on_top = closest.y == rect.top();

    // Centre strictly inside: the closest point touches no edge, so the ball
    // passes through untouched.
    if !(on_right || on_left || on_bottom || on_top) {
        return Resolution::miss(circle_pos, circle_vel);
    }

    let mut vel = circle_vel;
    if rect.is_corner(closest) {
        // Grazing a corner with the centre exactly on it leaves no direction
        // to reflect about; fall back to reversing both axes.
        vel = match offset.try_normalize() {
            Some(normal) => reflect_velocity(circle_vel, normal),
            None => -circle_vel,
        };
    } else if on_right || on_left {
        vel.x = -vel.x;
    } else if on_top || on_bottom {
        vel.y = -vel.y;
    }

    let diameter = radius * 2.0;
    let mut pos = circle_pos;
    let mut faces = CollisionFaces::NONE;
    if on_right {
        pos.x = rect.right();
        faces.right = true;
    } else if on_left {
        pos.x = rect.left() - diameter;
        faces.left = true;
    } else if on_bottom {
        pos.y = rect.bottom();
        faces.bottom = true;
    } else if on_top {
        pos.y = rect.top() - diameter;
        faces.top = true;
    }

    Resolution { pos, vel, faces }
}
