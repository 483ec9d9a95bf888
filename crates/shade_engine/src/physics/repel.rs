//! Positional collision response
//!
//! Obstacles never move in response to a collision; they push the other
//! body out. Round obstacles push along the line between centers, boxy
//! obstacles undo the repellee's last step along the axis of least overlap.

use crate::foundation::math::{calculate_vector, Vec2};
use super::collider::Body;

/// Overshoot applied to radial pushes so the pair ends up clear of each other
const RADIAL_PUSH_FACTOR: f32 = 1.5;

/// Push `repellee` directly away from a round `obstacle`.
pub fn repel_radially<O, R>(obstacle: &O, repellee: &mut R)
where
    O: Body + ?Sized,
    R: Body + ?Sized,
{
    let offset = repellee.center() - obstacle.center();
    let distance = offset.magnitude();
    let reach = repellee.width() / 2.0 + obstacle.width() / 2.0;
    let angle = offset.y.atan2(offset.x);
    let push = (reach - distance) * RADIAL_PUSH_FACTOR;
    repellee.nudge(calculate_vector(push, angle));
}

/// Push `repellee` out of a box-shaped `obstacle` by reversing its motion
/// along whichever axis it overlaps least.
pub fn repel_along_axis<O, R>(obstacle: &O, repellee: &mut R)
where
    O: Body + ?Sized,
    R: Body + ?Sized,
{
    let mut velocity = repellee.velocity() - obstacle.velocity();
    let body = repellee.center();
    let (half_w, half_h) = (repellee.width() / 2.0, repellee.height() / 2.0);
    let center = obstacle.center();
    let (obstacle_w, obstacle_h) = (obstacle.width() / 2.0, obstacle.height() / 2.0);

    let right = body.x - half_w - (center.x + obstacle_w);
    let left = body.x + half_w - (center.x - obstacle_w);
    let top = body.y - half_h - (center.y + obstacle_h);
    let bottom = body.y + half_h - (center.y - obstacle_h);

    let min_x = right.abs().min(left.abs());
    let min_y = top.abs().min(bottom.abs());

    if min_x < min_y {
        // if we move, move AWAY from the block
        if (body.x - center.x - velocity.x).abs() < (body.x - center.x).abs() {
            velocity.x = -velocity.x;
        }
        repellee.nudge(Vec2::new(-velocity.x, 0.0));
    } else {
        if (body.y - center.y - velocity.y).abs() < (body.y - center.y).abs() {
            velocity.y = -velocity.y;
        }
        repellee.nudge(Vec2::new(0.0, -velocity.y));
    }
}
