//! Collision detection between the actor's hitbox and obstacles
//!
//! Any overlap is terminal, so the query stops at the first hit.

use super::obstacles::Obstacle;
use super::rect::{Body, Rect};

/// Result of a collision query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Id of the first obstacle found overlapping
    pub obstacle_id: u32,
    /// Overlap region
    pub overlap: Rect,
}

/// First obstacle (in spawn order) whose full bounds overlap `hitbox`
pub fn first_hit<'a, I>(hitbox: &Rect, obstacles: I) -> Option<CollisionResult>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    obstacles.into_iter().find_map(|obstacle| {
        let bounds = obstacle.bounds();
        hitbox.overlaps(&bounds).then(|| CollisionResult {
            obstacle_id: obstacle.id,
            overlap: intersection(hitbox, &bounds),
        })
    })
}

/// Intersection of two rectangles known to overlap
fn intersection(a: &Rect, b: &Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    Rect::new(x, y, a.right().min(b.right()) - x, a.bottom().min(b.bottom()) - y)
}
