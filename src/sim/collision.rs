//! Collision response for axis-aligned bodies
//!
//! Bodies move first, then get pushed out of whatever they overlap. The
//! previous position is reconstructed from the current velocity
//! (`prev = pos - vel`), which is what the directional tests compare against.

use glam::Vec2;

use super::blocks::Block;
use super::geometry::{Rect, overlap_depth, overlaps};

/// Static level geometry seen by enemies, power-ups and projectiles
#[derive(Clone, Copy)]
pub struct Terrain<'a> {
    pub platforms: &'a [Rect],
    pub blocks: &'a [Block],
}

impl<'a> Terrain<'a> {
    pub fn new(platforms: &'a [Rect], blocks: &'a [Block]) -> Self {
        Self { platforms, blocks }
    }

    /// Surfaces walkers can land on (hidden blocks excluded)
    pub fn walker_surfaces(&self) -> impl Iterator<Item = &'a Rect> + 'a {
        self.platforms.iter().chain(
            self.blocks
                .iter()
                .filter(|b| b.supports_walkers())
                .map(|b| &b.rect),
        )
    }

    /// Surfaces projectiles bounce off (hidden and temporary coin blocks excluded)
    pub fn projectile_surfaces(&self) -> impl Iterator<Item = &'a Rect> + 'a {
        self.platforms.iter().chain(
            self.blocks
                .iter()
                .filter(|b| b.stops_projectiles())
                .map(|b| &b.rect),
        )
    }

    /// Ledge check: a platform or a permanent, visible block contains the point
    pub fn has_ground_at(&self, point: Vec2) -> bool {
        self.platforms.iter().any(|p| p.contains_point(point))
            || self
                .blocks
                .iter()
                .filter(|b| b.stops_projectiles())
                .any(|b| b.rect.contains_point(point))
    }
}

/// Side of an obstacle a body was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Came down onto the top surface
    Landed,
    /// Moving up into the underside
    HeadBump,
    /// Moving right into the obstacle's left face
    BlockedRight,
    /// Moving left into the obstacle's right face
    BlockedLeft,
}

/// Push `body` out of a solid `obstacle`.
///
/// The axis with the smaller penetration is tried first; if the previous
/// position does not explain an approach along that axis, the other axis is
/// tried. Velocity along the resolved axis is zeroed.
pub fn resolve_solid(body: &mut Rect, vel: &mut Vec2, obstacle: &Rect) -> Option<Contact> {
    if !overlaps(body, obstacle) {
        return None;
    }

    let depth = overlap_depth(body, obstacle);
    if depth.x > depth.y {
        resolve_vertical(body, vel, obstacle).or_else(|| resolve_horizontal(body, vel, obstacle))
    } else {
        resolve_horizontal(body, vel, obstacle).or_else(|| resolve_vertical(body, vel, obstacle))
    }
}

fn resolve_vertical(body: &mut Rect, vel: &mut Vec2, obstacle: &Rect) -> Option<Contact> {
    if vel.y > 0.0 && body.bottom() - vel.y <= obstacle.top() {
        body.y = obstacle.top() - body.height;
        vel.y = 0.0;
        Some(Contact::Landed)
    } else if vel.y < 0.0 && body.top() - vel.y >= obstacle.bottom() {
        body.y = obstacle.bottom();
        vel.y = 0.0;
        Some(Contact::HeadBump)
    } else {
        None
    }
}

fn resolve_horizontal(body: &mut Rect, vel: &mut Vec2, obstacle: &Rect) -> Option<Contact> {
    if vel.x > 0.0 && body.right() - vel.x <= obstacle.left() {
        body.x = obstacle.left() - body.width;
        vel.x = 0.0;
        Some(Contact::BlockedRight)
    } else if vel.x < 0.0 && body.left() - vel.x >= obstacle.right() {
        body.x = obstacle.right();
        vel.x = 0.0;
        Some(Contact::BlockedLeft)
    } else {
        None
    }
}

/// True if a falling body crossed the top edge of `surface` this tick
#[inline]
pub fn is_landing(body: &Rect, vel_y: f32, surface: &Rect) -> bool {
    vel_y > 0.0 && body.bottom() - vel_y <= surface.top() && overlaps(body, surface)
}

/// One-way landing: snap onto the surface if falling through its top edge.
///
/// Side and underside contact is ignored. Returns true when the body landed.
pub fn land_on(body: &mut Rect, vel: &mut Vec2, surface: &Rect) -> bool {
    if is_landing(body, vel.y, surface) {
        body.y = surface.top() - body.height;
        vel.y = 0.0;
        true
    } else {
        false
    }
}
