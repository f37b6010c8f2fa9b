//! Tile placement
//!
//! All positions are arena-local pixel coordinates for a tile's top-left
//! corner, snapped to whole pixels. Position draws come from the daily RNG
//! channel so the day's layout rhythm is shared between players.

use glam::Vec2;

use crate::consts::{EDGE_PAD, LAYOUT_RETRIES, MIN_SEPARATION_FRAC};
use crate::rng::BlendedRng;

use super::state::Tile;

/// Measured arena and tile geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub tile_w: f32,
    pub tile_h: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32, tile_w: f32, tile_h: f32) -> Self {
        Self { width, height, tile_w, tile_h }
    }

    /// An arena the front end has not measured yet places nothing
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Largest valid x for a tile's top-left corner
    pub fn max_x(&self) -> f32 {
        (self.width - self.tile_w - EDGE_PAD).max(0.0)
    }

    /// Largest valid y for a tile's top-left corner
    pub fn max_y(&self) -> f32 {
        (self.height - self.tile_h - EDGE_PAD).max(0.0)
    }

    /// Clamp a candidate into the valid placement rectangle
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(EDGE_PAD.min(self.max_x()), self.max_x()),
            p.y.clamp(EDGE_PAD.min(self.max_y()), self.max_y()),
        )
    }
}

/// Uniform integer position within the padded arena bounds.
///
/// An arena smaller than tile + padding degenerates to a zero-area range and
/// still returns a valid (clamped) corner rather than failing.
pub fn random_position(arena: &Arena, rng: &mut BlendedRng) -> Vec2 {
    let lo_x = EDGE_PAD.min(arena.max_x());
    let lo_y = EDGE_PAD.min(arena.max_y());
    let x = rng.daily_range_i(lo_x as i32, arena.max_x() as i32) as f32;
    let y = rng.daily_range_i(lo_y as i32, arena.max_y() as i32) as f32;
    Vec2::new(x, y)
}

/// Shuffle every tile to a fresh random position.
///
/// Candidates landing within 68% of a tile's width/height of an
/// already-placed tile are redrawn a bounded number of times; after that the
/// overlap is accepted (cosmetic degradation, not a failure).
pub fn layout_all(tiles: &mut [Tile], arena: &Arena, rng: &mut BlendedRng) {
    if !arena.is_measured() {
        return;
    }

    let min_dx = arena.tile_w * MIN_SEPARATION_FRAC;
    let min_dy = arena.tile_h * MIN_SEPARATION_FRAC;
    let mut used: Vec<Vec2> = Vec::with_capacity(tiles.len());

    let clear = |p: Vec2, used: &[Vec2]| {
        used.iter()
            .all(|q| (q.x - p.x).abs() >= min_dx || (q.y - p.y).abs() >= min_dy)
    };

    for tile in tiles.iter_mut() {
        let mut p = random_position(arena, rng);
        let mut tries = 0;
        while !clear(p, &used) && tries < LAYOUT_RETRIES {
            p = random_position(arena, rng);
            tries += 1;
        }
        used.push(p);
        tile.pos = p;
    }
}

/// Position biased toward (but never exactly on) `target`.
///
/// `target` is the arena-local point the tile should stalk (a pointer or tap
/// sample). The tile is centered on a polar offset whose radius is uniform in
/// `[safe_r, hunt_r]`, then clamped into bounds; clamping against an arena
/// edge may bring the result closer than `safe_r`, which is accepted.
pub fn near_position(
    arena: &Arena,
    target: Vec2,
    safe_r: f32,
    hunt_r: f32,
    rng: &mut BlendedRng,
) -> Vec2 {
    let local = target - Vec2::new(arena.tile_w / 2.0, arena.tile_h / 2.0);

    let angle = rng.daily_range_f(0.0, std::f32::consts::TAU);
    let radius = rng.daily_range_f(safe_r, hunt_r);
    let p = local + Vec2::new(angle.cos(), angle.sin()) * radius;

    arena.clamp(p).round()
}
