//! Player movement against the walk mask.
//!
//! Movement is sub-pixel accumulated: each frame banks `speed * elapsed`
//! into a per-axis accumulator and then drains it one whole pixel at a time,
//! sampling the walk mask before every single-pixel step. That keeps
//! collision resolution at one-pixel precision no matter how long the frame
//! was; a fast frame simply drains more steps.

use crate::input::{InputSnapshot, Key};
use crate::world::World;
use sdl2::pixels::Color;

/// Player speed in world pixels per second.
pub const PLAYER_SPEED: f32 = 60.0;

/// Per-axis sub-pixel accumulators. Reset whenever the game mode changes so
/// banked movement never leaks across a pause or a new session.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveState {
    pub acc_x: f32,
    pub acc_y: f32,
}

impl MoveState {
    pub fn reset(&mut self) {
        self.acc_x = 0.0;
        self.acc_y = 0.0;
    }
}

/// What a walk-mask pixel means for a step into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    /// Walkable ground (any color without a special meaning).
    Open,
    /// Wall (black). The step is swallowed.
    Blocked,
    /// Step through and drop to the layer below (blue).
    Descend,
    /// Step through and climb to the layer above (yellow).
    Ascend,
}

impl Terrain {
    pub fn classify(color: Color) -> Terrain {
        // Out-of-bounds mask reads come back as transparent black, which is
        // open ground, not a wall; only opaque black blocks.
        match (color.r, color.g, color.b) {
            (0, 0, 0) if color.a != 0 => Terrain::Blocked,
            (0, 0, 255) => Terrain::Descend,
            (255, 255, 0) => Terrain::Ascend,
            _ => Terrain::Open,
        }
    }
}

/// Advances the player by one frame of held directional input.
///
/// Each of the four directions is processed independently, so diagonals move
/// on both axes in the same frame. Afterwards the position is clamped to the
/// world rectangle.
pub fn step_player(world: &mut World, input: &InputSnapshot, elapsed: f32, state: &mut MoveState) {
    let step = PLAYER_SPEED * elapsed;

    if input.held(Key::Up) {
        state.acc_y -= step;
        walk(world, &mut state.acc_y, 0, -1);
    }
    if input.held(Key::Down) {
        state.acc_y += step;
        walk(world, &mut state.acc_y, 0, 1);
    }
    if input.held(Key::Left) {
        state.acc_x -= step;
        walk(world, &mut state.acc_x, -1, 0);
    }
    if input.held(Key::Right) {
        state.acc_x += step;
        walk(world, &mut state.acc_x, 1, 0);
    }

    world.pos_x = world.pos_x.clamp(0.0, world.width as f32);
    world.pos_y = world.pos_y.clamp(0.0, world.height as f32);
}

/// Drains whole pixels of `acc` in the direction (dx, dy), sampling the
/// current layer's walk mask one pixel ahead before each step.
fn walk(world: &mut World, acc: &mut f32, dx: i32, dy: i32) {
    let dir = (dx + dy) as f32;

    while *acc * dir >= 1.0 {
        *acc -= dir;

        let sample_x = world.pos_x as i32 + dx;
        let sample_y = world.pos_y as i32 + dy;
        let pixel = world.layers[world.layer].walk_mask.get_pixel(sample_x, sample_y);

        match Terrain::classify(pixel) {
            Terrain::Descend => {
                advance(world, dx, dy);
                // Transition colors are a content contract; clamp so a
                // malformed mask at the bottom layer cannot underflow.
                world.layer = world.layer.saturating_sub(1);
            }
            Terrain::Ascend => {
                advance(world, dx, dy);
                world.layer = (world.layer + 1).min(world.layers.len() - 1);
            }
            Terrain::Blocked => {}
            Terrain::Open => advance(world, dx, dy),
        }
    }
}

fn advance(world: &mut World, dx: i32, dy: i32) {
    world.pos_x += dx as f32;
    world.pos_y += dy as f32;
}
