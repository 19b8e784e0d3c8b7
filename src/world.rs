use crate::raster::Raster;

/// A category of pickup: name, win goal and the sprite shared by every
/// placed instance of the category.
#[derive(Debug)]
pub struct CollectibleType {
    pub name: String,
    /// How many must be collected to win. 0 means decorative, never scored.
    pub goal: u32,
    /// Running count for the current session. Monotonic until the next
    /// session reset.
    pub collected: u32,
    pub sprite: Raster,
}

/// One placed pickup. `type_index` points into `World::collectible_types`;
/// instances never own or copy sprite data.
#[derive(Debug)]
pub struct Collectible {
    pub x: i32,
    pub y: i32,
    pub type_index: usize,
    pub collected: bool,
    pub visible: bool,
}

/// One depth slice of the map. The walk mask has the same dimensions as the
/// background; its pixel colors encode passability and layer transitions.
#[derive(Debug)]
pub struct Layer {
    pub background: Raster,
    pub walk_mask: Raster,
    pub collectibles: Vec<Collectible>,
}

/// The session-scoped aggregate: map data plus the player's mutable state.
///
/// Owned exclusively by the game controller; rebuilt only when assets are
/// (re)loaded, reset in place at every title-screen entry.
#[derive(Debug)]
pub struct World {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<Layer>,
    pub collectible_types: Vec<CollectibleType>,

    pub player: Raster,
    pub pos_x: f32,
    pub pos_y: f32,
    /// Index into `layers`; movement keeps it in range.
    pub layer: usize,
    pub time_remaining: f32,

    pub viewport_x: i32,
    pub viewport_y: i32,

    // Session-start values, from the world config.
    start_layer: usize,
    start_x: f32,
    start_y: f32,
    time_limit: f32,
}

impl World {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: u32,
        height: u32,
        layers: Vec<Layer>,
        collectible_types: Vec<CollectibleType>,
        player: Raster,
        start_layer: usize,
        start_x: f32,
        start_y: f32,
        time_limit: f32,
    ) -> Self {
        World {
            width,
            height,
            layers,
            collectible_types,
            player,
            pos_x: start_x,
            pos_y: start_y,
            layer: start_layer,
            time_remaining: time_limit,
            viewport_x: 0,
            viewport_y: 0,
            start_layer,
            start_x,
            start_y,
            time_limit,
        }
    }

    /// Recomputes the camera window: the player centered, clamped so the
    /// viewport rectangle stays inside the world. Assumes the screen is no
    /// larger than the world.
    pub fn update_viewport(&mut self, screen_width: u32, screen_height: u32) {
        let pos_x = self.pos_x.round() as i32;
        let pos_y = self.pos_y.round() as i32;

        let offset_x = (screen_width / 2) as i32;
        let offset_y = (screen_height / 2) as i32;

        self.viewport_x = (pos_x - offset_x).clamp(0, self.width as i32 - screen_width as i32);
        self.viewport_y = (pos_y - offset_y).clamp(0, self.height as i32 - screen_height as i32);
    }

    /// Puts the session back to its start state: full clock, player at the
    /// spawn point, every collectible uncollected and visible, all type
    /// counters zeroed.
    pub fn reset_session(&mut self, screen_width: u32, screen_height: u32) {
        self.time_remaining = self.time_limit;
        self.layer = self.start_layer;
        self.pos_x = self.start_x;
        self.pos_y = self.start_y;
        self.update_viewport(screen_width, screen_height);

        for layer in &mut self.layers {
            for collectible in &mut layer.collectibles {
                collectible.collected = false;
                collectible.visible = true;
            }
        }
        for collectible_type in &mut self.collectible_types {
            collectible_type.collected = 0;
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use sdl2::pixels::Color;

    /// Builds a small world for state-machine and movement tests: one
    /// collectible type ("Eggs", goal 1 by default), `layer_count` layers
    /// with all-white (walkable) masks, player starting at the center.
    pub fn test_world(width: u32, height: u32, layer_count: usize) -> World {
        let white = Color::RGB(255, 255, 255);
        let layers = (0..layer_count)
            .map(|_| Layer {
                background: Raster::solid(width, height, Color::RGB(40, 40, 40)),
                walk_mask: Raster::solid(width, height, white),
                collectibles: Vec::new(),
            })
            .collect();

        let egg_type = CollectibleType {
            name: "Eggs".to_string(),
            goal: 1,
            collected: 0,
            sprite: Raster::solid(16, 16, Color::RGB(250, 240, 200)),
        };

        World::new(
            width,
            height,
            layers,
            vec![egg_type],
            Raster::solid(16, 16, Color::RGB(200, 100, 100)),
            0,
            width as f32 / 2.0,
            height as f32 / 2.0,
            180.0,
        )
    }
}
