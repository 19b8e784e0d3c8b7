//! World construction from the static layout config.
//!
//! Loading is deliberately not fail-fast: every raster that cannot be loaded
//! is recorded by name and replaced with a 1x1 transparent placeholder so the
//! rest of the pass can run and report everything at once. The world is only
//! handed out when the failure list is empty.

use crate::config::WorldConfig;
use crate::raster::Raster;
use crate::world::{Collectible, CollectibleType, Layer, World};
use sdl2::pixels::Color;

fn load_raster(path: &str, failed: &mut Vec<String>) -> Raster {
    match Raster::load_from_file(path) {
        Ok(raster) => raster,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            failed.push(path.to_string());
            Raster::solid(1, 1, Color::RGBA(0, 0, 0, 0))
        }
    }
}

/// Loads the layout config and every raster it names, building the world.
///
/// On any failure, returns the full list of resource names that could not be
/// loaded (plus any placements referencing an unknown collectible type).
pub fn load_world(config_path: &str) -> Result<World, Vec<String>> {
    let config = match WorldConfig::load_from_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            return Err(vec![config_path.to_string()]);
        }
    };

    let mut failed = Vec::new();

    let player = load_raster(&config.player.sprite, &mut failed);

    let mut collectible_types = Vec::with_capacity(config.collectible_types.len());
    for type_config in &config.collectible_types {
        collectible_types.push(CollectibleType {
            name: type_config.name.clone(),
            goal: type_config.goal,
            collected: 0,
            sprite: load_raster(&type_config.sprite, &mut failed),
        });
    }

    let type_index_by_name = |name: &str| {
        config
            .collectible_types
            .iter()
            .position(|t| t.name == name)
    };

    let mut layers = Vec::with_capacity(config.layers.len());
    for layer_config in &config.layers {
        let background = load_raster(&layer_config.background, &mut failed);
        let walk_mask = load_raster(&layer_config.walk_mask, &mut failed);

        let mut collectibles = Vec::with_capacity(layer_config.collectibles.len());
        for placement in &layer_config.collectibles {
            match type_index_by_name(&placement.type_name) {
                Some(type_index) => collectibles.push(Collectible {
                    x: placement.x,
                    y: placement.y,
                    type_index,
                    collected: false,
                    visible: true,
                }),
                None => {
                    failed.push(format!(
                        "unknown collectible type '{}'",
                        placement.type_name
                    ));
                }
            }
        }

        layers.push(Layer {
            background,
            walk_mask,
            collectibles,
        });
    }

    if !failed.is_empty() {
        return Err(failed);
    }

    Ok(World::new(
        config.width,
        config.height,
        layers,
        collectible_types,
        player,
        config.player.start_layer,
        config.player.start_x,
        config.player.start_y,
        config.time_limit,
    ))
}
