//! Pickup collection and the win condition.

use crate::world::World;

/// Collects every uncollected collectible on the player's current layer whose
/// hitbox contains the player position. The hitbox is the collectible's own
/// sprite rectangle (inclusive on all edges), not the player's.
///
/// A collectible flips to collected at most once; its type counter is bumped
/// on that flip and never again.
pub fn collect(world: &mut World) {
    let layer = world.layer;
    let pos_x = world.pos_x;
    let pos_y = world.pos_y;

    // `layers` and `collectible_types` are disjoint fields, so the borrow
    // checker allows mutating the type counter inside the loop.
    let layers = &mut world.layers;
    let collectible_types = &mut world.collectible_types;

    for collectible in &mut layers[layer].collectibles {
        if collectible.collected {
            continue;
        }
        let sprite = &collectible_types[collectible.type_index].sprite;
        let inside_x = pos_x >= collectible.x as f32
            && pos_x <= (collectible.x + sprite.width() as i32) as f32;
        let inside_y = pos_y >= collectible.y as f32
            && pos_y <= (collectible.y + sprite.height() as i32) as f32;

        if inside_x && inside_y {
            collectible.collected = true;
            collectible_types[collectible.type_index].collected += 1;
        }
    }
}

/// The objective is met when every type with a positive goal has reached it.
/// Types with goal 0 are decorative and never block winning.
pub fn objective_met(world: &World) -> bool {
    world
        .collectible_types
        .iter()
        .all(|t| t.goal == 0 || t.collected >= t.goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::test_support::test_world;
    use crate::world::Collectible;

    fn place(world: &mut World, layer: usize, x: i32, y: i32) {
        world.layers[layer].collectibles.push(Collectible {
            x,
            y,
            type_index: 0,
            collected: false,
            visible: true,
        });
    }

    #[test]
    fn test_player_inside_hitbox_collects() {
        let mut world = test_world(1024, 720, 1);
        place(&mut world, 0, 100, 100);
        world.pos_x = 105.0;
        world.pos_y = 105.0;

        collect(&mut world);

        assert!(world.layers[0].collectibles[0].collected);
        assert_eq!(world.collectible_types[0].collected, 1);
        assert!(objective_met(&world));
    }

    #[test]
    fn test_hitbox_edges_are_inclusive() {
        // 16x16 sprite at (100, 100): corners (100,100) and (116,116) count.
        let mut world = test_world(1024, 720, 1);
        place(&mut world, 0, 100, 100);

        world.pos_x = 116.0;
        world.pos_y = 116.0;
        collect(&mut world);
        assert!(world.layers[0].collectibles[0].collected);

        let mut world = test_world(1024, 720, 1);
        place(&mut world, 0, 100, 100);
        world.pos_x = 116.5;
        world.pos_y = 100.0;
        collect(&mut world);
        assert!(!world.layers[0].collectibles[0].collected);
    }

    #[test]
    fn test_collects_at_most_once() {
        let mut world = test_world(1024, 720, 1);
        place(&mut world, 0, 100, 100);
        world.pos_x = 105.0;
        world.pos_y = 105.0;

        collect(&mut world);
        collect(&mut world);
        collect(&mut world);

        assert_eq!(world.collectible_types[0].collected, 1);
    }

    #[test]
    fn test_other_layers_are_ignored() {
        let mut world = test_world(1024, 720, 2);
        place(&mut world, 1, 100, 100);
        world.layer = 0;
        world.pos_x = 105.0;
        world.pos_y = 105.0;

        collect(&mut world);

        assert!(!world.layers[1].collectibles[0].collected);
    }

    #[test]
    fn test_objective_requires_every_scored_type() {
        let mut world = test_world(1024, 720, 1);
        world.collectible_types[0].goal = 2;
        world.collectible_types[0].collected = 1;
        assert!(!objective_met(&world));

        world.collectible_types[0].collected = 2;
        assert!(objective_met(&world));

        world.collectible_types[0].collected = 3;
        assert!(objective_met(&world));
    }

    #[test]
    fn test_goal_zero_type_never_blocks_winning() {
        let mut world = test_world(1024, 720, 1);
        world.collectible_types[0].goal = 0;
        world.collectible_types[0].collected = 0;
        assert!(objective_met(&world));
    }
}
