use serde::{Deserialize, Serialize};

/// Static world layout, loaded once from `assets/config/world.json`.
///
/// Everything the session needs that is not pixel data lives here: world
/// dimensions, the countdown length, the player's spawn point and the
/// collectible placements per layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    /// Countdown at the start of each play session, in seconds.
    pub time_limit: f32,
    pub player: PlayerConfig,
    pub collectible_types: Vec<CollectibleTypeConfig>,
    pub layers: Vec<LayerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub sprite: String,
    pub start_layer: usize,
    pub start_x: f32,
    pub start_y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleTypeConfig {
    pub name: String,
    /// How many must be collected to win. 0 means decorative, never scored.
    pub goal: u32,
    pub sprite: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    pub background: String,
    pub walk_mask: String,
    pub collectibles: Vec<PlacementConfig>,
}

/// One placed collectible, referencing its type by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(rename = "type")]
    pub type_name: String,
    pub x: i32,
    pub y: i32,
}

impl WorldConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: WorldConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
