//! Data layer: loads the village config and item names at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), reads
//! `assets/config/village.ron` (falling back to defaults), fills the
//! ItemRegistry, seeds the shared RNG, then transitions to Playing.

mod items;

use bevy::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;
use crate::shared::*;

pub use items::populate_items;

pub const CONFIG_PATH: &str = "assets/config/village.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse village config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

pub fn parse_config(text: &str) -> Result<VillageConfig, ConfigError> {
    Ok(ron::from_str(text)?)
}

pub fn read_config(path: &Path) -> Result<VillageConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&text)
}

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that loads config and registries, then transitions to Playing.
fn load_all_data(
    mut commands: Commands,
    mut item_registry: ResMut<ItemRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: loading village data…");

    let config = match read_config(Path::new(CONFIG_PATH)) {
        Ok(config) => {
            info!("[Config] Loaded {}", CONFIG_PATH);
            config
        }
        Err(err) => {
            warn!("[Config] {err}; using defaults");
            VillageConfig::default()
        }
    };
    info!(
        "  Villagers configured: {}, gift cooldown: {} ticks",
        config.villagers.len(),
        config.gift_cooldown_ticks
    );

    if let Some(seed) = config.rng_seed {
        info!("  RNG seeded with {}", seed);
        commands.insert_resource(VillageRng::seeded(seed));
    }
    commands.insert_resource(config);

    populate_items(&mut item_registry);
    info!("  Items loaded: {}", item_registry.items.len());

    next_state.set(GameState::Playing);
}
