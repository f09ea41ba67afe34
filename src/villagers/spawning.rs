//! Villager spawning: build villager entities from the configured spawn list.
//! Villagers are never despawned once placed.

use bevy::prelude::*;
use rand::Rng;
use crate::shared::*;
use super::profiles::profile_for;
use super::wander::Wander;

/// Asset path of a villager sprite sheet, e.g. `villagers/HarpyStyle2.png`.
pub fn villager_sprite_path(villager_type: VillagerType, sprite_variation: u8) -> String {
    format!(
        "{}{}Style{}.png",
        VILLAGER_SPRITE_PATH,
        villager_type.name(),
        sprite_variation + 1
    )
}

/// Pick a display name from the profile's list.
pub fn choose_name<R: Rng + ?Sized>(villager_type: VillagerType, rng: &mut R) -> String {
    let names = profile_for(villager_type).possible_names();
    if names.is_empty() {
        return PLACEHOLDER_NAME.to_string();
    }
    names[rng.gen_range(0..names.len())].clone()
}

/// Spawn one villager. Gift tastes are read from the profile here and never
/// change afterwards.
pub fn spawn_villager<R: Rng + ?Sized>(
    commands: &mut Commands,
    spawn: &VillagerSpawn,
    config: &VillageConfig,
    rng: &mut R,
) -> Entity {
    let profile = profile_for(spawn.villager_type);
    let home = Vec2::new(spawn.home.0, spawn.home.1);
    let display_name = choose_name(spawn.villager_type, rng);
    let sprite_variation = rng.gen_range(0..SPRITE_VARIATIONS);

    commands
        .spawn((
            Villager {
                villager_type: spawn.villager_type,
                display_name,
                sprite_variation,
                is_merchant: spawn.is_merchant,
            },
            ReputationFlags::default(),
            GiftPreferences::new(profile.liked_gifts(), profile.disliked_gifts()),
            VillagerStats::default(),
            HomePosition(home),
            Wander::new(home, config),
            Facing::default(),
            Transform::from_xyz(home.x, home.y, Z_ENTITY_BASE),
            Visibility::default(),
        ))
        .id()
}

/// System: on entering Playing, place every configured villager.
pub fn spawn_village(
    mut commands: Commands,
    config: Res<VillageConfig>,
    mut rng: ResMut<VillageRng>,
) {
    for spawn in &config.villagers {
        let entity = spawn_villager(&mut commands, spawn, &config, &mut rng.0);
        info!(
            "[Village] Spawned {} at {:?} ({:?})",
            spawn.villager_type, spawn.home, entity
        );
    }
}
