//! Villager visuals: sprite sheets, facing, and floating reputation text.
//!
//! Kept out of `VillagerPlugin` so the simulation runs headless; `main.rs`
//! adds `VillagerRenderPlugin` on top.

use bevy::asset::LoadState;
use bevy::prelude::*;
use crate::shared::*;
use super::spawning::villager_sprite_path;

/// Floating "+5" / "-5" / "0" text spawned for each reputation change.
#[derive(Component)]
pub struct ReputationPopup {
    pub timer: Timer,
    pub start_y: f32,
    pub color: Color,
}

pub fn popup_label(delta: f32) -> String {
    if delta == 0.0 {
        "0".to_string()
    } else {
        format!("{:+}", delta)
    }
}

pub fn popup_color(delta: f32) -> Color {
    if delta > 0.0 {
        Color::srgb(0.35, 0.9, 0.35)
    } else if delta < 0.0 {
        Color::srgb(0.95, 0.3, 0.3)
    } else {
        Color::srgb(0.75, 0.75, 0.75)
    }
}

/// Sheet requested for a villager that is still drawn as a placeholder.
#[derive(Component)]
pub struct PendingVillagerSheet(pub Handle<Image>);

/// Stand-in colour used until (or instead of, if missing) the sprite sheet.
pub fn placeholder_color(villager_type: VillagerType) -> Color {
    match villager_type {
        VillagerType::Harpy => Color::srgb(0.55, 0.7, 0.95),
        VillagerType::Lihzahrd => Color::srgb(0.75, 0.55, 0.2),
    }
}

/// System: give freshly spawned villagers a placeholder body and request
/// their sprite sheet.
pub fn attach_villager_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    query: Query<(Entity, &Villager, &VillagerStats), Without<Sprite>>,
) {
    for (entity, villager, stats) in query.iter() {
        let path = villager_sprite_path(villager.villager_type, villager.sprite_variation);
        commands.entity(entity).insert((
            Sprite::from_color(
                placeholder_color(villager.villager_type),
                Vec2::new(stats.width, stats.height),
            ),
            PendingVillagerSheet(asset_server.load(path)),
        ));

        // Floating name tag above the villager.
        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                Text2d::new(villager.display_name.clone()),
                TextFont {
                    font_size: 5.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, 26.0, 0.1),
            ));
        });
    }
}

/// System: swap the placeholder for the sheet once it has loaded. A sheet
/// that fails to load leaves the placeholder in place.
pub fn swap_loaded_villager_sheets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut query: Query<(Entity, &PendingVillagerSheet, &mut Sprite)>,
) {
    for (entity, pending, mut sprite) in &mut query {
        match asset_server.load_state(&pending.0) {
            LoadState::Loaded => {
                sprite.image = pending.0.clone();
                sprite.color = Color::WHITE;
                sprite.custom_size = None;
                commands.entity(entity).remove::<PendingVillagerSheet>();
            }
            LoadState::Failed(_) => {
                warn!("[Village] Missing villager sheet; keeping placeholder");
                commands.entity(entity).remove::<PendingVillagerSheet>();
            }
            _ => {}
        }
    }
}

/// System: sheets face left; flip them when walking right.
pub fn sync_villager_facing(mut query: Query<(&Facing, &mut Sprite), Changed<Facing>>) {
    for (facing, mut sprite) in query.iter_mut() {
        sprite.flip_x = *facing == Facing::Right;
    }
}

/// System: spawn a popup above the region of every reputation change.
pub fn spawn_reputation_popups(
    mut commands: Commands,
    mut changes: EventReader<ReputationChangedEvent>,
) {
    for change in changes.read() {
        let Some(region) = change.region else {
            continue;
        };
        let start_y = region.max.y + 4.0;
        let color = popup_color(change.delta);

        commands.spawn((
            ReputationPopup {
                timer: Timer::from_seconds(1.5, TimerMode::Once),
                start_y,
                color,
            },
            Text2d::new(popup_label(change.delta)),
            TextFont {
                font_size: 8.0,
                ..default()
            },
            TextColor(color),
            Transform::from_xyz(region.center().x, start_y, Z_ENTITY_BASE + 50.0),
        ));
    }
}

/// System: float popups upward, fade them out, then despawn.
pub fn animate_reputation_popups(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut ReputationPopup, &mut Transform, &mut TextColor)>,
) {
    for (entity, mut popup, mut transform, mut text_color) in &mut query {
        popup.timer.tick(time.delta());

        let progress = popup.timer.fraction();
        transform.translation.y = popup.start_y + progress * 12.0;

        // Fade out in last 30%
        let alpha = if progress > 0.7 {
            1.0 - (progress - 0.7) / 0.3
        } else {
            1.0
        };
        text_color.0 = popup.color.with_alpha(alpha);

        if popup.timer.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
