use bevy::prelude::*;
use crate::shared::*;

/// Spawn the player entity in the middle of the village.
/// Runs once on `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn if returning to Playing state.
    if !existing.is_empty() {
        return;
    }

    commands.spawn((
        Player,
        // Placeholder sprite: a blue rectangle
        Sprite {
            color: Color::srgb(0.2, 0.5, 0.8),
            custom_size: Some(Vec2::new(TILE_SIZE, TILE_SIZE * 2.0)),
            ..default()
        },
        // Z above villagers so the player never hides behind them.
        Transform::from_translation(Vec3::new(0.0, 0.0, Z_ENTITY_BASE + 10.0)),
        Visibility::default(),
    ));
}
