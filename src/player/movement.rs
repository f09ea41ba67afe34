use bevy::prelude::*;
use crate::shared::*;

/// Move the player along the input axis at `PlayerState::speed` px/s.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    player_state: Res<PlayerState>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    if input.move_axis == Vec2::ZERO {
        return;
    }

    let delta = input.move_axis * player_state.speed * time.delta_secs();
    transform.translation.x += delta.x;
    transform.translation.y += delta.y;
}
