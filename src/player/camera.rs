use bevy::prelude::*;
use crate::shared::*;

/// Smoothly follow the player with the camera using a lerp.
pub fn camera_follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player_tf) = player_query.get_single() else {
        return;
    };
    let Ok(mut cam_tf) = camera_query.get_single_mut() else {
        return;
    };

    let target = player_tf.translation.truncate();
    let lerp_speed = 5.0;
    let t = (lerp_speed * time.delta_secs()).min(1.0);
    cam_tf.translation.x += (target.x - cam_tf.translation.x) * t;
    cam_tf.translation.y += (target.y - cam_tf.translation.y) * t;
}
