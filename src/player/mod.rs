mod camera;
mod interaction;
mod movement;
mod spawn;

use bevy::prelude::*;
use crate::shared::*;

pub use interaction::{nearest_villager_in_range, toggle_held_favorite};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerState>();
        app.configure_sets(Update, TickSet::PlayerInput.before(TickSet::Village));

        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // -- Systems that run every frame while Playing --
        // Chat requests go out before the villager domain reads them this frame.
        app.add_systems(
            Update,
            (
                movement::player_movement,
                interaction::handle_chat_input,
                interaction::handle_hotbar_input,
                camera::camera_follow_player,
            )
                .chain()
                .in_set(TickSet::PlayerInput)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
