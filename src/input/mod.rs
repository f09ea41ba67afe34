use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .init_resource::<KeyBindings>()
            .add_systems(PreUpdate, reset_and_read_input);
    }
}

/// The single point where hardware input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    let mut axis = Vec2::ZERO;
    if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    input.move_axis = if axis != Vec2::ZERO {
        axis.normalize()
    } else {
        Vec2::ZERO
    };

    input.talk = keys.just_pressed(bindings.talk);
    input.chat_first_button = keys.just_pressed(bindings.chat_first_button);
    input.chat_second_button = keys.just_pressed(bindings.chat_second_button);
    input.close_chat = keys.just_pressed(bindings.close_chat);
    input.cycle_hotbar =
        keys.just_pressed(bindings.cycle_hotbar) || keys.just_pressed(KeyCode::Tab);
    input.toggle_favorite = keys.just_pressed(bindings.toggle_favorite);
}
