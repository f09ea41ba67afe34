mod chat_box;
mod hud;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── HUD: visible during Playing state ───
        app.add_systems(
            OnEnter(GameState::Playing),
            (hud::spawn_hud, chat_box::spawn_chat_box),
        );
        app.add_systems(
            Update,
            (
                hud::update_held_item_display,
                hud::update_reputation_display,
                chat_box::sync_chat_box,
            )
                .after(TickSet::Village)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
