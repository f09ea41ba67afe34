//! Villager domain plugin for Living World.
//!
//! Owns reputation tiers, gift evaluation, dialogue selection, and the
//! chat buttons. Communicates exclusively through shared resources and events.

use bevy::prelude::*;
use crate::shared::*;

pub mod dialogue;
pub mod gifts;
pub mod profiles;
pub mod render;
pub mod reputation;
pub mod spawning;
pub mod wander;

use dialogue::{handle_chat_buttons, handle_chat_close, handle_chat_open};
use gifts::evaluate_gifts;
use render::{
    animate_reputation_popups, attach_villager_sprites, spawn_reputation_popups,
    swap_loaded_villager_sheets, sync_villager_facing,
};
use reputation::{init_village_tables, tick_gift_cooldowns, update_reputation_tiers};
use spawning::spawn_village;
use wander::wander_villagers;

pub struct VillagerPlugin;

impl Plugin for VillagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VillageState>()
            .init_resource::<VillageRng>()
            .init_resource::<ChatState>();

        // World load: table entries first, then the villagers themselves.
        app.add_systems(
            OnEnter(GameState::Playing),
            (init_village_tables, spawn_village).chain(),
        );

        // One simulation tick. Order matters: tiers must be fresh before
        // any chat handling reads them.
        app.add_systems(
            Update,
            (
                // Count down first so both gift paths below see the same window
                tick_gift_cooldowns,
                // Movement ("AI")
                wander_villagers,
                // Gift check while chatting, gated by cooldown
                evaluate_gifts,
                // Post-AI tier refresh
                update_reputation_tiers,
                // Chat surface
                handle_chat_open,
                handle_chat_buttons,
                handle_chat_close,
            )
                .chain()
                .in_set(TickSet::Village)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Sprites, facing and reputation popups. Needs the asset server.
pub struct VillagerRenderPlugin;

impl Plugin for VillagerRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_villager_sprites,
                swap_loaded_villager_sheets,
                sync_villager_facing,
                spawn_reputation_popups,
                animate_reputation_popups,
            )
                .after(TickSet::Village)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
