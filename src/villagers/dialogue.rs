//! Chat surface: opening chat (gift check + dialogue line), the two chat
//! buttons, and closing chat.

use bevy::prelude::*;
use rand::Rng;
use crate::shared::*;
use crate::weighted::WeightedPool;
use super::gifts::{attempt_gift, villager_region, GiftContext};
use super::profiles::{profile_for, ChatContext};
use super::reputation::VillageLedger;

pub const SHOP_LABEL: &str = "Shop";
pub const REPUTATION_LABEL: &str = "Reputation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatButtonAction {
    OpenShop,
    ShowReputation,
}

/// Button labels: merchants get a shop button first, everyone gets
/// Reputation.
pub fn chat_buttons(is_merchant: bool) -> ChatButtons {
    if is_merchant {
        ChatButtons {
            first: SHOP_LABEL.to_string(),
            second: Some(REPUTATION_LABEL.to_string()),
        }
    } else {
        ChatButtons {
            first: REPUTATION_LABEL.to_string(),
            second: None,
        }
    }
}

/// What a button click does. A second-button click on a non-merchant opens
/// the shop even though that button is never shown.
pub fn resolve_chat_button(first_button: bool, is_merchant: bool) -> ChatButtonAction {
    match (first_button, is_merchant) {
        (true, true) => ChatButtonAction::OpenShop,
        (true, false) => ChatButtonAction::ShowReputation,
        (false, true) => ChatButtonAction::ShowReputation,
        (false, false) => ChatButtonAction::OpenShop,
    }
}

/// Draw a line from a pool, falling back to the placeholder when the pool
/// has nothing drawable.
pub fn draw_line<R: Rng + ?Sized>(pool: &WeightedPool<String>, rng: &mut R) -> String {
    match pool.select_random(rng) {
        Ok(line) => line.clone(),
        Err(err) => {
            warn!("[Village] {err}; using placeholder line");
            PLACEHOLDER_LINE.to_string()
        }
    }
}

/// System: handle ChatOpenEvent. Attempts a gift first, then picks the
/// villager's opening line from its dialogue pool.
pub fn handle_chat_open(
    mut open_reader: EventReader<ChatOpenEvent>,
    villager_query: Query<(
        &Villager,
        &ReputationFlags,
        &GiftPreferences,
        &VillagerStats,
        &Transform,
    )>,
    config: Res<VillageConfig>,
    mut player_state: ResMut<PlayerState>,
    mut village: ResMut<VillageState>,
    mut rng: ResMut<VillageRng>,
    mut chat: ResMut<ChatState>,
    mut changes: EventWriter<ReputationChangedEvent>,
) {
    for event in open_reader.read() {
        let Ok((villager, flags, preferences, stats, transform)) =
            villager_query.get(event.villager)
        else {
            warn!("[Village] Chat opened with missing villager {:?}", event.villager);
            continue;
        };

        player_state.talking_to = Some(event.villager);

        let mut ledger = VillageLedger {
            state: &mut *village,
            cooldown_ticks: config.gift_cooldown_ticks,
            changes: &mut changes,
        };
        let gift = GiftContext {
            villager_type: villager.villager_type,
            preferences,
            held: player_state.held_item(),
            conversing: true,
            region: villager_region(transform, stats),
        };
        attempt_gift(&mut ledger, gift, &config.gift_deltas);

        let ctx = ChatContext {
            villager_type: villager.villager_type,
            display_name: &villager.display_name,
            flags: *flags,
        };
        let pool = profile_for(villager.villager_type).dialogue(&ctx);

        chat.villager = Some(event.villager);
        chat.speaker = villager.display_name.clone();
        chat.text = draw_line(&pool, &mut rng.0);
        chat.buttons = Some(chat_buttons(villager.is_merchant));
    }
}

/// System: handle ChatButtonClickedEvent.
pub fn handle_chat_buttons(
    mut click_reader: EventReader<ChatButtonClickedEvent>,
    villager_query: Query<(&Villager, &ReputationFlags)>,
    mut rng: ResMut<VillageRng>,
    mut chat: ResMut<ChatState>,
    mut shop_writer: EventWriter<ShopOpenEvent>,
) {
    for event in click_reader.read() {
        let Ok((villager, flags)) = villager_query.get(event.villager) else {
            continue;
        };

        match resolve_chat_button(event.first_button, villager.is_merchant) {
            ChatButtonAction::OpenShop => {
                info!("[Village] Opening {}'s shop", villager.display_name);
                shop_writer.send(ShopOpenEvent {
                    villager: event.villager,
                    villager_type: villager.villager_type,
                });
            }
            ChatButtonAction::ShowReputation => {
                let ctx = ChatContext {
                    villager_type: villager.villager_type,
                    display_name: &villager.display_name,
                    flags: *flags,
                };
                let pool = profile_for(villager.villager_type).reputation_text(&ctx);
                chat.text = draw_line(&pool, &mut rng.0);
            }
        }
    }
}

/// System: handle ChatCloseEvent.
pub fn handle_chat_close(
    mut close_reader: EventReader<ChatCloseEvent>,
    mut player_state: ResMut<PlayerState>,
    mut chat: ResMut<ChatState>,
) {
    if close_reader.read().last().is_none() {
        return;
    }
    player_state.talking_to = None;
    *chat = ChatState::default();
}
