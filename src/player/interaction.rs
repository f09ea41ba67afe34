use bevy::prelude::*;
use crate::shared::*;

/// Closest villager within `range` of `origin`, if any.
pub fn nearest_villager_in_range<'a>(
    origin: Vec2,
    range: f32,
    villagers: impl IntoIterator<Item = (Entity, &'a Transform)>,
) -> Option<Entity> {
    let mut closest: Option<(Entity, f32)> = None;
    for (entity, transform) in villagers {
        let dist = origin.distance(transform.translation.truncate());
        if dist > range {
            continue;
        }
        match closest {
            Some((_, best)) if best <= dist => {}
            _ => closest = Some((entity, dist)),
        }
    }
    closest.map(|(entity, _)| entity)
}

/// Flip the favorite mark on the held item. Returns the new mark.
pub fn toggle_held_favorite(player_state: &mut PlayerState) -> Option<bool> {
    let held = player_state.held_item_mut()?;
    held.favorited = !held.favorited;
    Some(held.favorited)
}

/// System: turn talk / button / close input into chat events. Walking too
/// far from the villager ends the conversation.
pub fn handle_chat_input(
    input: Res<PlayerInput>,
    config: Res<VillageConfig>,
    player_state: Res<PlayerState>,
    chat: Res<ChatState>,
    player_query: Query<&Transform, With<Player>>,
    villager_query: Query<(Entity, &Transform), With<Villager>>,
    mut open_writer: EventWriter<ChatOpenEvent>,
    mut click_writer: EventWriter<ChatButtonClickedEvent>,
    mut close_writer: EventWriter<ChatCloseEvent>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    if input.talk {
        if let Some(villager) =
            nearest_villager_in_range(player_pos, config.chat_range, villager_query.iter())
        {
            open_writer.send(ChatOpenEvent { villager });
            return;
        }
    }

    let Some(talking_to) = player_state.talking_to else {
        return;
    };

    let out_of_range = villager_query
        .get(talking_to)
        .map(|(_, tf)| player_pos.distance(tf.translation.truncate()) > config.chat_range * 2.0)
        .unwrap_or(true);

    if input.close_chat || out_of_range {
        close_writer.send(ChatCloseEvent);
        return;
    }

    if input.chat_first_button {
        click_writer.send(ChatButtonClickedEvent {
            villager: talking_to,
            first_button: true,
        });
    } else if input.chat_second_button && second_button_shown(&chat) {
        click_writer.send(ChatButtonClickedEvent {
            villager: talking_to,
            first_button: false,
        });
    }
}

/// Only buttons the chat window actually shows can be clicked.
pub fn second_button_shown(chat: &ChatState) -> bool {
    chat.buttons
        .as_ref()
        .is_some_and(|buttons| buttons.second.is_some())
}

/// System: cycle the selected hotbar slot and toggle favorites.
pub fn handle_hotbar_input(
    input: Res<PlayerInput>,
    item_registry: Res<ItemRegistry>,
    mut player_state: ResMut<PlayerState>,
) {
    if input.cycle_hotbar && !player_state.hotbar.is_empty() {
        player_state.selected_slot = (player_state.selected_slot + 1) % player_state.hotbar.len();
    }

    if input.toggle_favorite {
        if let Some(favorited) = toggle_held_favorite(&mut player_state) {
            let name = player_state
                .held_item()
                .and_then(|item| item_registry.name(item.id))
                .unwrap_or("item");
            info!(
                "[Player] {} {}",
                name,
                if favorited { "favorited" } else { "unfavorited" }
            );
        }
    }
}
