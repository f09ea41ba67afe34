use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct ChatBoxRoot;

#[derive(Component)]
pub struct ChatSpeaker;

#[derive(Component)]
pub struct ChatText;

/// Button label slot: 0 for the first button, 1 for the second.
#[derive(Component)]
pub struct ChatButtonLabel {
    pub index: usize,
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN
// ═══════════════════════════════════════════════════════════════════════

/// The chat panel lives for the whole session and is only shown while a
/// conversation is open.
pub fn spawn_chat_box(mut commands: Commands) {
    commands
        .spawn((
            ChatBoxRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::FlexEnd,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                padding: UiRect::bottom(Val::Px(20.0)),
                ..default()
            },
            Visibility::Hidden,
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(640.0),
                        min_height: Val::Px(120.0),
                        flex_direction: FlexDirection::Column,
                        justify_content: JustifyContent::SpaceBetween,
                        padding: UiRect::all(Val::Px(14.0)),
                        row_gap: Val::Px(8.0),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.08, 0.1, 0.2, 0.9)),
                    BorderColor(Color::srgb(0.55, 0.6, 0.85)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        ChatSpeaker,
                        Text::new(""),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.9, 0.6)),
                    ));

                    panel.spawn((
                        ChatText,
                        Text::new(""),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));

                    // Button row
                    panel
                        .spawn(Node {
                            flex_direction: FlexDirection::Row,
                            column_gap: Val::Px(24.0),
                            ..default()
                        })
                        .with_children(|row| {
                            for index in 0..2 {
                                row.spawn((
                                    ChatButtonLabel { index },
                                    Text::new(""),
                                    TextFont {
                                        font_size: 14.0,
                                        ..default()
                                    },
                                    TextColor(Color::srgb(0.7, 0.85, 1.0)),
                                ));
                            }
                        });
                });
        });
}

// ═══════════════════════════════════════════════════════════════════════
// SYNC: mirror ChatState into the panel
// ═══════════════════════════════════════════════════════════════════════

pub fn button_caption(index: usize, label: &str) -> String {
    format!("[{}] {}", index + 1, label)
}

pub fn sync_chat_box(
    chat: Res<ChatState>,
    mut root_query: Query<&mut Visibility, With<ChatBoxRoot>>,
    mut speaker_query: Query<&mut Text, (With<ChatSpeaker>, Without<ChatText>)>,
    mut text_query: Query<&mut Text, (With<ChatText>, Without<ChatSpeaker>)>,
    mut button_query: Query<
        (&ChatButtonLabel, &mut Text),
        (Without<ChatSpeaker>, Without<ChatText>),
    >,
) {
    if !chat.is_changed() {
        return;
    }

    for mut vis in &mut root_query {
        *vis = if chat.is_open() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    for mut text in &mut speaker_query {
        **text = chat.speaker.clone();
    }
    for mut text in &mut text_query {
        **text = chat.text.clone();
    }

    for (label, mut text) in &mut button_query {
        let caption = chat.buttons.as_ref().and_then(|buttons| match label.index {
            0 => Some(buttons.first.as_str()),
            _ => buttons.second.as_deref(),
        });
        **text = caption
            .map(|c| button_caption(label.index, c))
            .unwrap_or_default();
    }
}
