use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS: used to query and update HUD elements
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudHeldItemText;

/// One reputation line per villager type.
#[derive(Component)]
pub struct HudReputationText {
    pub villager_type: VillagerType,
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN HUD
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Px(8.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                HudHeldItemText,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            for villager_type in VillagerType::ALL {
                parent.spawn((
                    HudReputationText { villager_type },
                    Text::new(""),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.8, 0.8, 0.8)),
                ));
            }
        });
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn held_item_label(item: Option<&HeldItem>, registry: &ItemRegistry) -> String {
    let Some(item) = item else {
        return "Empty hand".to_string();
    };
    let name = registry
        .name(item.id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Item #{}", item.id.0));
    let star = if item.favorited { " *" } else { "" };
    format!("{} x{}{}", name, item.stack, star)
}

pub fn reputation_label(villager_type: VillagerType, score: f32) -> String {
    format!(
        "{}: {:.0} ({})",
        villager_type,
        score,
        ReputationTier::from_score(score).label()
    )
}

pub fn update_held_item_display(
    player_state: Res<PlayerState>,
    item_registry: Res<ItemRegistry>,
    mut query: Query<&mut Text, With<HudHeldItemText>>,
) {
    if !player_state.is_changed() {
        return;
    }
    let label = held_item_label(player_state.held_item(), &item_registry);
    for mut text in &mut query {
        **text = label.clone();
    }
}

pub fn update_reputation_display(
    village: Res<VillageState>,
    mut query: Query<(&HudReputationText, &mut Text)>,
) {
    if !village.is_changed() {
        return;
    }
    for (line, mut text) in &mut query {
        **text = reputation_label(line.villager_type, village.reputation(line.villager_type));
    }
}
