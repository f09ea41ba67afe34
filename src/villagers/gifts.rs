//! Gift evaluation: while the player is chatting with a villager and holding
//! an item, classify the item against the villager's tastes and push the
//! result through the reputation entry point.

use bevy::prelude::*;
use crate::shared::*;
use super::reputation::{ReputationLedger, VillageLedger};

/// Everything a single gift check needs to know about the moment.
#[derive(Debug, Clone, Copy)]
pub struct GiftContext<'a> {
    pub villager_type: VillagerType,
    pub preferences: &'a GiftPreferences,
    pub held: Option<&'a HeldItem>,
    /// Player is currently chatting with this villager.
    pub conversing: bool,
    pub region: Rect,
}

/// Evaluate a possible gift. Returns the outcome if the ledger was called.
///
/// A neutral item still calls the ledger with its (zero) delta, which is
/// what starts the cooldown and shows the feedback text. Favorited items
/// never reach the ledger.
pub fn attempt_gift<L: ReputationLedger>(
    ledger: &mut L,
    ctx: GiftContext<'_>,
    deltas: &GiftDeltas,
) -> Option<GiftOutcome> {
    if !ctx.conversing {
        return None;
    }
    let held = ctx.held.filter(|item| !item.is_empty())?;
    if ledger.gift_cooldown(ctx.villager_type) != 0 {
        return None;
    }
    if held.favorited {
        return None;
    }

    let outcome = ctx.preferences.classify(held.id);
    ledger.modify_reputation(
        ctx.villager_type,
        deltas.for_outcome(outcome),
        Some(ctx.region),
        true,
    );
    Some(outcome)
}

/// The villager's hitbox, centred on its transform.
pub fn villager_region(transform: &Transform, stats: &VillagerStats) -> Rect {
    Rect::from_center_size(
        transform.translation.truncate(),
        Vec2::new(stats.width, stats.height),
    )
}

/// System: run the gift check every tick for the villager being chatted with.
/// The per-type cooldown keeps this from firing again straight away.
pub fn evaluate_gifts(
    player_state: Res<PlayerState>,
    config: Res<VillageConfig>,
    mut village: ResMut<VillageState>,
    villager_query: Query<(Entity, &Villager, &GiftPreferences, &VillagerStats, &Transform)>,
    mut changes: EventWriter<ReputationChangedEvent>,
) {
    let Some(talking_to) = player_state.talking_to else {
        return;
    };
    let Ok((entity, villager, preferences, stats, transform)) = villager_query.get(talking_to)
    else {
        return;
    };

    let mut ledger = VillageLedger {
        state: &mut *village,
        cooldown_ticks: config.gift_cooldown_ticks,
        changes: &mut changes,
    };
    let ctx = GiftContext {
        villager_type: villager.villager_type,
        preferences,
        held: player_state.held_item(),
        conversing: player_state.talking_to == Some(entity),
        region: villager_region(transform, stats),
    };

    if let Some(outcome) = attempt_gift(&mut ledger, ctx, &config.gift_deltas) {
        info!(
            "[Village] {} reacted to a gift: {:?}",
            villager.display_name, outcome
        );
    }
}
