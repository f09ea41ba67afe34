//! Reputation bookkeeping: the modification entry point, gift cooldowns, and
//! the per-tick tier refresh that everything tier-dependent reads.

use bevy::prelude::*;
use crate::shared::*;

/// The world-side collaborator gift evaluation talks to.
pub trait ReputationLedger {
    fn gift_cooldown(&self, villager_type: VillagerType) -> u32;

    fn modify_reputation(
        &mut self,
        villager_type: VillagerType,
        delta: f32,
        region: Option<Rect>,
        from_gift: bool,
    );
}

/// Ledger backed by `VillageState` that reports every change as a
/// `ReputationChangedEvent`.
pub struct VillageLedger<'a, 'w> {
    pub state: &'a mut VillageState,
    pub cooldown_ticks: u32,
    pub changes: &'a mut EventWriter<'w, ReputationChangedEvent>,
}

impl ReputationLedger for VillageLedger<'_, '_> {
    fn gift_cooldown(&self, villager_type: VillagerType) -> u32 {
        self.state.gift_cooldown(villager_type)
    }

    fn modify_reputation(
        &mut self,
        villager_type: VillagerType,
        delta: f32,
        region: Option<Rect>,
        from_gift: bool,
    ) {
        let change = self.state.modify_reputation(
            villager_type,
            delta,
            region,
            from_gift,
            self.cooldown_ticks,
        );
        debug!(
            "[Village] {} reputation {:+} -> {}",
            villager_type, change.delta, change.new_score
        );
        self.changes.send(change);
    }
}

/// System: make sure every villager type has a table entry at world load.
pub fn init_village_tables(mut village: ResMut<VillageState>) {
    for villager_type in VillagerType::ALL {
        village.reputation.entry(villager_type).or_insert(0.0);
        village.gift_cooldown.entry(villager_type).or_insert(0);
    }
}

/// System: count every gift cooldown down by one tick.
pub fn tick_gift_cooldowns(mut village: ResMut<VillageState>) {
    village.tick_cooldowns();
}

/// System: refresh each villager's tier flags from the current score.
///
/// Runs after villager movement and before any chat handling so dialogue
/// and button labels see this tick's tier. There is no hysteresis; a score
/// sitting on a boundary can flip tiers every tick.
pub fn update_reputation_tiers(
    village: Res<VillageState>,
    mut query: Query<(&Villager, &mut ReputationFlags)>,
) {
    for (villager, mut flags) in query.iter_mut() {
        let score = village.reputation(villager.villager_type);
        let tier = ReputationTier::from_score(score);
        if flags.tier() != tier {
            debug!(
                "[Village] {} ({}) is now {}",
                villager.display_name,
                villager.villager_type,
                tier.label()
            );
        }
        flags.update(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exactly_one(flags: &ReputationFlags) -> bool {
        [flags.negative, flags.neutral, flags.positive, flags.max]
            .iter()
            .filter(|f| **f)
            .count()
            == 1
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ReputationTier::from_score(-30.0), ReputationTier::Neutral);
        assert_eq!(ReputationTier::from_score(30.0), ReputationTier::Neutral);
        assert_eq!(ReputationTier::from_score(100.0), ReputationTier::Max);
        assert_eq!(ReputationTier::from_score(99.999), ReputationTier::Positive);
        assert_eq!(ReputationTier::from_score(-30.001), ReputationTier::Negative);
        assert_eq!(ReputationTier::from_score(30.001), ReputationTier::Positive);
        assert_eq!(ReputationTier::from_score(0.0), ReputationTier::Neutral);
    }

    #[test]
    fn test_flags_mutually_exclusive_across_range() {
        let mut flags = ReputationFlags::default();
        let mut score = -250.0_f32;
        while score <= 250.0 {
            let tier = flags.update(score);
            assert!(exactly_one(&flags), "score {score} set {flags:?}");
            assert_eq!(flags.tier(), tier);
            score += 0.5;
        }
        for score in [f32::NEG_INFINITY, f32::INFINITY, f32::NAN, f32::MAX, f32::MIN] {
            flags.update(score);
            assert!(exactly_one(&flags), "score {score} set {flags:?}");
        }
    }

    #[test]
    fn test_default_flags_are_neutral() {
        let flags = ReputationFlags::default();
        assert!(flags.neutral);
        assert!(exactly_one(&flags));
    }

    #[test]
    fn test_oscillating_score_flips_every_update() {
        let mut flags = ReputationFlags::default();
        let tiers: Vec<_> = [30.0, 30.01, 30.0, 30.01]
            .into_iter()
            .map(|s| flags.update(s))
            .collect();
        assert_eq!(
            tiers,
            vec![
                ReputationTier::Neutral,
                ReputationTier::Positive,
                ReputationTier::Neutral,
                ReputationTier::Positive,
            ]
        );
    }

    #[test]
    fn test_modify_reputation_sets_cooldown_only_for_gifts() {
        let mut village = VillageState::default();
        let change = village.modify_reputation(VillagerType::Harpy, -12.5, None, false, 60);
        assert_eq!(change.new_score, -12.5);
        assert_eq!(village.gift_cooldown(VillagerType::Harpy), 0);

        village.modify_reputation(VillagerType::Harpy, 5.0, None, true, 60);
        assert_eq!(village.reputation(VillagerType::Harpy), -7.5);
        assert_eq!(village.gift_cooldown(VillagerType::Harpy), 60);
        assert_eq!(village.gift_cooldown(VillagerType::Lihzahrd), 0);
    }

    #[test]
    fn test_cooldowns_count_down_to_zero() {
        let mut village = VillageState::default();
        village.modify_reputation(VillagerType::Lihzahrd, 0.0, None, true, 2);
        village.tick_cooldowns();
        assert_eq!(village.gift_cooldown(VillagerType::Lihzahrd), 1);
        village.tick_cooldowns();
        village.tick_cooldowns();
        assert_eq!(village.gift_cooldown(VillagerType::Lihzahrd), 0);
    }

    #[test]
    fn test_missing_entry_reads_neutral() {
        let village = VillageState::default();
        assert_eq!(village.reputation(VillagerType::Harpy), 0.0);
        assert_eq!(
            ReputationTier::from_score(village.reputation(VillagerType::Harpy)),
            ReputationTier::Neutral
        );
    }
}
