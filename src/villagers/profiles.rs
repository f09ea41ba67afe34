//! Villager profiles: names, dialogue pools, reputation commentary and gift
//! tastes for each villager type.
//!
//! Every profile method has a placeholder default, so a type that only
//! overrides some of them still produces something (and the placeholder text
//! makes the gap obvious in game).

use crate::shared::*;
use crate::weighted::WeightedPool;

/// What a dialogue pool may depend on when it is built.
#[derive(Debug, Clone, Copy)]
pub struct ChatContext<'a> {
    pub villager_type: VillagerType,
    pub display_name: &'a str,
    pub flags: ReputationFlags,
}

pub trait VillagerProfile {
    fn possible_names(&self) -> Vec<String> {
        vec![PLACEHOLDER_NAME.to_string()]
    }

    /// Lines offered when the player opens chat.
    fn dialogue(&self, _ctx: &ChatContext<'_>) -> WeightedPool<String> {
        placeholder_pool()
    }

    /// Lines offered from the Reputation chat button.
    fn reputation_text(&self, _ctx: &ChatContext<'_>) -> WeightedPool<String> {
        placeholder_pool()
    }

    fn liked_gifts(&self) -> Vec<ItemId> {
        Vec::new()
    }

    fn disliked_gifts(&self) -> Vec<ItemId> {
        Vec::new()
    }
}

pub fn profile_for(villager_type: VillagerType) -> &'static dyn VillagerProfile {
    match villager_type {
        VillagerType::Harpy => &HarpyProfile,
        VillagerType::Lihzahrd => &LihzahrdProfile,
    }
}

pub fn placeholder_pool() -> WeightedPool<String> {
    let mut pool = WeightedPool::new();
    pool.add_one(PLACEHOLDER_LINE.to_string());
    pool
}

/// Small talk any villager can fall back on.
pub fn common_chatter(ctx: &ChatContext<'_>) -> WeightedPool<String> {
    let mut pool = WeightedPool::new();
    pool.add(format!("I'm {}. Don't wear it out.", ctx.display_name), 0.5);
    pool.add_one("The village is quiet today. I like it that way.".to_string());
    pool.add_conditionally(
        "Some of the others were talking about you. Not kindly.".to_string(),
        ctx.flags.negative,
        1.0,
    );
    pool.add_conditionally(
        "Word gets around. Folks here say you're alright.".to_string(),
        ctx.flags.positive || ctx.flags.max,
        1.0,
    );
    pool
}

// ═══════════════════════════════════════════════════════════════════════
// HARPY
// ═══════════════════════════════════════════════════════════════════════

pub struct HarpyProfile;

impl VillagerProfile for HarpyProfile {
    fn possible_names(&self) -> Vec<String> {
        [
            "Aerie", "Cirrus", "Zephyra", "Gale", "Plume", "Nimbus", "Skye", "Talon",
            "Wren", "Altostra",
        ]
        .iter()
        .map(|n| n.to_string())
        .collect()
    }

    fn dialogue(&self, ctx: &ChatContext<'_>) -> WeightedPool<String> {
        let mut pool = WeightedPool::new();
        pool.add_one("The wind is strong up here. Mind your footing, groundling.".to_string());
        pool.add_one("Have you ever slept on a cloud? You haven't lived.".to_string());
        pool.add(
            "Feathers keep falling out when I'm nervous. Don't stare.".to_string(),
            0.5,
        );
        pool.add_conditionally(
            "Why are you still here? Nobody in this village wants you around.".to_string(),
            ctx.flags.negative,
            2.0,
        );
        pool.add_conditionally(
            "Oh, it's you again! The flock has been saying good things.".to_string(),
            ctx.flags.positive,
            2.0,
        );
        pool.add_conditionally(
            "You're practically one of the flock now. Want to learn to glide?".to_string(),
            ctx.flags.max,
            3.0,
        );
        pool.merge(&common_chatter(ctx));
        pool
    }

    fn reputation_text(&self, ctx: &ChatContext<'_>) -> WeightedPool<String> {
        let mut pool = WeightedPool::new();
        pool.add_conditionally(
            "The whole flock is wary of you. You'll have to earn our trust back.".to_string(),
            ctx.flags.negative,
            1.0,
        );
        pool.add_conditionally(
            "Harpies don't know what to make of you yet.".to_string(),
            ctx.flags.neutral,
            1.0,
        );
        pool.add_conditionally(
            "We like having you around. Bring more feathers!".to_string(),
            ctx.flags.positive,
            1.0,
        );
        pool.add_conditionally(
            "The village sings songs about you. Honestly, it's getting a bit much.".to_string(),
            ctx.flags.max,
            1.0,
        );
        pool
    }

    fn liked_gifts(&self) -> Vec<ItemId> {
        vec![
            ItemId::FEATHER,
            ItemId::GIANT_HARPY_FEATHER,
            ItemId::CLOUD,
            ItemId::RAIN_CLOUD,
            ItemId::SUNPLATE_BLOCK,
            ItemId::FALLEN_STAR,
            ItemId::STARFURY,
        ]
    }

    fn disliked_gifts(&self) -> Vec<ItemId> {
        vec![
            ItemId::DIRT_BLOCK,
            ItemId::MUD_BLOCK,
            ItemId::STONE_BLOCK,
            ItemId::BOMB,
        ]
    }
}

// ═══════════════════════════════════════════════════════════════════════
// LIHZAHRD
// ═══════════════════════════════════════════════════════════════════════

/// Names and tastes only; chat still uses the placeholder pools.
pub struct LihzahrdProfile;

impl VillagerProfile for LihzahrdProfile {
    fn possible_names(&self) -> Vec<String> {
        ["Sskarr", "Ixtla", "Zhaal", "Tezca", "Kesh"]
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    fn liked_gifts(&self) -> Vec<ItemId> {
        vec![
            ItemId::LIHZAHRD_POWER_CELL,
            ItemId::LIHZAHRD_BRICK,
            ItemId::JUNGLE_SPORES,
        ]
    }

    fn disliked_gifts(&self) -> Vec<ItemId> {
        vec![ItemId::TORCH, ItemId::ICE_BLOCK, ItemId::GEL]
    }
}
