//! Shared components, resources, events, and states for Living World.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

/// Coarse ordering of one simulation tick inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    PlayerInput,
    Village,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS
// ═══════════════════════════════════════════════════════════════════════

/// Numeric item type. `0` is the empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    pub const NONE: ItemId = ItemId(0);
    pub const DIRT_BLOCK: ItemId = ItemId(2);
    pub const STONE_BLOCK: ItemId = ItemId(3);
    pub const TORCH: ItemId = ItemId(8);
    pub const GEL: ItemId = ItemId(23);
    pub const STARFURY: ItemId = ItemId(65);
    pub const FALLEN_STAR: ItemId = ItemId(75);
    pub const BOMB: ItemId = ItemId(166);
    pub const MUD_BLOCK: ItemId = ItemId(176);
    pub const FEATHER: ItemId = ItemId(320);
    pub const JUNGLE_SPORES: ItemId = ItemId(331);
    pub const CLOUD: ItemId = ItemId(751);
    pub const RAIN_CLOUD: ItemId = ItemId(765);
    pub const SUNPLATE_BLOCK: ItemId = ItemId(824);
    pub const LIHZAHRD_BRICK: ItemId = ItemId(1101);
    pub const LIHZAHRD_POWER_CELL: ItemId = ItemId(1293);
    pub const GIANT_HARPY_FEATHER: ItemId = ItemId(1611);
    pub const ICE_BLOCK: ItemId = ItemId(664);

    pub fn is_none(self) -> bool {
        self == ItemId::NONE
    }
}

#[derive(Debug, Clone)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub items: HashMap<ItemId, ItemDef>,
}

impl ItemRegistry {
    pub fn name(&self, id: ItemId) -> Option<&str> {
        self.items.get(&id).map(|d| d.name.as_str())
    }
}

/// One hotbar slot held by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldItem {
    pub id: ItemId,
    pub stack: u16,
    pub favorited: bool,
}

impl HeldItem {
    pub fn new(id: ItemId, stack: u16) -> Self {
        Self { id, stack, favorited: false }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() || self.stack == 0
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Default)]
pub struct Player;

#[derive(Resource, Debug, Clone)]
pub struct PlayerState {
    /// Villager the player is currently chatting with.
    pub talking_to: Option<Entity>,
    pub hotbar: Vec<HeldItem>,
    pub selected_slot: usize,
    pub speed: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            talking_to: None,
            hotbar: vec![
                HeldItem::new(ItemId::FEATHER, 5),
                HeldItem::new(ItemId::FALLEN_STAR, 3),
                HeldItem::new(ItemId::DIRT_BLOCK, 99),
                HeldItem::new(ItemId::TORCH, 20),
                HeldItem::new(ItemId::LIHZAHRD_POWER_CELL, 1),
                HeldItem::default(),
            ],
            selected_slot: 0,
            speed: 80.0,
        }
    }
}

impl PlayerState {
    /// The selected hotbar slot, if it holds anything.
    pub fn held_item(&self) -> Option<&HeldItem> {
        self.hotbar
            .get(self.selected_slot)
            .filter(|item| !item.is_empty())
    }

    pub fn held_item_mut(&mut self) -> Option<&mut HeldItem> {
        self.hotbar
            .get_mut(self.selected_slot)
            .filter(|item| !item.is_empty())
    }
}

/// Per-frame game actions, filled from hardware input in `PreUpdate`.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub talk: bool,
    pub chat_first_button: bool,
    pub chat_second_button: bool,
    pub close_chat: bool,
    pub cycle_hotbar: bool,
    pub toggle_favorite: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub talk: KeyCode,
    pub chat_first_button: KeyCode,
    pub chat_second_button: KeyCode,
    pub close_chat: KeyCode,
    pub cycle_hotbar: KeyCode,
    pub toggle_favorite: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            talk: KeyCode::KeyE,
            chat_first_button: KeyCode::Digit1,
            chat_second_button: KeyCode::Digit2,
            close_chat: KeyCode::Escape,
            cycle_hotbar: KeyCode::KeyQ,
            toggle_favorite: KeyCode::KeyF,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// VILLAGERS & REPUTATION
// ═══════════════════════════════════════════════════════════════════════

/// Villager archetype. Keys the shared reputation and gift cooldown tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VillagerType {
    Harpy,
    Lihzahrd,
}

impl VillagerType {
    pub const ALL: [VillagerType; 2] = [VillagerType::Harpy, VillagerType::Lihzahrd];

    pub fn name(self) -> &'static str {
        match self {
            VillagerType::Harpy => "Harpy",
            VillagerType::Lihzahrd => "Lihzahrd",
        }
    }
}

impl fmt::Display for VillagerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const NEGATIVE_REPUTATION_THRESHOLD: f32 = -30.0;
pub const POSITIVE_REPUTATION_THRESHOLD: f32 = 30.0;
pub const MAX_REPUTATION_THRESHOLD: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReputationTier {
    Negative,
    Neutral,
    Positive,
    Max,
}

impl ReputationTier {
    /// Bands: `< -30` Negative, `-30..=30` Neutral, `(30, 100)` Positive,
    /// `>= 100` Max. NaN lands in Neutral.
    pub fn from_score(score: f32) -> Self {
        if score < NEGATIVE_REPUTATION_THRESHOLD {
            ReputationTier::Negative
        } else if score > POSITIVE_REPUTATION_THRESHOLD && score < MAX_REPUTATION_THRESHOLD {
            ReputationTier::Positive
        } else if score >= MAX_REPUTATION_THRESHOLD {
            ReputationTier::Max
        } else {
            ReputationTier::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReputationTier::Negative => "Negative",
            ReputationTier::Neutral => "Neutral",
            ReputationTier::Positive => "Positive",
            ReputationTier::Max => "Max",
        }
    }
}

/// Cached tier booleans read by the chat surface. Exactly one is set.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReputationFlags {
    pub negative: bool,
    pub neutral: bool,
    pub positive: bool,
    pub max: bool,
}

impl Default for ReputationFlags {
    // Neutral until the first tier update runs.
    fn default() -> Self {
        Self::from_tier(ReputationTier::Neutral)
    }
}

impl ReputationFlags {
    pub fn from_tier(tier: ReputationTier) -> Self {
        Self {
            negative: tier == ReputationTier::Negative,
            neutral: tier == ReputationTier::Neutral,
            positive: tier == ReputationTier::Positive,
            max: tier == ReputationTier::Max,
        }
    }

    /// Recompute all four flags from a score and return the resulting tier.
    pub fn update(&mut self, score: f32) -> ReputationTier {
        let tier = ReputationTier::from_score(score);
        *self = Self::from_tier(tier);
        tier
    }

    pub fn tier(&self) -> ReputationTier {
        if self.negative {
            ReputationTier::Negative
        } else if self.positive {
            ReputationTier::Positive
        } else if self.max {
            ReputationTier::Max
        } else {
            ReputationTier::Neutral
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Villager {
    pub villager_type: VillagerType,
    pub display_name: String,
    /// Which of the three sprite styles this instance uses.
    pub sprite_variation: u8,
    pub is_merchant: bool,
}

/// Liked and disliked item ids, filled once from the villager's profile.
#[derive(Component, Debug, Clone, Default)]
pub struct GiftPreferences {
    pub liked: HashSet<ItemId>,
    pub disliked: HashSet<ItemId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GiftOutcome {
    Liked,
    Disliked,
    Neutral,
}

impl GiftPreferences {
    pub fn new(
        liked: impl IntoIterator<Item = ItemId>,
        disliked: impl IntoIterator<Item = ItemId>,
    ) -> Self {
        Self {
            liked: liked.into_iter().collect(),
            disliked: disliked.into_iter().collect(),
        }
    }

    pub fn classify(&self, item: ItemId) -> GiftOutcome {
        if self.liked.contains(&item) {
            GiftOutcome::Liked
        } else if self.disliked.contains(&item) {
            GiftOutcome::Disliked
        } else {
            GiftOutcome::Neutral
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HomePosition(pub Vec2);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct VillagerStats {
    pub width: f32,
    pub height: f32,
    pub life_max: u32,
    pub defense: u32,
    pub knockback_resist: f32,
    pub friendly: bool,
}

impl Default for VillagerStats {
    fn default() -> Self {
        Self {
            width: 18.0,
            height: 40.0,
            life_max: 500,
            defense: 15,
            knockback_resist: 0.5,
            friendly: true,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

/// World-wide village tables. Missing entries read as zero.
#[derive(Resource, Debug, Clone, Default)]
pub struct VillageState {
    pub reputation: HashMap<VillagerType, f32>,
    pub gift_cooldown: HashMap<VillagerType, u32>,
}

impl VillageState {
    pub fn reputation(&self, villager_type: VillagerType) -> f32 {
        self.reputation.get(&villager_type).copied().unwrap_or(0.0)
    }

    pub fn gift_cooldown(&self, villager_type: VillagerType) -> u32 {
        self.gift_cooldown.get(&villager_type).copied().unwrap_or(0)
    }

    /// The single mutation entry point for reputation. A gift-originated
    /// change also starts the type's gift cooldown.
    pub fn modify_reputation(
        &mut self,
        villager_type: VillagerType,
        delta: f32,
        region: Option<Rect>,
        from_gift: bool,
        cooldown_ticks: u32,
    ) -> ReputationChangedEvent {
        let score = self.reputation.entry(villager_type).or_insert(0.0);
        *score += delta;
        let new_score = *score;

        if from_gift {
            self.gift_cooldown.insert(villager_type, cooldown_ticks);
        }

        ReputationChangedEvent {
            villager_type,
            delta,
            region,
            from_gift,
            new_score,
        }
    }

    pub fn tick_cooldowns(&mut self) {
        for ticks in self.gift_cooldown.values_mut() {
            *ticks = ticks.saturating_sub(1);
        }
    }
}

/// Shared pseudo-random source for name picks, sprite styles, dialogue
/// draws and wandering.
#[derive(Resource, Debug)]
pub struct VillageRng(pub StdRng);

impl Default for VillageRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl VillageRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CHAT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatButtons {
    pub first: String,
    pub second: Option<String>,
}

/// What the chat window shows. Written by the villager domain, read by UI.
#[derive(Resource, Debug, Clone, Default)]
pub struct ChatState {
    pub villager: Option<Entity>,
    pub speaker: String,
    pub text: String,
    pub buttons: Option<ChatButtons>,
}

impl ChatState {
    pub fn is_open(&self) -> bool {
        self.villager.is_some()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIG
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GiftDeltas {
    pub liked: f32,
    pub disliked: f32,
    pub neutral: f32,
}

impl Default for GiftDeltas {
    fn default() -> Self {
        Self {
            liked: 5.0,
            disliked: -5.0,
            neutral: 0.0,
        }
    }
}

impl GiftDeltas {
    pub fn for_outcome(&self, outcome: GiftOutcome) -> f32 {
        match outcome {
            GiftOutcome::Liked => self.liked,
            GiftOutcome::Disliked => self.disliked,
            GiftOutcome::Neutral => self.neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillagerSpawn {
    pub villager_type: VillagerType,
    pub home: (f32, f32),
    pub is_merchant: bool,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VillageConfig {
    pub gift_deltas: GiftDeltas,
    pub gift_cooldown_ticks: u32,
    pub chat_range: f32,
    pub wander_radius: f32,
    pub wander_interval_secs: f32,
    pub walk_speed: f32,
    pub rng_seed: Option<u64>,
    pub villagers: Vec<VillagerSpawn>,
}

impl Default for VillageConfig {
    fn default() -> Self {
        Self {
            gift_deltas: GiftDeltas::default(),
            gift_cooldown_ticks: 3600,
            chat_range: TILE_SIZE * 3.0,
            wander_radius: TILE_SIZE * 4.0,
            wander_interval_secs: 4.0,
            walk_speed: 24.0,
            rng_seed: None,
            villagers: vec![
                VillagerSpawn {
                    villager_type: VillagerType::Harpy,
                    home: (-64.0, 16.0),
                    is_merchant: true,
                },
                VillagerSpawn {
                    villager_type: VillagerType::Harpy,
                    home: (64.0, 16.0),
                    is_merchant: false,
                },
                VillagerSpawn {
                    villager_type: VillagerType::Lihzahrd,
                    home: (0.0, -80.0),
                    is_merchant: false,
                },
            ],
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Emitted once per call of the reputation entry point, including zero deltas.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ReputationChangedEvent {
    pub villager_type: VillagerType,
    pub delta: f32,
    /// Area to show feedback over, usually the villager's hitbox.
    pub region: Option<Rect>,
    pub from_gift: bool,
    pub new_score: f32,
}

#[derive(Event, Debug, Clone)]
pub struct ChatOpenEvent {
    pub villager: Entity,
}

#[derive(Event, Debug, Clone)]
pub struct ChatButtonClickedEvent {
    pub villager: Entity,
    pub first_button: bool,
}

#[derive(Event, Debug, Clone)]
pub struct ChatCloseEvent;

#[derive(Event, Debug, Clone)]
pub struct ShopOpenEvent {
    pub villager: Entity,
    pub villager_type: VillagerType,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const PIXEL_SCALE: f32 = 3.0;
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

pub const Z_ENTITY_BASE: f32 = 100.0;

pub const VILLAGER_SPRITE_PATH: &str = "villagers/";
pub const SPRITE_VARIATIONS: u8 = 3;

pub const PLACEHOLDER_LINE: &str =
    "If someone saw this text... I'd be scared and tell a developer immediately!";
pub const PLACEHOLDER_NAME: &str = "Villager (Report to a developer!)";
