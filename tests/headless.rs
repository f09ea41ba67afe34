//! Headless integration tests for Living World.
//!
//! These tests exercise the village ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI), and verify that the
//! reputation, gift and chat loops work correctly.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use livingworld::data::DataPlugin;
use livingworld::shared::*;
use livingworld::villagers::dialogue::REPUTATION_LABEL;
use livingworld::villagers::profiles::profile_for;
use livingworld::player::PlayerPlugin;
use livingworld::villagers::VillagerPlugin;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Resource, Default)]
struct CollectedChanges(Vec<ReputationChangedEvent>);

#[derive(Resource, Default)]
struct CollectedShops(Vec<ShopOpenEvent>);

fn collect_events(
    mut changes: EventReader<ReputationChangedEvent>,
    mut shops: EventReader<ShopOpenEvent>,
    mut changes_out: ResMut<CollectedChanges>,
    mut shops_out: ResMut<CollectedShops>,
) {
    changes_out.0.extend(changes.read().cloned());
    shops_out.0.extend(shops.read().cloned());
}

/// Builds a minimal Bevy app with the shared resources and events registered
/// and the villager simulation plugin, but NO rendering, windowing, or asset
/// loading.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<VillageConfig>()
        .init_resource::<ItemRegistry>()
        .init_resource::<PlayerState>()
        .init_resource::<VillageState>()
        .init_resource::<ChatState>()
        .insert_resource(VillageRng::seeded(7));

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<ReputationChangedEvent>()
        .add_event::<ChatOpenEvent>()
        .add_event::<ChatButtonClickedEvent>()
        .add_event::<ChatCloseEvent>()
        .add_event::<ShopOpenEvent>();

    app.init_resource::<CollectedChanges>()
        .init_resource::<CollectedShops>()
        .add_systems(PostUpdate, collect_events);

    app.add_plugins(VillagerPlugin);
    app
}

/// Transitions the test app to Playing state and ticks once to process it.
fn enter_playing_state(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update(); // process state transition
}

/// Playing app with the collectors emptied of anything the first tick produced.
fn playing_app() -> App {
    let mut app = build_test_app();
    enter_playing_state(&mut app);
    clear_collected(&mut app);
    app
}

fn clear_collected(app: &mut App) {
    app.world_mut().resource_mut::<CollectedChanges>().0.clear();
    app.world_mut().resource_mut::<CollectedShops>().0.clear();
}

/// First villager matching the filter, with its entity.
fn find_villager(app: &mut App, pred: impl Fn(&Villager) -> bool) -> Entity {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &Villager)>();
    query
        .iter(world)
        .find(|(_, villager)| pred(villager))
        .map(|(entity, _)| entity)
        .expect("matching villager should be spawned")
}

fn hold(app: &mut App, item: HeldItem) {
    let mut player_state = app.world_mut().resource_mut::<PlayerState>();
    player_state.hotbar[0] = item;
    player_state.selected_slot = 0;
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_reaches_playing_and_spawns_village() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);

    // First update enters Loading and loads data; second applies NextState.
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(state.get(), &GameState::Playing);
    assert!(!app.world().resource::<ItemRegistry>().items.is_empty());

    let expected = app.world().resource::<VillageConfig>().villagers.len();
    let world = app.world_mut();
    let spawned = world.query::<&Villager>().iter(world).count();
    assert_eq!(spawned, expected);

    // Smoke: run a small frame budget without panic.
    for _ in 0..60 {
        app.update();
    }
}

#[test]
fn test_spawned_villagers_use_profile_names_and_styles() {
    let mut app = playing_app();

    let world = app.world_mut();
    let mut query = world.query::<(&Villager, &ReputationFlags, &GiftPreferences)>();
    for (villager, flags, prefs) in query.iter(world) {
        let names = profile_for(villager.villager_type).possible_names();
        assert!(names.iter().any(|n| *n == villager.display_name));
        assert!(villager.sprite_variation < SPRITE_VARIATIONS);
        assert!(flags.neutral);
        assert!(prefs.liked.is_disjoint(&prefs.disliked));
    }

    let village = app.world().resource::<VillageState>();
    for villager_type in VillagerType::ALL {
        assert!(village.reputation.contains_key(&villager_type));
        assert_eq!(village.gift_cooldown(villager_type), 0);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reputation tiers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_flags_follow_score_each_tick() {
    let mut app = playing_app();
    let harpy = find_villager(&mut app, |v| v.villager_type == VillagerType::Harpy);

    for (score, expected) in [
        (35.0, ReputationTier::Positive),
        (100.0, ReputationTier::Max),
        (-31.0, ReputationTier::Negative),
        (30.0, ReputationTier::Neutral),
    ] {
        app.world_mut()
            .resource_mut::<VillageState>()
            .reputation
            .insert(VillagerType::Harpy, score);
        app.update();
        let flags = app.world().get::<ReputationFlags>(harpy).copied();
        assert_eq!(flags.map(|f| f.tier()), Some(expected), "score {score}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gifts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_liked_gift_applies_once_then_cools_down() {
    let mut app = playing_app();
    let harpy = find_villager(&mut app, |v| v.villager_type == VillagerType::Harpy);
    hold(&mut app, HeldItem::new(ItemId::FEATHER, 5));
    app.world_mut().resource_mut::<PlayerState>().talking_to = Some(harpy);

    app.update();
    {
        let village = app.world().resource::<VillageState>();
        assert_eq!(village.reputation(VillagerType::Harpy), 5.0);
        // Countdown runs at the start of the tick, before the gift sets it.
        assert_eq!(village.gift_cooldown(VillagerType::Harpy), 3600);
    }
    let changes = &app.world().resource::<CollectedChanges>().0;
    assert_eq!(changes.len(), 1);
    assert!(changes[0].from_gift);
    assert_eq!(changes[0].delta, 5.0);
    assert!(changes[0].region.is_some());

    app.update();
    let village = app.world().resource::<VillageState>();
    assert_eq!(village.reputation(VillagerType::Harpy), 5.0);
    assert_eq!(village.gift_cooldown(VillagerType::Harpy), 3599);
    assert_eq!(app.world().resource::<CollectedChanges>().0.len(), 1);

    // Other types are unaffected.
    assert_eq!(village.reputation(VillagerType::Lihzahrd), 0.0);
}

#[test]
fn test_disliked_gift_lowers_reputation() {
    let mut app = playing_app();
    let lihzahrd = find_villager(&mut app, |v| v.villager_type == VillagerType::Lihzahrd);
    hold(&mut app, HeldItem::new(ItemId::TORCH, 20));
    app.world_mut().resource_mut::<PlayerState>().talking_to = Some(lihzahrd);

    app.update();
    let village = app.world().resource::<VillageState>();
    assert_eq!(village.reputation(VillagerType::Lihzahrd), -5.0);
}

#[test]
fn test_neutral_gift_still_reports_a_change() {
    let mut app = playing_app();
    let harpy = find_villager(&mut app, |v| v.villager_type == VillagerType::Harpy);
    hold(&mut app, HeldItem::new(ItemId::TORCH, 20));
    app.world_mut().resource_mut::<PlayerState>().talking_to = Some(harpy);

    app.update();
    let changes = &app.world().resource::<CollectedChanges>().0;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].delta, 0.0);
    let village = app.world().resource::<VillageState>();
    assert_eq!(village.reputation(VillagerType::Harpy), 0.0);
    assert_eq!(village.gift_cooldown(VillagerType::Harpy), 3600);
}

#[test]
fn test_favorited_item_is_never_gifted() {
    let mut app = playing_app();
    let harpy = find_villager(&mut app, |v| v.villager_type == VillagerType::Harpy);
    hold(
        &mut app,
        HeldItem {
            id: ItemId::FEATHER,
            stack: 5,
            favorited: true,
        },
    );
    app.world_mut().resource_mut::<PlayerState>().talking_to = Some(harpy);

    for _ in 0..5 {
        app.update();
    }
    assert!(app.world().resource::<CollectedChanges>().0.is_empty());
    let village = app.world().resource::<VillageState>();
    assert_eq!(village.reputation(VillagerType::Harpy), 0.0);
    assert_eq!(village.gift_cooldown(VillagerType::Harpy), 0);
}

#[test]
fn test_no_gift_without_conversation() {
    let mut app = playing_app();
    hold(&mut app, HeldItem::new(ItemId::FEATHER, 5));

    for _ in 0..5 {
        app.update();
    }
    assert!(app.world().resource::<CollectedChanges>().0.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat surface
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lihzahrd_chat_uses_placeholder_line() {
    let mut app = playing_app();
    let lihzahrd = find_villager(&mut app, |v| v.villager_type == VillagerType::Lihzahrd);

    app.world_mut().send_event(ChatOpenEvent { villager: lihzahrd });
    app.update();

    let chat = app.world().resource::<ChatState>();
    assert!(chat.is_open());
    assert_eq!(chat.text, PLACEHOLDER_LINE);
    let buttons = chat.buttons.clone().expect("chat should have buttons");
    assert_eq!(buttons.first, REPUTATION_LABEL);
    assert_eq!(buttons.second, None);
    assert_eq!(
        app.world().resource::<PlayerState>().talking_to,
        Some(lihzahrd)
    );
}

#[test]
fn test_chat_open_runs_gift_check() {
    let mut app = playing_app();
    let harpy = find_villager(&mut app, |v| v.villager_type == VillagerType::Harpy);
    hold(&mut app, HeldItem::new(ItemId::FALLEN_STAR, 3));

    app.world_mut().send_event(ChatOpenEvent { villager: harpy });
    app.update();
    // Same window as a gift from the per-tick check.
    assert_eq!(
        app.world().resource::<VillageState>().gift_cooldown(VillagerType::Harpy),
        3600
    );
    app.update();
    assert_eq!(
        app.world().resource::<VillageState>().gift_cooldown(VillagerType::Harpy),
        3599
    );

    // One change from opening; the running cooldown blocks the per-tick check.
    assert_eq!(app.world().resource::<CollectedChanges>().0.len(), 1);
    assert_eq!(
        app.world().resource::<VillageState>().reputation(VillagerType::Harpy),
        5.0
    );
}

#[test]
fn test_merchant_first_button_opens_shop() {
    let mut app = playing_app();
    let merchant = find_villager(&mut app, |v| v.is_merchant);

    app.world_mut().send_event(ChatOpenEvent { villager: merchant });
    app.update();
    app.world_mut().send_event(ChatButtonClickedEvent {
        villager: merchant,
        first_button: true,
    });
    app.update();

    let shops = &app.world().resource::<CollectedShops>().0;
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0].villager, merchant);
}

#[test]
fn test_non_merchant_first_button_shows_reputation_text() {
    let mut app = playing_app();
    let harpy = find_villager(&mut app, |v| {
        v.villager_type == VillagerType::Harpy && !v.is_merchant
    });
    hold(&mut app, HeldItem::default());

    app.world_mut().send_event(ChatOpenEvent { villager: harpy });
    app.update();
    let opening = app.world().resource::<ChatState>().text.clone();
    assert!(!opening.is_empty());

    app.world_mut().send_event(ChatButtonClickedEvent {
        villager: harpy,
        first_button: true,
    });
    app.update();

    assert!(app.world().resource::<CollectedShops>().0.is_empty());
    let chat = app.world().resource::<ChatState>();
    assert!(chat.is_open());
    assert!(!chat.text.is_empty());
    assert_ne!(chat.text, PLACEHOLDER_LINE);
}

#[test]
fn test_chat_close_clears_state() {
    let mut app = playing_app();
    let harpy = find_villager(&mut app, |v| v.villager_type == VillagerType::Harpy);

    app.world_mut().send_event(ChatOpenEvent { villager: harpy });
    app.update();
    assert!(app.world().resource::<ChatState>().is_open());

    app.world_mut().send_event(ChatCloseEvent);
    app.update();
    assert!(!app.world().resource::<ChatState>().is_open());
    assert_eq!(app.world().resource::<PlayerState>().talking_to, None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Player input → chat
// ─────────────────────────────────────────────────────────────────────────────

/// Villager app plus the player plugin, with the player placed on `villager`.
fn playing_app_with_player(villager_pred: impl Fn(&Villager) -> bool) -> (App, Entity) {
    let mut app = build_test_app();
    app.init_resource::<PlayerInput>();
    app.add_plugins(PlayerPlugin);
    enter_playing_state(&mut app);
    clear_collected(&mut app);

    let villager = find_villager(&mut app, villager_pred);
    let pos = app
        .world()
        .get::<Transform>(villager)
        .map(|tf| tf.translation)
        .unwrap_or_default();
    let world = app.world_mut();
    let mut players = world.query_filtered::<&mut Transform, With<Player>>();
    for mut tf in players.iter_mut(world) {
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
    }
    (app, villager)
}

fn press(app: &mut App, apply: impl FnOnce(&mut PlayerInput)) {
    let mut input = app.world_mut().resource_mut::<PlayerInput>();
    *input = PlayerInput::default();
    apply(&mut *input);
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
}

#[test]
fn test_hidden_second_button_does_nothing_for_non_merchant() {
    let (mut app, harpy) = playing_app_with_player(|v| {
        v.villager_type == VillagerType::Harpy && !v.is_merchant
    });

    press(&mut app, |input| input.talk = true);
    let chat = app.world().resource::<ChatState>();
    assert_eq!(chat.villager, Some(harpy));
    assert_eq!(chat.buttons.as_ref().and_then(|b| b.second.clone()), None);

    press(&mut app, |input| input.chat_second_button = true);
    assert!(app.world().resource::<CollectedShops>().0.is_empty());
    assert!(app.world().resource::<ChatState>().is_open());
}

#[test]
fn test_merchant_buttons_through_player_input() {
    let (mut app, merchant) = playing_app_with_player(|v| v.is_merchant);

    press(&mut app, |input| input.talk = true);
    assert_eq!(app.world().resource::<ChatState>().villager, Some(merchant));

    // Second button is Reputation for merchants: no shop.
    press(&mut app, |input| input.chat_second_button = true);
    assert!(app.world().resource::<CollectedShops>().0.is_empty());

    press(&mut app, |input| input.chat_first_button = true);
    let shops = &app.world().resource::<CollectedShops>().0;
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0].villager, merchant);
}
