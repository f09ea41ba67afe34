//! Idle wandering around a villager's home, plus facing.
//!
//! Every `wander_interval_secs` a villager picks a new point within
//! `wander_radius` of home and walks there. Villagers hold still while the
//! player is chatting with them.

use bevy::prelude::*;
use rand::Rng;
use crate::shared::*;

#[derive(Component, Debug, Clone)]
pub struct Wander {
    pub target: Vec2,
    pub speed: f32,
    pub is_moving: bool,
    pub timer: Timer,
}

impl Wander {
    pub fn new(home: Vec2, config: &VillageConfig) -> Self {
        Self {
            target: home,
            speed: config.walk_speed,
            is_moving: false,
            timer: Timer::from_seconds(config.wander_interval_secs.max(0.1), TimerMode::Repeating),
        }
    }
}

/// A random point inside the square of half-width `radius` around `home`.
pub fn pick_wander_target<R: Rng + ?Sized>(home: Vec2, radius: f32, rng: &mut R) -> Vec2 {
    if radius <= 0.0 {
        return home;
    }
    Vec2::new(
        home.x + rng.gen_range(-radius..=radius),
        home.y + rng.gen_range(-radius..=radius),
    )
}

/// System: choose new targets and walk toward them.
pub fn wander_villagers(
    time: Res<Time>,
    config: Res<VillageConfig>,
    player_state: Res<PlayerState>,
    mut rng: ResMut<VillageRng>,
    mut query: Query<(Entity, &HomePosition, &mut Wander, &mut Facing, &mut Transform), With<Villager>>,
) {
    let dt = time.delta_secs();

    for (entity, home, mut wander, mut facing, mut transform) in query.iter_mut() {
        if player_state.talking_to == Some(entity) {
            wander.is_moving = false;
            continue;
        }

        if wander.timer.tick(time.delta()).just_finished() {
            wander.target = pick_wander_target(home.0, config.wander_radius, &mut rng.0);
            wander.is_moving = true;
        }

        if !wander.is_moving {
            continue;
        }

        let current = transform.translation.truncate();
        let to_target = wander.target - current;
        let dist = to_target.length();

        if dist < 1.0 {
            transform.translation.x = wander.target.x;
            transform.translation.y = wander.target.y;
            wander.is_moving = false;
            continue;
        }

        let step = (wander.speed * dt).min(dist);
        let dir = to_target / dist;
        transform.translation.x += dir.x * step;
        transform.translation.y += dir.y * step;

        if dir.x > 0.0 {
            *facing = Facing::Right;
        } else if dir.x < 0.0 {
            *facing = Facing::Left;
        }
    }
}
