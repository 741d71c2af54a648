//! Wave progression and asteroid splitting
//!
//! Each wave goes Spawning -> Active -> Cleared. Spawning waits on a timer
//! (the banner), Active runs until the asteroid pool is empty, and Cleared
//! immediately bumps the wave number and schedules the next spawn.

use glam::Vec2;
use rand::Rng;

use super::pool::Handle;
use super::state::{
    Asteroid, AsteroidTier, EntityId, EntityKind, GameEvent, GameState, ScheduledTask, SimEffect,
    WavePhase,
};
use crate::audio::SoundEffect;
use crate::deg_to_rad;

/// Redraws allowed when a wave asteroid lands on top of the ship
const SAFE_SPAWN_ATTEMPTS: u32 = 8;

/// Asteroids in a given wave
pub fn asteroids_for_wave(base: u32, wave: u32) -> u32 {
    base + wave.saturating_sub(1)
}

/// Enter Spawning for the current wave number and start the banner timer
pub fn begin_wave(state: &mut GameState) {
    state.wave.phase = WavePhase::Spawning;
    let token = state.scheduler.schedule_once(
        state.clock_ms,
        state.settings.wave_spawn_delay_ms,
        ScheduledTask::SpawnWave,
    );
    state.wave.spawn_token = Some(token);

    log::info!("Wave {} incoming", state.wave.number);
    state.emit(SimEffect::Event(GameEvent::LevelChanged(state.wave.number)));
    state.emit(SimEffect::Sound(SoundEffect::WaveStart));
}

/// Spawn-timer callback: populate the field with large asteroids
pub fn spawn_wave(state: &mut GameState) {
    state.wave.spawn_token = None;

    let count = asteroids_for_wave(state.settings.wave_base_asteroids, state.wave.number);
    let mut spawned = 0;
    for _ in 0..count {
        let pos = safe_spawn_point(state);
        if spawn_asteroid(state, AsteroidTier::Large, pos).is_some() {
            spawned += 1;
        }
    }

    state.wave.phase = WavePhase::Active;
    sync_remaining(state);
    log::info!("Wave {}: spawned {}/{} asteroids", state.wave.number, spawned, count);
}

/// Break up a destroyed asteroid. Returns the fragments actually spawned
/// (none for small rocks or when the pool is full).
pub fn split_asteroid(state: &mut GameState, tier: AsteroidTier, pos: Vec2) -> Vec<Handle> {
    let Some(child) = tier.child() else {
        return Vec::new();
    };

    let children: Vec<Handle> = (0..2)
        .filter_map(|_| spawn_asteroid(state, child, pos))
        .collect();
    sync_remaining(state);
    children
}

/// Place one asteroid with a random drift and spin scaled for its tier
pub fn spawn_asteroid(state: &mut GameState, tier: AsteroidTier, pos: Vec2) -> Option<Handle> {
    let base = state.settings.asteroid_base_speed;
    let spin = deg_to_rad(state.settings.asteroid_max_spin_deg);
    let vel = Vec2::new(
        state.rng.random_range(-base..=base),
        state.rng.random_range(-base..=base),
    ) * tier.speed_factor();
    let angular_vel = state.rng.random_range(-spin..=spin);

    let asteroid = Asteroid {
        pos,
        vel,
        rotation: 0.0,
        angular_vel,
        tier,
    };

    match state.asteroids.acquire(asteroid) {
        Some(handle) => {
            state.emit(SimEffect::Spawned(
                EntityId::Asteroid(handle),
                EntityKind::Asteroid(tier),
            ));
            Some(handle)
        }
        None => {
            log::warn!("Asteroid pool exhausted, tier-{} spawn dropped", tier.value());
            None
        }
    }
}

/// Advance to the next wave once the field is empty and nothing is pending
pub fn check_wave_cleared(state: &mut GameState) -> bool {
    sync_remaining(state);
    if state.wave.phase != WavePhase::Active
        || state.wave.asteroids_remaining > 0
        || state.wave.spawn_pending()
    {
        return false;
    }

    state.wave.phase = WavePhase::Cleared;
    log::info!("Wave {} cleared", state.wave.number);
    state.wave.number += 1;
    begin_wave(state);
    true
}

pub(crate) fn sync_remaining(state: &mut GameState) {
    state.wave.asteroids_remaining = state.asteroids.len();
}

fn safe_spawn_point(state: &mut GameState) -> Vec2 {
    let (w, h) = (state.settings.field_width, state.settings.field_height);
    let safe = state.settings.spawn_safe_radius;
    let ship = state.ship.pos;

    let mut pos = Vec2::ZERO;
    for _ in 0..SAFE_SPAWN_ATTEMPTS {
        pos = Vec2::new(state.rng.random_range(0.0..=w), state.rng.random_range(0.0..=h));
        if pos.distance(ship) >= safe {
            break;
        }
    }
    pos
}
