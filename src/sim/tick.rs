//! Variable timestep simulation tick
//!
//! Core game loop: timers, ship, motion, collisions, lives, waves, in that
//! order. Everything for a tick completes before `tick` returns.

use super::collision::resolve_collisions;
use super::lives::{award_asteroid, end_invincibility, lose_life};
use super::ship::{integrate_pools, integrate_ship, remove_projectile, steer, try_fire};
use super::state::{GameState, ScheduledTask, SessionPhase, SimEffect};
use super::wave::{check_wave_cleared, spawn_wave, split_asteroid};
use crate::audio::SoundEffect;

/// Discrete input state for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Thrust held
    pub thrust: bool,
    /// Fire held (cooldown limits the rate)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Paused,
    /// The session ended on this tick. Returned exactly once.
    GameOver { score: u64 },
    /// The session had already ended; nothing happened
    Finished,
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> TickOutcome {
    if state.phase == SessionPhase::GameOver {
        return TickOutcome::Finished;
    }

    if input.pause {
        state.phase = match state.phase {
            SessionPhase::Playing => SessionPhase::Paused,
            _ => SessionPhase::Playing,
        };
        log::debug!("Pause toggled: {:?}", state.phase);
    }
    if state.phase == SessionPhase::Paused {
        return TickOutcome::Paused;
    }

    let dt_ms = dt_ms.max(0.0);
    state.clock_ms += dt_ms as f64;
    run_timers(state);

    let dt = dt_ms / 1000.0;
    steer(&mut state.ship, input, dt, &state.settings);
    try_fire(state, input);
    integrate_ship(&mut state.ship, dt, &state.settings);
    integrate_pools(state, dt);

    let report = resolve_collisions(state);
    for hit in &report.asteroid_hits {
        award_asteroid(state);
        split_asteroid(state, hit.tier, hit.pos);
        state.emit(SimEffect::Sound(SoundEffect::Explode));
    }

    if report.ship_hit.is_some() && lose_life(state) {
        return TickOutcome::GameOver { score: state.score };
    }

    check_wave_cleared(state);
    TickOutcome::Running
}

/// Fire every timer due at the current clock
fn run_timers(state: &mut GameState) {
    for task in state.scheduler.drain_due(state.clock_ms) {
        match task {
            ScheduledTask::SpawnWave => spawn_wave(state),
            ScheduledTask::EndInvincibility => end_invincibility(state),
            ScheduledTask::ExpireProjectile(handle) => {
                remove_projectile(state, handle);
            }
        }
    }
}
