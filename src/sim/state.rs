//! Game state and core simulation types
//!
//! Everything the core mutates during a tick lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pool::{EntityPool, Handle};
use super::schedule::{CancelToken, Scheduler};
use crate::audio::SoundEffect;
use crate::settings::Settings;

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AsteroidTier {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl AsteroidTier {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Tier of the two fragments left behind, `None` for small rocks
    pub fn child(self) -> Option<AsteroidTier> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }

    /// Velocity multiplier: smaller rocks move proportionally faster
    pub fn speed_factor(self) -> f32 {
        1.0 + (3 - self.value()) as f32 * 0.5
    }

    pub fn radius(self, settings: &Settings) -> f32 {
        settings.asteroid_radii[(self.value() - 1) as usize]
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in radians, 0 = up
    pub rotation: f32,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Fraction of velocity kept per second of drift
    pub damping: f32,
    pub max_speed: f32,
    pub invincible: bool,
    /// Display countdown; the scheduled callback is authoritative
    pub invincibility_remaining_ms: f32,
    pub(crate) invincibility_token: Option<CancelToken>,
    /// Clock time at which the gun is ready again
    pub(crate) next_fire_at_ms: f64,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: settings.field_center(),
            rotation: 0.0,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            damping: settings.ship_damping,
            max_speed: settings.ship_max_speed,
            invincible: false,
            invincibility_remaining_ms: 0.0,
            invincibility_token: None,
            next_fire_at_ms: 0.0,
        }
    }

    /// Back to the field center, at rest, default heading
    pub fn reset(&mut self, center: Vec2) {
        self.pos = center;
        self.rotation = 0.0;
        self.vel = Vec2::ZERO;
        self.accel = Vec2::ZERO;
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub expires_at_ms: f64,
    pub(crate) expiry: Option<CancelToken>,
}

impl Projectile {
    /// Unscheduled projectile: `expires_at_ms` is recorded but no timer
    /// will remove it, only a hit will
    pub fn new(pos: Vec2, vel: Vec2, expires_at_ms: f64) -> Self {
        Self {
            pos,
            vel,
            expires_at_ms,
            expiry: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    /// Spin in radians/sec
    pub angular_vel: f32,
    pub tier: AsteroidTier,
}

/// Wave lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePhase {
    /// Banner showing, asteroids arrive when the spawn timer fires
    Spawning,
    Active,
    /// Every asteroid gone; the next wave is scheduled on the same tick
    Cleared,
}

#[derive(Debug, Clone)]
pub struct WaveState {
    /// 1-based wave number
    pub number: u32,
    pub asteroids_remaining: usize,
    pub phase: WavePhase,
    pub(crate) spawn_token: Option<CancelToken>,
}

impl WaveState {
    pub fn spawn_pending(&self) -> bool {
        self.spawn_token.is_some()
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    Paused,
    GameOver,
}

/// Notifications for the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u32),
    LevelChanged(u32),
    GameOver,
}

/// Identity of anything with a visual representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    Ship,
    Projectile(Handle),
    Asteroid(Handle),
}

/// What an entity is, for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ship,
    Projectile,
    Asteroid(AsteroidTier),
}

/// Side effects produced during a tick, dispatched by the session afterwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEffect {
    Event(GameEvent),
    Sound(SoundEffect),
    Spawned(EntityId, EntityKind),
    Despawned(EntityId),
}

/// Timer payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    SpawnWave,
    EndInvincibility,
    ExpireProjectile(Handle),
}

/// Complete mutable state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Accumulated simulation clock
    pub clock_ms: f64,
    pub phase: SessionPhase,
    pub score: u64,
    pub lives: u32,
    pub ship: Ship,
    pub projectiles: EntityPool<Projectile>,
    pub asteroids: EntityPool<Asteroid>,
    pub wave: WaveState,
    pub(crate) scheduler: Scheduler<ScheduledTask>,
    pub(crate) effects: Vec<SimEffect>,
}

impl GameState {
    /// Fresh session: wave 1 scheduled, ship centered
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock_ms: 0.0,
            phase: SessionPhase::Playing,
            score: 0,
            lives: settings.starting_lives,
            ship: Ship::new(&settings),
            projectiles: EntityPool::new(settings.pool_capacity),
            asteroids: EntityPool::new(settings.pool_capacity),
            wave: WaveState {
                number: 1,
                asteroids_remaining: 0,
                phase: WavePhase::Spawning,
                spawn_token: None,
            },
            scheduler: Scheduler::new(),
            effects: Vec::new(),
            settings,
        };

        state.emit(SimEffect::Spawned(EntityId::Ship, EntityKind::Ship));
        state.emit(SimEffect::Event(GameEvent::ScoreChanged(0)));
        state.emit(SimEffect::Event(GameEvent::LivesChanged(state.lives)));
        super::wave::begin_wave(&mut state);

        state
    }

    pub(crate) fn emit(&mut self, effect: SimEffect) {
        self.effects.push(effect);
    }

    /// Take the effects accumulated since the last drain
    pub fn drain_effects(&mut self) -> Vec<SimEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Pending timer count (spawn, invincibility, projectile expiry)
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }
}
