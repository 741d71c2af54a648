//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep, accumulated into one clock
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering, audio or storage dependencies: side effects are queued as
//!   [`SimEffect`]s for the session to dispatch

pub mod collision;
pub mod lives;
pub mod pool;
pub mod schedule;
pub mod ship;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{AsteroidHit, CollisionReport, circles_overlap, resolve_collisions};
pub use pool::{EntityPool, Handle};
pub use schedule::{CancelToken, Scheduler};
pub use state::{
    Asteroid, AsteroidTier, EntityId, EntityKind, GameEvent, GameState, Projectile, ScheduledTask,
    SessionPhase, Ship, SimEffect, WavePhase, WaveState,
};
pub use tick::{TickInput, TickOutcome, tick};
pub use wave::{asteroids_for_wave, split_asteroid};
