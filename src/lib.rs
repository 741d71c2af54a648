//! Rock Drift - A wrap-around asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic session core (pools, ship, collisions, waves, lives)
//! - `session`: Public entry point wiring the core to its collaborators
//! - `highscores`: Ranked, persisted leaderboard
//! - `persistence`: Byte-level storage backends
//! - `settings`: Data-driven game balance
//! - `events`, `audio`, `renderer`, `platform`: Collaborator interfaces

pub mod audio;
pub mod events;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreEntry, HighScores};
pub use session::{Session, SessionHooks};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Play-field dimensions in pixels
    pub const FIELD_WIDTH: f32 = 1024.0;
    pub const FIELD_HEIGHT: f32 = 768.0;
    /// How far past an edge an entity may drift before it wraps
    pub const WRAP_MARGIN: f32 = 20.0;

    /// Slots per entity pool (projectiles, asteroids)
    pub const POOL_CAPACITY: usize = 50;

    pub const STARTING_LIVES: u32 = 3;
    pub const POINTS_PER_ASTEROID: u64 = 100;

    /// Tier-3 asteroids in wave 1; each later wave adds one
    pub const WAVE_BASE_ASTEROIDS: u32 = 2;
    /// Banner time between a wave being scheduled and its asteroids appearing
    pub const WAVE_SPAWN_DELAY_MS: f64 = 2000.0;
    pub const INVINCIBILITY_MS: f64 = 2000.0;

    /// Ship handling
    pub const ROTATION_DEG_PER_SEC: f32 = 200.0;
    pub const THRUST_ACCEL: f32 = 300.0;
    /// Fraction of velocity kept after one second of drift
    pub const SHIP_DAMPING: f32 = 0.5;
    pub const SHIP_MAX_SPEED: f32 = 400.0;
    pub const SHIP_RADIUS: f32 = 12.0;

    /// Asteroid motion range (px/s per axis, deg/s spin)
    pub const ASTEROID_BASE_SPEED: f32 = 80.0;
    pub const ASTEROID_MAX_SPIN_DEG: f32 = 50.0;
    /// Collision radii by tier: small, medium, large
    pub const ASTEROID_RADII: [f32; 3] = [12.0, 24.0, 40.0];
    /// Minimum distance between a freshly spawned wave asteroid and the ship
    pub const SPAWN_SAFE_RADIUS: f32 = 120.0;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const PROJECTILE_LIFESPAN_MS: f64 = 1700.0;
    pub const PROJECTILE_RADIUS: f32 = 3.0;
    /// 4 shots per second while fire is held
    pub const FIRE_COOLDOWN_MS: f64 = 250.0;

    pub const HIGHSCORE_CAPACITY: usize = 20;
    pub const MAX_NAME_LEN: usize = 8;
    pub const PLACEHOLDER_NAME: &str = "ANON";
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Unit vector for a heading. Rotation 0 points up the screen (y grows down).
#[inline]
pub fn heading_vector(rotation: f32) -> Vec2 {
    Vec2::new(rotation.sin(), -rotation.cos())
}

/// Toroidal wrap: a coordinate more than `margin` past one edge jumps to the
/// same margin past the opposite edge.
#[inline]
pub fn wrap_position(mut pos: Vec2, width: f32, height: f32, margin: f32) -> Vec2 {
    if pos.x < -margin {
        pos.x = width + margin;
    } else if pos.x > width + margin {
        pos.x = -margin;
    }
    if pos.y < -margin {
        pos.y = height + margin;
    } else if pos.y > height + margin {
        pos.y = -margin;
    }
    pos
}
