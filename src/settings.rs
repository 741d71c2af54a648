//! Game settings and balance
//!
//! Persisted as JSON next to the highscores. Missing keys fall back to the
//! defaults in [`crate::consts`], so a file can override just a few values.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::PersistError;

/// Tunable session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    pub wrap_margin: f32,
    pub pool_capacity: usize,

    // === Rules ===
    pub starting_lives: u32,
    pub points_per_asteroid: u64,
    pub wave_base_asteroids: u32,
    pub wave_spawn_delay_ms: f64,
    pub invincibility_ms: f64,

    // === Ship ===
    pub rotation_deg_per_sec: f32,
    pub thrust_accel: f32,
    pub ship_damping: f32,
    pub ship_max_speed: f32,
    pub ship_radius: f32,

    // === Asteroids ===
    pub asteroid_base_speed: f32,
    pub asteroid_max_spin_deg: f32,
    /// Small, medium, large
    pub asteroid_radii: [f32; 3],
    pub spawn_safe_radius: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_lifespan_ms: f64,
    pub projectile_radius: f32,
    pub fire_cooldown_ms: f64,

    // === Leaderboard ===
    pub highscore_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            wrap_margin: WRAP_MARGIN,
            pool_capacity: POOL_CAPACITY,

            starting_lives: STARTING_LIVES,
            points_per_asteroid: POINTS_PER_ASTEROID,
            wave_base_asteroids: WAVE_BASE_ASTEROIDS,
            wave_spawn_delay_ms: WAVE_SPAWN_DELAY_MS,
            invincibility_ms: INVINCIBILITY_MS,

            rotation_deg_per_sec: ROTATION_DEG_PER_SEC,
            thrust_accel: THRUST_ACCEL,
            ship_damping: SHIP_DAMPING,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_radius: SHIP_RADIUS,

            asteroid_base_speed: ASTEROID_BASE_SPEED,
            asteroid_max_spin_deg: ASTEROID_MAX_SPIN_DEG,
            asteroid_radii: ASTEROID_RADII,
            spawn_safe_radius: SPAWN_SAFE_RADIUS,

            projectile_speed: PROJECTILE_SPEED,
            projectile_lifespan_ms: PROJECTILE_LIFESPAN_MS,
            projectile_radius: PROJECTILE_RADIUS,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,

            highscore_capacity: HIGHSCORE_CAPACITY,
        }
    }
}

impl Settings {
    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }

    /// Clamp values the simulation cannot work with, logging each fix
    pub fn validated(mut self) -> Self {
        let defaults = Settings::default();

        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            log::warn!(
                "Invalid field size {}x{}, using default",
                self.field_width,
                self.field_height
            );
            self.field_width = defaults.field_width;
            self.field_height = defaults.field_height;
        }
        if self.pool_capacity == 0 {
            log::warn!("Pool capacity 0, using {}", defaults.pool_capacity);
            self.pool_capacity = defaults.pool_capacity;
        }
        if self.starting_lives == 0 {
            log::warn!("Starting lives 0, using 1");
            self.starting_lives = 1;
        }
        if self.wave_base_asteroids == 0 {
            log::warn!("Wave base asteroids 0, using 1");
            self.wave_base_asteroids = 1;
        }
        if self.highscore_capacity == 0 {
            log::warn!("Highscore capacity 0, using {}", defaults.highscore_capacity);
            self.highscore_capacity = defaults.highscore_capacity;
        }
        if !(0.0..=1.0).contains(&self.ship_damping) {
            log::warn!("Ship damping {} outside 0..=1, clamping", self.ship_damping);
            self.ship_damping = self.ship_damping.clamp(0.0, 1.0);
        }

        self.wrap_margin = self.wrap_margin.max(0.0);
        self.ship_max_speed = self.ship_max_speed.max(0.0);
        self.asteroid_base_speed = self.asteroid_base_speed.abs();
        self.asteroid_max_spin_deg = self.asteroid_max_spin_deg.abs();
        self.wave_spawn_delay_ms = self.wave_spawn_delay_ms.max(0.0);
        self.invincibility_ms = self.invincibility_ms.max(0.0);
        self.projectile_lifespan_ms = self.projectile_lifespan_ms.max(0.0);
        self.fire_cooldown_ms = self.fire_cooldown_ms.max(0.0);
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.validated()
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "wave_base_asteroids": 5, "starting_lives": 1 }"#).unwrap();
        assert_eq!(settings.wave_base_asteroids, 5);
        assert_eq!(settings.starting_lives, 1);
        assert_eq!(settings.pool_capacity, 50);
        assert_eq!(settings.field_width, 1024.0);
    }

    #[test]
    fn test_validated_fixes_nonsense() {
        let settings = Settings {
            pool_capacity: 0,
            starting_lives: 0,
            field_width: -5.0,
            ship_damping: 3.0,
            ..Settings::default()
        }
        .validated();

        assert_eq!(settings.pool_capacity, 50);
        assert_eq!(settings.starting_lives, 1);
        assert_eq!(settings.field_width, 1024.0);
        assert_eq!(settings.ship_damping, 1.0);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            wave_base_asteroids: 4,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_load_garbage_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
