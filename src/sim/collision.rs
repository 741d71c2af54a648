//! Collision detection and resolution between pools
//!
//! Naive all-pairs circle tests. Pools are capped at a few dozen entries so
//! there is no spatial index; revisit if pool capacity grows.
//!
//! Pairs are visited in slot order (projectiles outer, asteroids inner). An
//! entity removed earlier in the pass is skipped for the rest of the tick, so
//! when two projectiles overlap one asteroid the lower-slot projectile wins.

use glam::Vec2;

use super::pool::Handle;
use super::ship::remove_projectile;
use super::state::{AsteroidTier, EntityId, GameState, SimEffect};

/// A projectile destroyed an asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidHit {
    pub projectile: Handle,
    pub asteroid: Handle,
    pub tier: AsteroidTier,
    /// Asteroid's last position, where fragments appear
    pub pos: Vec2,
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub asteroid_hits: Vec<AsteroidHit>,
    /// First asteroid touching a vulnerable ship, if any
    pub ship_hit: Option<Handle>,
}

#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Test projectiles and the ship against asteroids, deactivating whatever a
/// projectile hit. Ship hits are only reported; lives are handled by the caller.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let projectile_radius = state.settings.projectile_radius;
    let asteroid_handles = state.asteroids.handles();

    for projectile in state.projectiles.handles() {
        let Some(p_pos) = state.projectiles.get(projectile).map(|p| p.pos) else {
            continue;
        };

        for &asteroid in &asteroid_handles {
            let Some(a) = state.asteroids.get(asteroid) else {
                continue;
            };
            if !circles_overlap(p_pos, projectile_radius, a.pos, a.tier.radius(&state.settings)) {
                continue;
            }

            let (tier, pos) = (a.tier, a.pos);
            remove_projectile(state, projectile);
            state.asteroids.release(asteroid);
            state.emit(SimEffect::Despawned(EntityId::Asteroid(asteroid)));

            log::debug!(
                "Projectile {:?} destroyed tier-{} asteroid at {}",
                projectile,
                tier.value(),
                pos
            );
            report.asteroid_hits.push(AsteroidHit {
                projectile,
                asteroid,
                tier,
                pos,
            });
            break;
        }
    }

    if !state.ship.invincible {
        let ship_pos = state.ship.pos;
        let ship_radius = state.settings.ship_radius;
        report.ship_hit = state
            .asteroids
            .iter()
            .find(|(_, a)| {
                circles_overlap(ship_pos, ship_radius, a.pos, a.tier.radius(&state.settings))
            })
            .map(|(h, _)| h);
    }

    report
}
