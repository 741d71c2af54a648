//! Ship controller and motion integration
//!
//! Input only sets heading and acceleration; velocity and position come from
//! the integrator so that drift, drag and the speed clamp apply uniformly.

use super::pool::Handle;
use super::state::{EntityId, EntityKind, GameState, Projectile, ScheduledTask, Ship, SimEffect};
use super::tick::TickInput;
use crate::audio::SoundEffect;
use crate::settings::Settings;
use crate::{deg_to_rad, heading_vector, wrap_position};

/// Apply rotation and thrust input for this tick
pub fn steer(ship: &mut Ship, input: &TickInput, dt: f32, settings: &Settings) {
    let turn_rate = deg_to_rad(settings.rotation_deg_per_sec);
    if input.rotate_left {
        ship.rotation -= turn_rate * dt;
    }
    if input.rotate_right {
        ship.rotation += turn_rate * dt;
    }

    // No coasting acceleration: releasing thrust zeroes it, velocity persists
    ship.accel = if input.thrust {
        heading_vector(ship.rotation) * settings.thrust_accel
    } else {
        glam::Vec2::ZERO
    };
}

/// Advance ship velocity and position by `dt` seconds
pub fn integrate_ship(ship: &mut Ship, dt: f32, settings: &Settings) {
    ship.vel += ship.accel * dt;
    ship.vel *= ship.damping.powf(dt);
    ship.vel = ship.vel.clamp_length_max(ship.max_speed);
    ship.pos = wrap_position(
        ship.pos + ship.vel * dt,
        settings.field_width,
        settings.field_height,
        settings.wrap_margin,
    );

    if ship.invincible {
        ship.invincibility_remaining_ms = (ship.invincibility_remaining_ms - dt * 1000.0).max(0.0);
    }
}

/// Fire a projectile if the trigger is held and the gun has cooled down.
/// A full projectile pool drops the shot silently.
pub fn try_fire(state: &mut GameState, input: &TickInput) -> Option<Handle> {
    if !input.fire || state.clock_ms < state.ship.next_fire_at_ms {
        return None;
    }

    let settings = &state.settings;
    let direction = heading_vector(state.ship.rotation);
    let projectile = Projectile {
        pos: state.ship.pos,
        vel: direction * settings.projectile_speed,
        expires_at_ms: state.clock_ms + settings.projectile_lifespan_ms,
        expiry: None,
    };

    let Some(handle) = state.projectiles.acquire(projectile) else {
        log::debug!("Projectile pool exhausted, shot dropped");
        return None;
    };

    let token = state.scheduler.schedule_once(
        state.clock_ms,
        state.settings.projectile_lifespan_ms,
        ScheduledTask::ExpireProjectile(handle),
    );
    if let Some(p) = state.projectiles.get_mut(handle) {
        p.expiry = Some(token);
    }
    state.ship.next_fire_at_ms = state.clock_ms + state.settings.fire_cooldown_ms;

    state.emit(SimEffect::Spawned(
        EntityId::Projectile(handle),
        EntityKind::Projectile,
    ));
    state.emit(SimEffect::Sound(SoundEffect::Shoot));
    Some(handle)
}

/// Move projectiles and asteroids by `dt` seconds, wrapping at the edges
pub fn integrate_pools(state: &mut GameState, dt: f32) {
    let (w, h, m) = (
        state.settings.field_width,
        state.settings.field_height,
        state.settings.wrap_margin,
    );

    for (_, p) in state.projectiles.iter_mut() {
        p.pos = wrap_position(p.pos + p.vel * dt, w, h, m);
    }

    for (_, a) in state.asteroids.iter_mut() {
        a.pos = wrap_position(a.pos + a.vel * dt, w, h, m);
        a.rotation += a.angular_vel * dt;
    }
}

/// Release a projectile and cancel its pending expiry
pub fn remove_projectile(state: &mut GameState, handle: Handle) -> bool {
    match state.projectiles.release(handle) {
        Some(p) => {
            if let Some(token) = p.expiry {
                state.scheduler.cancel(token);
            }
            state.emit(SimEffect::Despawned(EntityId::Projectile(handle)));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_rotation_rate() {
        let s = settings();
        let mut ship = Ship::new(&s);
        let input = TickInput {
            rotate_right: true,
            ..Default::default()
        };
        steer(&mut ship, &input, 1.0, &s);
        assert!((ship.rotation - deg_to_rad(200.0)).abs() < 1e-5);

        let input = TickInput {
            rotate_left: true,
            ..Default::default()
        };
        steer(&mut ship, &input, 0.5, &s);
        assert!((ship.rotation - deg_to_rad(100.0)).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_independent_of_thrust() {
        let s = settings();
        let mut a = Ship::new(&s);
        let mut b = Ship::new(&s);
        steer(
            &mut a,
            &TickInput {
                rotate_left: true,
                ..Default::default()
            },
            0.1,
            &s,
        );
        steer(
            &mut b,
            &TickInput {
                rotate_left: true,
                thrust: true,
                ..Default::default()
            },
            0.1,
            &s,
        );
        assert_eq!(a.rotation, b.rotation);
    }

    #[test]
    fn test_thrust_sets_and_release_clears_acceleration() {
        let s = settings();
        let mut ship = Ship::new(&s);
        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };
        steer(&mut ship, &thrust, 0.016, &s);
        // Heading 0 is up: negative y
        assert!((ship.accel - Vec2::new(0.0, -300.0)).length() < 1e-3);

        integrate_ship(&mut ship, 0.016, &s);
        let moving = ship.vel;
        assert!(moving.y < 0.0);

        steer(&mut ship, &TickInput::default(), 0.016, &s);
        assert_eq!(ship.accel, Vec2::ZERO);
        integrate_ship(&mut ship, 0.016, &s);
        // Still drifting, but slower
        assert!(ship.vel.y < 0.0);
        assert!(ship.vel.length() < moving.length());
    }

    #[test]
    fn test_damping_halves_speed_per_second() {
        let s = settings();
        let mut ship = Ship::new(&s);
        ship.vel = Vec2::new(200.0, 0.0);
        integrate_ship(&mut ship, 1.0, &s);
        assert!((ship.vel.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_speed_clamp() {
        let s = settings();
        let mut ship = Ship::new(&s);
        ship.vel = Vec2::new(1000.0, 1000.0);
        integrate_ship(&mut ship, 0.001, &s);
        assert!(ship.vel.length() <= s.ship_max_speed + 1e-3);
    }

    #[test]
    fn test_ship_wraps() {
        let s = settings();
        let mut ship = Ship::new(&s);
        ship.pos = Vec2::new(s.field_width + 19.0, 100.0);
        ship.vel = Vec2::new(100.0, 0.0);
        integrate_ship(&mut ship, 0.05, &s);
        assert_eq!(ship.pos.x, -s.wrap_margin);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = GameState::new(settings(), 1);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        assert!(try_fire(&mut state, &fire).is_some());
        assert!(try_fire(&mut state, &fire).is_none());

        state.clock_ms += 250.0;
        assert!(try_fire(&mut state, &fire).is_some());
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_fire_on_full_pool_is_noop() {
        let mut s = settings();
        s.pool_capacity = 1;
        let mut state = GameState::new(s, 1);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        assert!(try_fire(&mut state, &fire).is_some());
        state.clock_ms += 1000.0;
        assert!(try_fire(&mut state, &fire).is_none());
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_remove_projectile_cancels_expiry() {
        let mut state = GameState::new(settings(), 1);
        let timers_before = state.pending_timers();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let handle = try_fire(&mut state, &fire).unwrap();
        assert_eq!(state.pending_timers(), timers_before + 1);

        assert!(remove_projectile(&mut state, handle));
        assert_eq!(state.pending_timers(), timers_before);
        assert!(!remove_projectile(&mut state, handle));
    }
}
