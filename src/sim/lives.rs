//! Score, lives and the terminal transition

use super::state::{EntityId, GameEvent, GameState, ScheduledTask, SessionPhase, SimEffect};
use crate::audio::SoundEffect;

/// Credit one destroyed asteroid
pub fn award_asteroid(state: &mut GameState) {
    state.score = state.score.saturating_add(state.settings.points_per_asteroid);
    state.emit(SimEffect::Event(GameEvent::ScoreChanged(state.score)));
}

/// Ship touched an asteroid while vulnerable. Returns true when this ended
/// the session.
pub fn lose_life(state: &mut GameState) -> bool {
    if state.phase == SessionPhase::GameOver || state.ship.invincible {
        return false;
    }

    state.lives = state.lives.saturating_sub(1);
    state.emit(SimEffect::Event(GameEvent::LivesChanged(state.lives)));
    state.emit(SimEffect::Sound(SoundEffect::ShipHit));

    if state.lives == 0 {
        end_session(state);
        return true;
    }

    log::info!("Ship destroyed, {} lives left", state.lives);
    let center = state.settings.field_center();
    state.ship.reset(center);
    start_invincibility(state);
    false
}

/// Make the ship immune to asteroid contact for the configured window
pub fn start_invincibility(state: &mut GameState) {
    if let Some(old) = state.ship.invincibility_token.take() {
        state.scheduler.cancel(old);
    }
    let duration = state.settings.invincibility_ms;
    state.ship.invincible = true;
    state.ship.invincibility_remaining_ms = duration as f32;
    state.ship.invincibility_token = Some(state.scheduler.schedule_once(
        state.clock_ms,
        duration,
        ScheduledTask::EndInvincibility,
    ));
}

/// Invincibility timer callback
pub fn end_invincibility(state: &mut GameState) {
    state.ship.invincible = false;
    state.ship.invincibility_remaining_ms = 0.0;
    state.ship.invincibility_token = None;
}

/// Single terminal transition. Cancels every pending timer so nothing fires
/// after the session is over. Returns false if the session had already ended.
pub fn end_session(state: &mut GameState) -> bool {
    if state.phase == SessionPhase::GameOver {
        return false;
    }

    if let Some(token) = state.ship.invincibility_token.take() {
        state.scheduler.cancel(token);
    }
    if let Some(token) = state.wave.spawn_token.take() {
        state.scheduler.cancel(token);
    }
    state.scheduler.clear();

    state.phase = SessionPhase::GameOver;
    state.ship.invincible = false;
    state.ship.invincibility_remaining_ms = 0.0;

    log::info!(
        "Session over: score {} on wave {}",
        state.score,
        state.wave.number
    );
    state.emit(SimEffect::Despawned(EntityId::Ship));
    state.emit(SimEffect::Event(GameEvent::GameOver));
    state.emit(SimEffect::Sound(SoundEffect::GameOver));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(Settings::default(), 5)
    }

    fn events(state: &mut GameState) -> Vec<GameEvent> {
        state
            .drain_effects()
            .into_iter()
            .filter_map(|e| match e {
                SimEffect::Event(ev) => Some(ev),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_award_is_flat() {
        let mut state = state();
        award_asteroid(&mut state);
        award_asteroid(&mut state);
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_lose_life_respawns_invincible() {
        let mut state = state();
        state.ship.pos = Vec2::new(10.0, 10.0);
        state.ship.vel = Vec2::new(50.0, 0.0);
        state.ship.rotation = 1.0;
        state.drain_effects();

        assert!(!lose_life(&mut state));
        assert_eq!(state.lives, 2);
        assert_eq!(state.ship.pos, Vec2::new(512.0, 384.0));
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.ship.rotation, 0.0);
        assert!(state.ship.invincible);
        assert_eq!(state.ship.invincibility_remaining_ms, 2000.0);
        assert_eq!(events(&mut state), vec![GameEvent::LivesChanged(2)]);

        // Ignored entirely while invincible
        assert!(!lose_life(&mut state));
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_last_life_ends_session_once() {
        let mut state = state();
        state.lives = 1;
        state.drain_effects();

        assert!(lose_life(&mut state));
        assert_eq!(state.phase, SessionPhase::GameOver);
        assert_eq!(state.pending_timers(), 0);
        assert!(!end_session(&mut state));
        assert!(!lose_life(&mut state));

        let over = events(&mut state)
            .into_iter()
            .filter(|e| *e == GameEvent::GameOver)
            .count();
        assert_eq!(over, 1);
    }

    #[test]
    fn test_end_session_cancels_invincibility_timer() {
        let mut state = state();
        start_invincibility(&mut state);
        let token = state.ship.invincibility_token.unwrap();
        assert!(state.scheduler.is_pending(token));

        end_session(&mut state);
        assert!(!state.scheduler.is_pending(token));
        assert!(state.scheduler.drain_due(f64::MAX).is_empty());
    }
}
