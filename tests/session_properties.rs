//! Property tests over random input scripts.
//!
//! Whatever the player does, every point comes from one destroyed asteroid,
//! each kill leaves exactly the fragments its tier calls for, the pools never
//! overflow and the session ends at most once.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::mpsc::channel;

use glam::Vec2;
use proptest::prelude::*;
use rock_drift::persistence::MemoryStore;
use rock_drift::renderer::{EntityId, EntityKind, Renderer};
use rock_drift::sim::{AsteroidTier, GameEvent, Handle, TickInput, TickOutcome};
use rock_drift::{Session, SessionHooks, Settings};

/// Asteroid creations and removals seen by the renderer since the last reset
#[derive(Default)]
struct Tally {
    destroyed: Vec<Handle>,
    created: Vec<(Handle, AsteroidTier)>,
}

#[derive(Clone, Default)]
struct TallyRenderer(Rc<RefCell<Tally>>);

impl Renderer for TallyRenderer {
    fn create(&mut self, id: EntityId, kind: EntityKind) {
        if let (EntityId::Asteroid(handle), EntityKind::Asteroid(tier)) = (id, kind) {
            self.0.borrow_mut().created.push((handle, tier));
        }
    }

    fn update(&mut self, _id: EntityId, _pos: Vec2, _rotation: f32, _blink: bool) {}

    fn destroy(&mut self, id: EntityId) {
        if let EntityId::Asteroid(handle) = id {
            self.0.borrow_mut().destroyed.push(handle);
        }
    }
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(rotate_left, rotate_right, thrust, fire)| TickInput {
            rotate_left,
            rotate_right,
            thrust,
            fire,
            pause: false,
        },
    )
}

fn count(tiers: &[AsteroidTier], tier: AsteroidTier) -> usize {
    tiers.iter().filter(|t| **t == tier).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn session_invariants_hold(
        seed in any::<u64>(),
        script in prop::collection::vec((input_strategy(), 0.0f32..100.0), 1..400),
    ) {
        let (tx, rx) = channel();
        let tally = TallyRenderer::default();
        let settings = Settings::default();
        let mut session = Session::new(
            settings.clone(),
            seed,
            Box::new(MemoryStore::new()),
            SessionHooks::default()
                .with_events(tx)
                .with_renderer(tally.clone()),
        );

        let mut kills: u64 = 0;
        let mut game_overs = 0;
        let mut last_wave = 1;
        for (input, dt) in &script {
            let before: HashMap<Handle, AsteroidTier> = session
                .state()
                .asteroids
                .iter()
                .map(|(h, a)| (h, a.tier))
                .collect();
            *tally.0.borrow_mut() = Tally::default();

            if matches!(session.update(input, *dt), TickOutcome::GameOver { .. }) {
                game_overs += 1;
            }

            let tick_tally = std::mem::take(&mut *tally.0.borrow_mut());
            let created: Vec<AsteroidTier> =
                tick_tally.created.iter().map(|(_, t)| *t).collect();
            // A wave rock can spawn and be shot within the same tick
            let mut known = before.clone();
            known.extend(tick_tally.created.iter().copied());

            let mut killed = Vec::new();
            for handle in &tick_tally.destroyed {
                let tier = known.get(handle).copied();
                prop_assert!(tier.is_some(), "destroyed asteroid was not on the field");
                killed.extend(tier);
            }
            kills += killed.len() as u64;

            let state = session.state();
            prop_assert_eq!(state.score, settings.points_per_asteroid * kills);

            // Wave spawns are the only source of large rocks
            let wave_spawns = count(&created, AsteroidTier::Large);
            if !state.asteroids.is_full() {
                prop_assert_eq!(
                    count(&created, AsteroidTier::Medium),
                    2 * count(&killed, AsteroidTier::Large)
                );
                prop_assert_eq!(
                    count(&created, AsteroidTier::Small),
                    2 * count(&killed, AsteroidTier::Medium)
                );
                let net: i64 = killed
                    .iter()
                    .map(|t| if *t == AsteroidTier::Small { -1 } else { 1 })
                    .sum();
                prop_assert_eq!(
                    state.asteroids.len() as i64 - before.len() as i64,
                    wave_spawns as i64 + net
                );
            }

            prop_assert!(state.lives <= settings.starting_lives);
            prop_assert!(state.projectiles.len() <= settings.pool_capacity);
            prop_assert!(state.asteroids.len() <= settings.pool_capacity);
            prop_assert!(state.wave.number >= last_wave);
            last_wave = state.wave.number;

            let margin = settings.wrap_margin;
            let ship = state.ship.pos;
            prop_assert!(ship.x >= -margin && ship.x <= settings.field_width + margin);
            prop_assert!(ship.y >= -margin && ship.y <= settings.field_height + margin);
        }

        prop_assert!(game_overs <= 1);
        let events: Vec<_> = rx.try_iter().collect();
        let ended = events.iter().filter(|e| **e == GameEvent::GameOver).count();
        prop_assert_eq!(ended, game_overs);
        prop_assert_eq!(session.is_over(), game_overs == 1);
    }
}
