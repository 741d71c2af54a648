//! Public session API
//!
//! Wraps the deterministic core with its collaborators: after every tick the
//! queued effects go to the event sink, audio and renderer, and the terminal
//! transition records the score in the highscore store exactly once.

use crate::audio::{AudioCue, Silent};
use crate::events::{EventSink, NullSink};
use crate::highscores::HighScores;
use crate::persistence::PersistentStore;
use crate::platform::InputSource;
use crate::renderer::{NullRenderer, Renderer};
use crate::settings::Settings;
use crate::sim::lives::end_session;
use crate::sim::{EntityId, GameState, SimEffect, TickInput, TickOutcome, WaveState, tick};

/// Collaborators injected at construction
pub struct SessionHooks {
    pub events: Box<dyn EventSink>,
    pub audio: Box<dyn AudioCue>,
    pub renderer: Box<dyn Renderer>,
}

impl Default for SessionHooks {
    fn default() -> Self {
        Self {
            events: Box::new(NullSink),
            audio: Box::new(Silent),
            renderer: Box::new(NullRenderer),
        }
    }
}

impl SessionHooks {
    pub fn with_events(mut self, events: impl EventSink + 'static) -> Self {
        self.events = Box::new(events);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioCue + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }
}

/// One play session, from wave 1 to game over
pub struct Session {
    state: GameState,
    hooks: SessionHooks,
    highscores: HighScores,
    player_name: String,
    /// Rank achieved once the session has been recorded
    final_rank: Option<usize>,
    recorded: bool,
}

impl Session {
    pub fn new(
        settings: Settings,
        seed: u64,
        store: Box<dyn PersistentStore>,
        hooks: SessionHooks,
    ) -> Self {
        let settings = settings.validated();
        let highscores = HighScores::load_with_capacity(store, settings.highscore_capacity);
        log::info!("Session started with seed: {}", seed);

        let mut session = Self {
            state: GameState::new(settings, seed),
            hooks,
            highscores,
            player_name: String::new(),
            final_rank: None,
            recorded: false,
        };
        session.dispatch();
        session
    }

    /// Name recorded with the score when the session ends
    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name.to_string();
    }

    /// Advance one frame
    pub fn update(&mut self, input: &TickInput, dt_ms: f32) -> TickOutcome {
        let outcome = tick(&mut self.state, input, dt_ms);
        self.dispatch();
        if matches!(outcome, TickOutcome::GameOver { .. }) {
            self.record();
        }
        if matches!(outcome, TickOutcome::Running) {
            self.sync_visuals();
        }
        outcome
    }

    /// Advance one frame reading input from `source`
    pub fn update_from(&mut self, source: &mut dyn InputSource, dt_ms: f32) -> TickOutcome {
        let input = source.poll();
        self.update(&input, dt_ms)
    }

    /// Player quit: end the session now and record the score.
    /// Returns `None` if it had already ended.
    pub fn abandon(&mut self) -> Option<TickOutcome> {
        if !end_session(&mut self.state) {
            return None;
        }
        self.dispatch();
        self.record();
        Some(TickOutcome::GameOver {
            score: self.state.score,
        })
    }

    fn record(&mut self) {
        if self.recorded {
            return;
        }
        self.recorded = true;
        self.final_rank = self.highscores.save(&self.player_name, self.state.score);
        match self.final_rank {
            Some(rank) => log::info!("New high score #{}: {}", rank, self.state.score),
            None => log::info!("Score {} did not make the board", self.state.score),
        }
    }

    fn dispatch(&mut self) {
        for effect in self.state.drain_effects() {
            match effect {
                SimEffect::Event(event) => self.hooks.events.emit(event),
                SimEffect::Sound(sound) => self.hooks.audio.play(sound.cue_name()),
                SimEffect::Spawned(id, kind) => self.hooks.renderer.create(id, kind),
                SimEffect::Despawned(id) => self.hooks.renderer.destroy(id),
            }
        }
    }

    fn sync_visuals(&mut self) {
        let renderer = &mut self.hooks.renderer;
        let ship = &self.state.ship;
        renderer.update(EntityId::Ship, ship.pos, ship.rotation, ship.invincible);
        for (h, p) in self.state.projectiles.iter() {
            renderer.update(EntityId::Projectile(h), p.pos, 0.0, false);
        }
        for (h, a) in self.state.asteroids.iter() {
            renderer.update(EntityId::Asteroid(h), a.pos, a.rotation, false);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the core, for tooling and scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn wave(&self) -> &WaveState {
        &self.state.wave
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    pub fn final_rank(&self) -> Option<usize> {
        self.final_rank
    }
}
