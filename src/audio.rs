//! Audio cues
//!
//! The core only names sounds; playback belongs to whoever implements
//! [`AudioCue`]. A missing cue is never an error.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Projectile fired
    Shoot,
    /// Asteroid destroyed
    Explode,
    /// Ship lost a life
    ShipHit,
    /// Wave banner
    WaveStart,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// Asset key for the cue
    pub fn cue_name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explode => "explode",
            SoundEffect::ShipHit => "ship_hit",
            SoundEffect::WaveStart => "wave_start",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Fire-and-forget sound playback
pub trait AudioCue {
    fn play(&mut self, cue: &str);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioCue for Silent {
    fn play(&mut self, _cue: &str) {}
}

/// Writes cues to the log, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioCue for LogAudio {
    fn play(&mut self, cue: &str) {
        log::trace!("audio cue: {}", cue);
    }
}
