//! Platform abstraction layer
//!
//! Input arrives as discrete per-tick states; how they are produced (keys,
//! pointer, a script) is the platform's business.

use crate::sim::TickInput;

/// Source of per-tick input
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Replays a fixed sequence, then repeats the last entry
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    frames: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let Some(last) = self.frames.len().checked_sub(1) else {
            return TickInput::default();
        };
        let input = self.frames[self.cursor.min(last)].clone();
        self.cursor += 1;
        input
    }
}

/// Simple demo pilot: spin slowly and keep the trigger down, with short
/// thrust bursts so the ship does not sit still forever
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    frame: u64,
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> TickInput {
        self.frame += 1;
        TickInput {
            rotate_left: false,
            rotate_right: self.frame % 3 != 0,
            thrust: self.frame % 120 < 10,
            fire: true,
            pause: false,
        }
    }
}
