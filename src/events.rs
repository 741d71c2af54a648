//! Event channel from the core to the UI layer

use std::sync::mpsc::Sender;

use crate::sim::GameEvent;

/// Receives score/lives/level/game-over notifications
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Forward into a channel. A hung-up receiver is ignored: the core does not
/// depend on anyone listening.
impl EventSink for Sender<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        let _ = self.send(event);
    }
}

/// Collect into a vector
impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
