//! Rendering interface
//!
//! The core never reads anything back from the renderer. It announces
//! entities as they appear, moves them once per tick, and removes them.

use glam::Vec2;

pub use crate::sim::{EntityId, EntityKind};

pub trait Renderer {
    fn create(&mut self, id: EntityId, kind: EntityKind);
    /// `blink` is set while the ship is invincible
    fn update(&mut self, id: EntityId, pos: Vec2, rotation: f32, blink: bool);
    fn destroy(&mut self, id: EntityId);
}

/// Headless renderer
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn create(&mut self, _id: EntityId, _kind: EntityKind) {}
    fn update(&mut self, _id: EntityId, _pos: Vec2, _rotation: f32, _blink: bool) {}
    fn destroy(&mut self, _id: EntityId) {}
}
