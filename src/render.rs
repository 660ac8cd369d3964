//! Draw-call contract for the rendering collaborator
//!
//! The core never draws; it hands positions to whatever canvas layer is
//! plugged in. Rendering happens every tick regardless of catch outcome -
//! a caught object is simply not drawn the tick it vanishes.

use glam::Vec2;

use crate::Side;

/// What an object should be drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// The timed (left-slot) target
    TimedTarget,
    /// The periodically relocating (right-slot) target
    PeriodicTarget,
    /// A permanent marker where a target expired
    Exploded,
}

/// Rendering layer interface
pub trait Renderer {
    fn clear(&mut self);
    fn resize(&mut self, width: f32, height: f32);
    fn draw_object(&mut self, position: Vec2, radius: f32, kind: ObjectKind);
    fn draw_hand_marker(&mut self, position: Vec2, side: Side);
    /// Session terminated - show the end screen
    fn show_end_screen(&mut self);
}

/// Renderer that discards every call. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self) {}
    fn resize(&mut self, _width: f32, _height: f32) {}
    fn draw_object(&mut self, _position: Vec2, _radius: f32, _kind: ObjectKind) {}
    fn draw_hand_marker(&mut self, _position: Vec2, _side: Side) {}
    fn show_end_screen(&mut self) {}
}
