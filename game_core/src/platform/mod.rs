//! The windowing/rendering collaborator the game loop is driven by.
//!
//! The core never talks to a window, terminal or GPU directly. A frontend
//! implements [`Platform`] and the simulation only sees screen size, frame
//! delta, key state, a handful of draw primitives and a collision test.

pub mod headless;

use glam::Vec2;

use crate::components::Color;
use crate::error::Result;
use crate::geometry::{Rect, Screen};

/// Logical keys the game reads. Physical bindings belong to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    /// Debug: re-serve the ball immediately
    Reset,
}

pub trait Platform {
    fn screen_width(&self) -> u32;
    fn screen_height(&self) -> u32;

    fn screen(&self) -> Screen {
        Screen::new(self.screen_width(), self.screen_height())
    }

    /// Seconds elapsed since the previous frame
    fn frame_time(&self) -> f32;

    /// Key is currently held
    fn is_key_down(&self, key: Key) -> bool;

    /// Key went down since the previous frame
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Close request (window closed, quit key); checked once per loop iteration
    fn window_should_close(&self) -> bool;

    fn begin_frame(&mut self);

    /// Present the frame, wait for the target frame rate and poll input.
    fn end_frame(&mut self) -> Result<()>;

    fn clear_background(&mut self, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_rectangle(&mut self, rect: Rect, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: i32, color: Color);
    fn measure_text(&self, text: &str, size: i32) -> i32;

    fn check_collision_circle_rect(&self, center: Vec2, radius: f32, rect: Rect) -> bool {
        rect.intersects_circle(center, radius)
    }
}
