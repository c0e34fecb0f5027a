//! In-memory platform: scripted input, fixed frame delta, recorded draw calls.

use std::collections::HashSet;

use glam::Vec2;

use super::{Key, Platform};
use crate::components::Color;
use crate::error::Result;
use crate::geometry::{Rect, Screen};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Rectangle {
        rect: Rect,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        size: i32,
        color: Color,
    },
}

#[derive(Debug)]
pub struct HeadlessPlatform {
    screen: Screen,
    frame_time: f32,
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    frames_left: Option<u32>,
    current: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    frames_drawn: u64,
}

impl HeadlessPlatform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: Screen::new(width, height),
            frame_time: 1.0 / 60.0,
            held: HashSet::new(),
            pressed: HashSet::new(),
            frames_left: None,
            current: Vec::new(),
            presented: Vec::new(),
            frames_drawn: 0,
        }
    }

    pub fn set_frame_time(&mut self, dt: f32) {
        self.frame_time = dt;
    }

    pub fn hold(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Edge-press a key for the next frame only
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    /// Report a close request once `frames` more frames have been presented
    pub fn close_after(&mut self, frames: u32) {
        self.frames_left = Some(frames);
    }

    /// Draw calls of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.presented
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl Platform for HeadlessPlatform {
    fn screen_width(&self) -> u32 {
        self.screen.width
    }

    fn screen_height(&self) -> u32 {
        self.screen.height
    }

    fn frame_time(&self) -> f32 {
        self.frame_time
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn window_should_close(&self) -> bool {
        self.frames_left == Some(0)
    }

    fn begin_frame(&mut self) {
        self.current.clear();
    }

    fn end_frame(&mut self) -> Result<()> {
        self.presented = std::mem::take(&mut self.current);
        self.pressed.clear();
        self.frames_drawn += 1;
        if let Some(left) = self.frames_left.as_mut() {
            *left = left.saturating_sub(1);
        }
        Ok(())
    }

    fn clear_background(&mut self, color: Color) {
        self.current.push(DrawCommand::Clear(color));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.current.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        self.current.push(DrawCommand::Rectangle { rect, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.current.push(DrawCommand::Line { from, to, color });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: i32, color: Color) {
        self.current.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }

    // Monospace approximation: half the font size per character
    fn measure_text(&self, text: &str, size: i32) -> i32 {
        text.chars().count() as i32 * size / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_lasts_one_frame() {
        let mut platform = HeadlessPlatform::new(1280, 720);
        platform.press(Key::Reset);
        assert!(platform.is_key_pressed(Key::Reset));
        platform.end_frame().unwrap();
        assert!(!platform.is_key_pressed(Key::Reset));
    }

    #[test]
    fn test_hold_persists_until_release() {
        let mut platform = HeadlessPlatform::new(1280, 720);
        platform.hold(Key::LeftUp);
        platform.end_frame().unwrap();
        assert!(platform.is_key_down(Key::LeftUp));
        platform.release(Key::LeftUp);
        assert!(!platform.is_key_down(Key::LeftUp));
    }

    #[test]
    fn test_close_after_counts_presented_frames() {
        let mut platform = HeadlessPlatform::new(1280, 720);
        platform.close_after(2);
        assert!(!platform.window_should_close());
        platform.end_frame().unwrap();
        assert!(!platform.window_should_close());
        platform.end_frame().unwrap();
        assert!(platform.window_should_close());
    }

    #[test]
    fn test_end_frame_presents_recorded_commands() {
        let mut platform = HeadlessPlatform::new(1280, 720);
        platform.begin_frame();
        platform.clear_background(Color::BLACK);
        platform.draw_line(Vec2::ZERO, Vec2::ONE, Color::WHITE);
        assert!(platform.last_frame().is_empty());
        platform.end_frame().unwrap();
        assert_eq!(platform.last_frame().len(), 2);
        assert_eq!(platform.frames_drawn(), 1);
    }
}
