use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{supports_keyboard_enhancement, SetTitle};
use game_core::error::Result;
use game_core::platform::{Key, Platform};
use game_core::{Color, Config, Rect, Screen};
use glam::Vec2;
use ratatui::DefaultTerminal;
use tracing::{debug, info, warn};

use crate::canvas::{expand_tabs, Scene, Shape};
use crate::keys::KeyTracker;

/// [`Platform`] backed by a ratatui terminal.
///
/// The game sees a fixed logical screen (the configured window size); the
/// canvas scales it to whatever the terminal currently measures.
pub struct TerminalPlatform {
    terminal: DefaultTerminal,
    logical: Screen,
    frame_budget: Duration,
    last_frame: Instant,
    polled_at: Instant,
    frame_time: f32,
    keys: KeyTracker,
    scene: Scene,
    columns: u16,
    enhanced: bool,
}

impl TerminalPlatform {
    pub fn new(terminal: DefaultTerminal, config: &Config) -> Result<Self> {
        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        } else {
            warn!("terminal does not report key releases, falling back to key repeat");
        }
        execute!(stdout(), SetTitle(&config.window_title))?;

        let columns = terminal.size()?.width;
        let now = Instant::now();
        let frame_budget = frame_budget(config.target_fps);
        info!(
            columns,
            enhanced,
            fps = config.target_fps,
            "terminal platform ready"
        );

        Ok(Self {
            terminal,
            logical: Screen::new(config.window_width, config.window_height),
            frame_budget,
            last_frame: now,
            polled_at: now,
            frame_time: frame_budget.as_secs_f32(),
            keys: KeyTracker::new(enhanced),
            scene: Scene::default(),
            columns,
            enhanced,
        })
    }

    fn poll_until(&mut self, deadline: Instant) -> Result<()> {
        self.keys.start_frame();
        loop {
            if !event::poll(poll_timeout(deadline, Instant::now()))? {
                return Ok(());
            }
            match event::read()? {
                Event::Key(key) => self.keys.handle(key, Instant::now()),
                Event::Resize(columns, rows) => {
                    debug!(columns, rows, "terminal resized");
                    self.columns = columns;
                }
                _ => {}
            }
        }
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

impl Platform for TerminalPlatform {
    fn screen_width(&self) -> u32 {
        self.logical.width
    }

    fn screen_height(&self) -> u32 {
        self.logical.height
    }

    fn frame_time(&self) -> f32 {
        self.frame_time
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys.is_down(key, self.polled_at)
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.is_pressed(key)
    }

    fn window_should_close(&self) -> bool {
        self.keys.quit_requested()
    }

    fn begin_frame(&mut self) {}

    fn end_frame(&mut self) -> Result<()> {
        let logical = self.logical;
        let scene = &self.scene;
        let completed = self
            .terminal
            .draw(|frame| scene.render(frame, logical))?;
        self.columns = completed.area.width;

        self.poll_until(self.last_frame + self.frame_budget)?;

        let now = Instant::now();
        self.frame_time = frame_delta(self.last_frame, now);
        self.last_frame = now;
        self.polled_at = now;
        Ok(())
    }

    fn clear_background(&mut self, color: Color) {
        self.scene.clear(color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.scene.push(Shape::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        self.scene.push(Shape::Rectangle { rect, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.scene.push(Shape::Line { from, to, color });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, _size: i32, color: Color) {
        self.scene.push(Shape::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    /// Terminal glyphs have one size: a character is one column wide
    fn measure_text(&self, text: &str, _size: i32) -> i32 {
        text_width(text, self.logical, self.columns)
    }
}

/// Target duration of one frame
fn frame_budget(target_fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / target_fps.max(1) as f64)
}

/// How long input polling may block before the frame is due. Zero once late,
/// so pending events are still drained without waiting.
fn poll_timeout(deadline: Instant, now: Instant) -> Duration {
    deadline.saturating_duration_since(now)
}

/// Seconds between two presented frames
fn frame_delta(last_frame: Instant, now: Instant) -> f32 {
    now.saturating_duration_since(last_frame).as_secs_f32()
}

/// Width in logical units of `text` printed on a terminal `columns` wide
fn text_width(text: &str, logical: Screen, columns: u16) -> i32 {
    let chars = expand_tabs(text).chars().count() as f32;
    let column_width = logical.width as f32 / columns.max(1) as f32;
    (chars * column_width).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_budget_follows_target_fps() {
        assert_eq!(frame_budget(50), Duration::from_millis(20));
        assert_eq!(frame_budget(1), Duration::from_secs(1));
        assert_eq!(
            frame_budget(0),
            Duration::from_secs(1),
            "Zero fps is not a division by zero"
        );
    }

    #[test]
    fn test_poll_waits_only_until_deadline() {
        let last_frame = Instant::now();
        let deadline = last_frame + frame_budget(50);

        assert_eq!(poll_timeout(deadline, last_frame), Duration::from_millis(20));
        assert_eq!(
            poll_timeout(deadline, last_frame + Duration::from_millis(15)),
            Duration::from_millis(5)
        );
        assert_eq!(
            poll_timeout(deadline, last_frame + Duration::from_millis(35)),
            Duration::ZERO,
            "A late frame polls without blocking"
        );
    }

    #[test]
    fn test_frame_delta_measures_elapsed_seconds() {
        let last_frame = Instant::now();

        let dt = frame_delta(last_frame, last_frame + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6, "got {dt}");

        let slow = frame_delta(last_frame, last_frame + Duration::from_millis(250));
        assert!((slow - 0.25).abs() < 1e-6, "Slow frames report their real delta");

        assert_eq!(frame_delta(last_frame, last_frame), 0.0);
    }

    #[test]
    fn test_text_width_scales_with_columns() {
        let logical = Screen::new(1280, 720);
        // "0    0" is 6 columns, 8 logical units each on a 160-column terminal
        assert_eq!(text_width("0\t0", logical, 160), 48);
        assert_eq!(text_width("0\t0", logical, 320), 24);
    }

    #[test]
    fn test_text_width_survives_zero_columns() {
        assert_eq!(text_width("ab", Screen::new(100, 100), 0), 200);
        assert_eq!(text_width("", Screen::new(100, 100), 80), 0);
    }
}
