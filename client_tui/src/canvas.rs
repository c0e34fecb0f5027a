//! Retained draw list for one frame, painted onto a Braille canvas.
//!
//! Shapes are recorded in logical window coordinates (origin top-left, y
//! down). The canvas uses a bottom-left origin, so y is flipped at paint time.

use game_core::{Color, Rect, Screen};
use glam::Vec2;
use ratatui::style::{self, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Line, Points};
use ratatui::Frame;

const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32, color: Color },
    Rectangle { rect: Rect, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
    Text { text: String, x: i32, y: i32, color: Color },
}

#[derive(Debug, Default)]
pub struct Scene {
    background: Option<Color>,
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn clear(&mut self, background: Color) {
        self.background = Some(background);
        self.shapes.clear();
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn render(&self, frame: &mut Frame, logical: Screen) {
        let area = frame.area();
        let width = logical.width as f64;
        let height = logical.height as f64;
        let pitch = dot_pitch(logical, area.width, area.height);
        let flip = |x: f32, y: f32| (x as f64, height - y as f64);

        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height]);
        if let Some(background) = self.background {
            canvas = canvas.background_color(to_tui(background));
        }

        let canvas = canvas.paint(|ctx| {
            for shape in &self.shapes {
                match shape {
                    Shape::Circle {
                        center,
                        radius,
                        color,
                    } => {
                        let coords: Vec<(f64, f64)> = fill_circle_points(*center, *radius, pitch)
                            .into_iter()
                            .map(|p| flip(p.x, p.y))
                            .collect();
                        ctx.draw(&Points {
                            coords: &coords,
                            color: to_tui(*color),
                        });
                    }
                    Shape::Rectangle { rect, color } => {
                        let coords: Vec<(f64, f64)> = fill_rect_points(*rect, pitch)
                            .into_iter()
                            .map(|p| flip(p.x, p.y))
                            .collect();
                        ctx.draw(&Points {
                            coords: &coords,
                            color: to_tui(*color),
                        });
                    }
                    Shape::Line { from, to, color } => {
                        let (x1, y1) = flip(from.x, from.y);
                        let (x2, y2) = flip(to.x, to.y);
                        ctx.draw(&Line {
                            x1,
                            y1,
                            x2,
                            y2,
                            color: to_tui(*color),
                        });
                    }
                    Shape::Text { text, x, y, color } => {
                        let (x, y) = flip(*x as f32, *y as f32);
                        let span =
                            Span::styled(expand_tabs(text), Style::default().fg(to_tui(*color)));
                        ctx.print(x, y, span);
                    }
                }
            }
        });

        frame.render_widget(canvas, area);
    }
}

pub fn to_tui(color: Color) -> style::Color {
    style::Color::Rgb(color.r, color.g, color.b)
}

pub fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Logical distance between neighbouring Braille dots (2x4 per cell)
pub fn dot_pitch(logical: Screen, columns: u16, rows: u16) -> Vec2 {
    Vec2::new(
        logical.width as f32 / (columns.max(1) as f32 * 2.0),
        logical.height as f32 / (rows.max(1) as f32 * 4.0),
    )
}

fn grid(min: f32, max: f32, step: f32) -> impl Iterator<Item = f32> {
    let count = ((max - min) / step).floor().max(0.0) as usize;
    (0..=count).map(move |i| min + i as f32 * step)
}

/// Dot-grid samples covering a filled circle. Always contains the center.
pub fn fill_circle_points(center: Vec2, radius: f32, pitch: Vec2) -> Vec<Vec2> {
    let mut points = vec![center];
    for y in grid(center.y - radius, center.y + radius, pitch.y) {
        for x in grid(center.x - radius, center.x + radius, pitch.x) {
            let p = Vec2::new(x, y);
            if p != center && p.distance_squared(center) <= radius * radius {
                points.push(p);
            }
        }
    }
    points
}

/// Dot-grid samples covering a filled rectangle, edges included.
pub fn fill_rect_points(rect: Rect, pitch: Vec2) -> Vec<Vec2> {
    let max = rect.max();
    let xs: Vec<f32> = grid(rect.x, max.x, pitch.x).chain([max.x]).collect();
    grid(rect.y, max.y, pitch.y)
        .chain([max.y])
        .flat_map(|y| xs.iter().map(move |&x| Vec2::new(x, y)))
        .collect()
}
