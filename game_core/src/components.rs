use glam::Vec2;
use rand::Rng;

use crate::config::Config;
use crate::geometry::{Rect, Screen};
use crate::platform::{Key, Platform};
use crate::GameRng;

/// RGBA color, display attribute only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Which end of the court a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Player 1
    Left,
    /// Player 2
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn up_key(self) -> Key {
        match self {
            Side::Left => Key::LeftUp,
            Side::Right => Key::RightUp,
        }
    }

    pub fn down_key(self) -> Key {
        match self {
            Side::Left => Key::LeftDown,
            Side::Right => Key::RightDown,
        }
    }

    /// Sign of the ball's x velocity when it travels toward this side
    pub fn approach_sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Multiplier in the deflection formula. Mirrored between sides so a
    /// strike near the top of either paddle sends the ball upward.
    pub fn deflection_sign(self) -> f32 {
        -self.approach_sign()
    }

    pub fn player_name(self) -> &'static str {
        match self {
            Side::Left => "player1",
            Side::Right => "player2",
        }
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    pub color: Color,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, color: Color) -> Self {
        Self {
            pos,
            radius,
            vel: Vec2::ZERO,
            color,
        }
    }

    /// Integrate position and reflect off the top and bottom walls.
    ///
    /// Returns true if the vertical velocity was inverted. The left and right
    /// edges are not walls; crossing them is a scoring event.
    pub fn advance(&mut self, dt: f32, screen: Screen) -> bool {
        self.pos += self.vel * dt;

        let mut bounced = false;
        if self.pos.y + self.radius > screen.height as f32 {
            self.vel.y *= -1.0;
            bounced = true;
        }
        if self.pos.y - self.radius < 0.0 {
            self.vel.y *= -1.0;
            bounced = true;
        }
        bounced
    }

    /// Re-center, restore the full radius and serve with a random velocity.
    ///
    /// Each axis is drawn uniformly from `[-max, max]` and then clamped into
    /// `[min, max]` by magnitude, keeping its sign. A draw of exactly zero is
    /// left at zero.
    pub fn reset(&mut self, screen: Screen, config: &Config, rng: &mut GameRng) {
        self.pos = screen.center();
        self.radius = config.max_ball_radius;

        let max = config.ball_speed_max;
        let vx = rng.0.gen_range(-max..=max);
        let vy = rng.0.gen_range(-max..=max);
        self.vel = Vec2::new(config.clamp_axis_speed(vx), config.clamp_axis_speed(vy));
    }

    pub fn draw<P: Platform + ?Sized>(&self, platform: &mut P) {
        platform.draw_circle(self.pos, self.radius, self.color);
    }
}

/// Paddle component - one player's bat and score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2, // top-left
    pub size: Vec2,
    pub speed: f32,
    pub color: Color,
    pub score: u32,
}

impl Paddle {
    pub fn new(side: Side, pos: Vec2, size: Vec2, speed: f32, color: Color) -> Self {
        Self {
            side,
            pos,
            size,
            speed,
            color,
            score: 0,
        }
    }

    pub fn move_up(&mut self, dt: f32) {
        self.pos.y -= self.speed * dt;
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
        }
    }

    pub fn move_down(&mut self, dt: f32, screen: Screen) {
        self.pos.y += self.speed * dt;
        let floor = screen.height as f32 - self.size.y;
        if self.pos.y > floor {
            self.pos.y = floor;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    pub fn draw<P: Platform + ?Sized>(&self, platform: &mut P) {
        platform.draw_rectangle(self.rect(), self.color);
    }
}
