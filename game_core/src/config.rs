use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::components::Side;
use crate::error::{GameError, Result};
use crate::params::Params;

/// Game configuration
///
/// Every field has a default from [`Params`], so a TOML file only needs the
/// keys it wants to override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,
    pub target_fps: u32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_margin: f32,
    pub min_ball_radius: f32,
    pub max_ball_radius: f32,
    pub ball_speed_min: f32,
    pub ball_speed_max: f32,
    pub ball_speed_increase: f32,
    pub ball_radius_shrink: f32,
    pub score_font_size: i32,
    pub score_y: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: Params::WINDOW_WIDTH,
            window_height: Params::WINDOW_HEIGHT,
            window_title: Params::WINDOW_TITLE.to_string(),
            target_fps: Params::TARGET_FPS,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_margin: Params::PADDLE_MARGIN,
            min_ball_radius: Params::MIN_BALL_RADIUS,
            max_ball_radius: Params::MAX_BALL_RADIUS,
            ball_speed_min: Params::BALL_SPEED_MIN,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
            ball_radius_shrink: Params::BALL_RADIUS_SHRINK,
            score_font_size: Params::SCORE_FONT_SIZE,
            score_y: Params::SCORE_Y,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                let config = Self::from_toml_str(&source)?;
                tracing::info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(GameError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.window_width == 0 || self.window_height == 0 {
            return invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            ));
        }
        if self.target_fps == 0 {
            return invalid("target_fps must be at least 1".to_string());
        }
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        if self.paddle_width <= 0.0 || self.paddle_height <= 0.0 {
            return invalid(format!(
                "paddle size must be positive, got {}x{}",
                self.paddle_width, self.paddle_height
            ));
        }
        if self.paddle_speed < 0.0 {
            return invalid(format!(
                "paddle_speed must not be negative, got {}",
                self.paddle_speed
            ));
        }
        if self.paddle_height > self.window_height as f32 {
            return invalid(format!(
                "paddle_height {} does not fit in window_height {}",
                self.paddle_height, self.window_height
            ));
        }
        if self.min_ball_radius <= 0.0 || self.min_ball_radius > self.max_ball_radius {
            return invalid(format!(
                "ball radius range [{}, {}] is empty or non-positive",
                self.min_ball_radius, self.max_ball_radius
            ));
        }
        if self.ball_speed_min < 0.0 || self.ball_speed_min > self.ball_speed_max {
            return invalid(format!(
                "ball speed range [{}, {}] is empty or negative",
                self.ball_speed_min, self.ball_speed_max
            ));
        }
        if self.ball_speed_increase <= 0.0 {
            return invalid(format!(
                "ball_speed_increase must be positive, got {}",
                self.ball_speed_increase
            ));
        }
        if self.ball_radius_shrink < 0.0 {
            return invalid(format!(
                "ball_radius_shrink must not be negative, got {}",
                self.ball_radius_shrink
            ));
        }
        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f32); 10] {
        [
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("paddle_margin", self.paddle_margin),
            ("min_ball_radius", self.min_ball_radius),
            ("max_ball_radius", self.max_ball_radius),
            ("ball_speed_min", self.ball_speed_min),
            ("ball_speed_max", self.ball_speed_max),
            ("ball_speed_increase", self.ball_speed_increase),
            ("ball_radius_shrink", self.ball_radius_shrink),
        ]
    }

    pub fn paddle_size(&self) -> Vec2 {
        Vec2::new(self.paddle_width, self.paddle_height)
    }

    /// Get the left edge X of a paddle for the given screen width
    pub fn paddle_x(&self, side: Side, screen_width: u32) -> f32 {
        match side {
            Side::Left => self.paddle_margin,
            Side::Right => screen_width as f32 - self.paddle_width - self.paddle_margin,
        }
    }

    /// Starting top edge Y, vertically centered. The screen height is halved
    /// in integer arithmetic first.
    pub fn paddle_start_y(&self, screen_height: u32) -> f32 {
        (screen_height / 2) as f32 - self.paddle_height / 2.0
    }

    /// Clamp a per-axis speed into `[ball_speed_min, ball_speed_max]` keeping
    /// its sign. Exactly zero is left alone.
    pub fn clamp_axis_speed(&self, speed: f32) -> f32 {
        if speed > 0.0 {
            speed.clamp(self.ball_speed_min, self.ball_speed_max)
        } else if speed < 0.0 {
            speed.clamp(-self.ball_speed_max, -self.ball_speed_min)
        } else {
            speed
        }
    }

    /// Radius after one paddle hit, floored at the minimum
    pub fn shrink_radius(&self, radius: f32) -> f32 {
        (radius - self.ball_radius_shrink).max(self.min_ball_radius)
    }
}
