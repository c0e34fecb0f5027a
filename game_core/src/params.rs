/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Window
    pub const WINDOW_WIDTH: u32 = 1280;
    pub const WINDOW_HEIGHT: u32 = 720;
    pub const WINDOW_TITLE: &'static str = "Pong";
    pub const TARGET_FPS: u32 = 60;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 25.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 800.0; // units per second
    pub const PADDLE_MARGIN: f32 = 50.0; // distance from the side edge

    // Ball
    pub const MIN_BALL_RADIUS: f32 = 5.0;
    pub const MAX_BALL_RADIUS: f32 = 15.0;
    pub const BALL_SPEED_MIN: f32 = 300.0; // per axis, after a reset
    pub const BALL_SPEED_MAX: f32 = 400.0;
    pub const BALL_SPEED_INCREASE: f32 = 1.1; // Multiply horizontal speed on paddle hit
    pub const BALL_RADIUS_SHRINK: f32 = 1.0;

    // Score text
    pub const SCORE_FONT_SIZE: i32 = 30;
    pub const SCORE_Y: i32 = 50;
}
