use glam::Vec2;
use hecs::World;

use crate::error::Result;
use crate::platform::Platform;
use crate::{Ball, Color, Config, Paddle, Side};

/// Score line: player 1 and player 2 separated by a tab
pub fn score_text(left: u32, right: u32) -> String {
    format!("{left}\t{right}")
}

/// Draw one frame. Read-only with respect to the world.
pub fn draw_frame<P: Platform + ?Sized>(
    world: &World,
    platform: &mut P,
    config: &Config,
) -> Result<()> {
    let screen = platform.screen();

    platform.begin_frame();
    platform.clear_background(Color::BLACK);

    for (_entity, ball) in world.query::<&Ball>().iter() {
        ball.draw(platform);
    }

    let mut paddles: Vec<Paddle> = world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect();
    paddles.sort_by_key(|p| p.side == Side::Right);
    for paddle in &paddles {
        paddle.draw(platform);
    }

    let score_of = |side: Side| {
        paddles
            .iter()
            .find(|p| p.side == side)
            .map_or(0, |p| p.score)
    };
    let text = score_text(score_of(Side::Left), score_of(Side::Right));
    let text_width = platform.measure_text(&text, config.score_font_size);
    let center_x = screen.width as i32 / 2;
    platform.draw_text(
        &text,
        center_x - text_width / 2,
        config.score_y,
        config.score_font_size,
        Color::WHITE,
    );

    platform.draw_line(
        Vec2::new(center_x as f32, 0.0),
        Vec2::new(center_x as f32, screen.height as f32),
        Color::WHITE,
    );

    platform.end_frame()
}
