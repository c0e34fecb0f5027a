use crate::platform::Platform;
use crate::{Ball, Config, Events, Paddle, Side};
use hecs::World;

/// Where on the paddle the ball struck, from -1 (top edge) to 1 (bottom
/// edge). Not clamped: a strike past the corners gives a steeper angle.
pub fn hit_offset(ball_y: f32, paddle: &Paddle) -> f32 {
    (ball_y - paddle.center_y()) / (paddle.size.y / 2.0)
}

/// Vertical speed after a bounce, from the hit offset and the already
/// reflected horizontal speed.
pub fn deflection(offset: f32, vx: f32, side: Side) -> f32 {
    offset * vx * side.deflection_sign()
}

/// Bounce the ball off `paddle` if it is travelling toward it.
///
/// Returns false without touching the ball when it is already receding, so a
/// ball still overlapping the paddle on the next frame does not bounce twice.
pub fn bounce(ball: &mut Ball, paddle: &Paddle, config: &Config) -> bool {
    if ball.vel.x * paddle.side.approach_sign() <= 0.0 {
        return false;
    }

    ball.vel.x *= -config.ball_speed_increase;
    ball.radius = config.shrink_radius(ball.radius);
    ball.vel.y = deflection(hit_offset(ball.pos.y, paddle), ball.vel.x, paddle.side);
    true
}

/// Check ball collisions with both paddles, right paddle first
pub fn check_paddle_collisions<P: Platform + ?Sized>(
    world: &mut World,
    platform: &P,
    config: &Config,
    events: &mut Events,
) {
    // Collect paddle data without holding borrows
    let mut paddles: Vec<Paddle> = world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect();
    paddles.sort_by_key(|p| p.side == Side::Left);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        for paddle in &paddles {
            if !platform.check_collision_circle_rect(ball.pos, ball.radius, paddle.rect()) {
                continue;
            }
            if bounce(ball, paddle, config) {
                events.ball_hit_paddle = true;
                tracing::debug!(
                    player = paddle.side.player_name(),
                    vel = ?ball.vel,
                    radius = ball.radius,
                    "paddle bounce"
                );
            }
        }
    }
}
