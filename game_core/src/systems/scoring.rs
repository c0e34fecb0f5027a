use crate::{Ball, Config, Events, GameRng, Paddle, Screen, Side};
use hecs::World;

/// Check if ball left the screen past a side edge (scoring)
///
/// Exiting right scores for player 1 (left paddle), exiting left scores for
/// player 2. The ball is re-served immediately, so at most one side scores
/// per frame.
pub fn check_scoring(
    world: &mut World,
    screen: Screen,
    config: &Config,
    rng: &mut GameRng,
    events: &mut Events,
) -> Option<Side> {
    let mut scorer = None;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.pos.x > screen.width as f32 {
            scorer = Some(Side::Left);
        } else if ball.pos.x < 0.0 {
            scorer = Some(Side::Right);
        }

        if scorer.is_some() {
            ball.reset(screen, config, rng);
            events.ball_reset = true;
        }
    }

    let side = scorer?;
    match side {
        Side::Left => events.left_scored = true,
        Side::Right => events.right_scored = true,
    }
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == side {
            paddle.score += 1;
            tracing::info!(player = side.player_name(), score = paddle.score, "point scored");
        }
    }
    Some(side)
}
