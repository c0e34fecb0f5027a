pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod params;
pub mod platform;
pub mod resources;
pub mod systems;

pub use components::*;
pub use config::*;
pub use error::GameError;
pub use game::Game;
pub use geometry::*;
pub use params::*;
pub use resources::*;

use hecs::World;
use platform::Platform;
use systems::*;

/// Advance the simulation by one frame of the platform's clock.
///
/// Order matters and is part of the game's behaviour: debug reset, ball
/// motion, scoring, paddle input, paddle collisions. Rendering is separate
/// (see [`systems::draw_frame`]).
pub fn step<P: Platform + ?Sized>(
    world: &mut World,
    time: &mut Time,
    platform: &P,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) {
    // Clear events at start of frame
    events.clear();

    time.advance(platform.frame_time());
    let screen = platform.screen();
    let input = read_input(platform);
    tracing::trace!(dt = time.dt, now = time.now, "step");

    // 1. Debug reset
    apply_debug_reset(world, &input, screen, config, rng, events);

    // 2. Move ball (bounces off top/bottom walls)
    move_ball(world, time, screen, events);

    // 3. Check scoring (ball exited past a side edge)
    check_scoring(world, screen, config, rng, events);

    // 4. Move paddles from held keys
    move_paddles(world, time, screen, &input);

    // 5. Ball vs paddles
    check_paddle_collisions(world, platform, config, events);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, paddle: Paddle) -> hecs::Entity {
    world.spawn((paddle,))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}

/// A paddle at its starting spot for `side`
pub fn spawn_paddle(side: Side, screen: Screen, config: &Config) -> Paddle {
    Paddle::new(
        side,
        glam::Vec2::new(
            config.paddle_x(side, screen.width),
            config.paddle_start_y(screen.height),
        ),
        config.paddle_size(),
        config.paddle_speed,
        Color::WHITE,
    )
}

/// A ball at the center with full radius, already served
pub fn spawn_ball(screen: Screen, config: &Config, rng: &mut GameRng) -> Ball {
    let mut ball = Ball::new(screen.center(), config.max_ball_radius, Color::WHITE);
    ball.reset(screen, config, rng);
    ball
}

pub fn ball_state(world: &World) -> Option<Ball> {
    world.query::<&Ball>().iter().next().map(|(_e, ball)| *ball)
}

pub fn paddle_state(world: &World, side: Side) -> Option<Paddle> {
    world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .find(|paddle| paddle.side == side)
}
