use crate::systems::input::FrameInput;
use crate::{Ball, Events, Paddle, Screen, Time};
use hecs::World;

/// Move ball based on velocity, reflecting off top and bottom walls
pub fn move_ball(world: &mut World, time: &Time, screen: Screen, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.advance(time.dt, screen) {
            events.ball_hit_wall = true;
            tracing::trace!(pos = ?ball.pos, vy = ball.vel.y, "wall bounce");
        }
    }
}

/// Apply held keys to paddles. Up is applied before down, so with both held
/// the down move lands last.
pub fn move_paddles(world: &mut World, time: &Time, screen: Screen, input: &FrameInput) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if input.up(paddle.side) {
            paddle.move_up(time.dt);
        }
        if input.down(paddle.side) {
            paddle.move_down(time.dt, screen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, paddle_state, Color, Config, Side};
    use glam::Vec2;

    const SCREEN: Screen = Screen {
        width: 1280,
        height: 720,
    };

    fn setup_paddles(world: &mut World, config: &Config) {
        for side in Side::BOTH {
            create_paddle(world, crate::spawn_paddle(side, SCREEN, config));
        }
    }

    #[test]
    fn test_move_ball_integrates_velocity() {
        let mut world = World::new();
        let mut events = Events::new();
        let mut ball = Ball::new(Vec2::new(640.0, 360.0), 15.0, Color::WHITE);
        ball.vel = Vec2::new(-350.0, 200.0);
        create_ball(&mut world, ball);

        move_ball(&mut world, &Time::new(1.0, 0.0), SCREEN, &mut events);

        let ball = crate::ball_state(&world).unwrap();
        assert_eq!(ball.pos, Vec2::new(290.0, 560.0));
        assert!(!events.ball_hit_wall);
    }

    #[test]
    fn test_move_ball_flags_wall_hit() {
        let mut world = World::new();
        let mut events = Events::new();
        let mut ball = Ball::new(Vec2::new(640.0, 560.0), 15.0, Color::WHITE);
        ball.vel = Vec2::new(-350.0, 200.0);
        create_ball(&mut world, ball);

        move_ball(&mut world, &Time::new(1.0, 0.0), SCREEN, &mut events);

        let ball = crate::ball_state(&world).unwrap();
        assert_eq!(ball.vel.y, -200.0, "760 + 15 is past the bottom wall");
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_paddles_follow_their_own_keys() {
        let mut world = World::new();
        let config = Config::new();
        setup_paddles(&mut world, &config);
        let input = FrameInput {
            left_up: true,
            right_down: true,
            ..FrameInput::default()
        };

        move_paddles(&mut world, &Time::new(0.125, 0.0), SCREEN, &input);

        assert_eq!(paddle_state(&world, Side::Left).unwrap().pos.y, 210.0);
        assert_eq!(paddle_state(&world, Side::Right).unwrap().pos.y, 410.0);
    }

    #[test]
    fn test_both_keys_held_down_lands_last() {
        let mut world = World::new();
        let config = Config::new();
        setup_paddles(&mut world, &config);
        let input = FrameInput {
            left_up: true,
            left_down: true,
            ..FrameInput::default()
        };

        // Up clamps at 0, then down runs all the way to the floor
        move_paddles(&mut world, &Time::new(1.0, 0.0), SCREEN, &input);

        let left = paddle_state(&world, Side::Left).unwrap();
        assert_eq!(left.pos.y, 620.0);
    }

    #[test]
    fn test_no_keys_no_motion() {
        let mut world = World::new();
        let config = Config::new();
        setup_paddles(&mut world, &config);

        move_paddles(&mut world, &Time::new(1.0, 0.0), SCREEN, &FrameInput::default());

        for side in Side::BOTH {
            assert_eq!(paddle_state(&world, side).unwrap().pos.y, 310.0);
        }
    }
}
