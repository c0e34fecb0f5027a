use hecs::World;

use crate::components::{Ball, Side};
use crate::geometry::Screen;
use crate::platform::{Key, Platform};
use crate::resources::{Events, GameRng};
use crate::Config;

/// Key state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub reset: bool,
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl FrameInput {
    pub fn up(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_up,
            Side::Right => self.right_up,
        }
    }

    pub fn down(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_down,
            Side::Right => self.right_down,
        }
    }
}

/// Sample the platform's keys. Paddle keys are level-triggered, reset is
/// edge-triggered.
pub fn read_input<P: Platform + ?Sized>(platform: &P) -> FrameInput {
    FrameInput {
        reset: platform.is_key_pressed(Key::Reset),
        left_up: platform.is_key_down(Side::Left.up_key()),
        left_down: platform.is_key_down(Side::Left.down_key()),
        right_up: platform.is_key_down(Side::Right.up_key()),
        right_down: platform.is_key_down(Side::Right.down_key()),
    }
}

/// Debug: re-serve the ball on demand, scores untouched
pub fn apply_debug_reset(
    world: &mut World,
    input: &FrameInput,
    screen: Screen,
    config: &Config,
    rng: &mut GameRng,
    events: &mut Events,
) {
    if !input.reset {
        return;
    }
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.reset(screen, config, rng);
        events.ball_reset = true;
        tracing::debug!(vel = ?ball.vel, "debug reset");
    }
}
