//! The frame loop: one owner for the world and its resources.

use hecs::World;

use crate::error::Result;
use crate::platform::Platform;
use crate::systems::draw_frame;
use crate::{
    ball_state, create_ball, create_paddle, paddle_state, spawn_ball, spawn_paddle, step, Ball,
    Config, Events, GameRng, Paddle, Screen, Side, Time,
};

pub struct Game {
    world: World,
    time: Time,
    config: Config,
    events: Events,
    rng: GameRng,
}

impl Game {
    /// Set up both paddles and a served ball for the given screen
    pub fn new(config: Config, screen: Screen, mut rng: GameRng) -> Self {
        let mut world = World::new();
        for side in Side::BOTH {
            create_paddle(&mut world, spawn_paddle(side, screen, &config));
        }
        create_ball(&mut world, spawn_ball(screen, &config, &mut rng));

        Self {
            world,
            time: Time::default(),
            config,
            events: Events::new(),
            rng,
        }
    }

    /// Simulate and render one frame
    pub fn frame<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<()> {
        step(
            &mut self.world,
            &mut self.time,
            &*platform,
            &self.config,
            &mut self.events,
            &mut self.rng,
        );
        draw_frame(&self.world, platform, &self.config)
    }

    /// Run frames until the platform asks to close. Platform faults end the
    /// loop with an error.
    pub fn run<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<()> {
        tracing::info!(
            width = platform.screen_width(),
            height = platform.screen_height(),
            "game loop started"
        );
        while !platform.window_should_close() {
            self.frame(platform)?;
        }
        let (left, right) = self.scores();
        tracing::info!(player1 = left, player2 = right, elapsed = self.time.now, "game loop ended");
        Ok(())
    }

    pub fn ball(&self) -> Option<Ball> {
        ball_state(&self.world)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        paddle_state(&self.world, side)
    }

    /// (player 1, player 2)
    pub fn scores(&self) -> (u32, u32) {
        let score = |side| self.paddle(side).map_or(0, |p| p.score);
        (score(Side::Left), score(Side::Right))
    }

    /// Events raised by the most recent frame
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
