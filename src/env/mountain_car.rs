//! MountainCar environment
//!
//! An under-powered car sits in a valley and must reach the flag on top of
//! the right hill. The engine alone cannot climb the slope, so the car has to
//! rock back and forth to build momentum.
//!
//! - State: [position, velocity]
//! - Actions: 0 (push left), 1 (no push), 2 (push right)
//! - Reward: -1 every step
//! - Termination: position >= 0.5

use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    env::{Environment, StepInfo, StepResult, check_action},
    render::{self, Frame, RenderMode},
    spaces::{BoxSpace, Discrete},
};

const MIN_POSITION: f32 = -1.2;
const MAX_POSITION: f32 = 0.6;
const MAX_SPEED: f32 = 0.07;
const GOAL_POSITION: f32 = 0.5;
const GOAL_VELOCITY: f32 = 0.0;
const FORCE: f32 = 0.001;
const GRAVITY: f32 = 0.0025;

/// MountainCar environment with discrete actions
#[derive(Debug)]
pub struct MountainCar {
    position: f32,
    velocity: f32,
    rng: StdRng,
}

impl MountainCar {
    /// Create a new environment
    pub fn new() -> Self {
        Self { position: -0.5, velocity: 0.0, rng: StdRng::from_entropy() }
    }

    /// Create an environment whose resets are reproducible
    pub fn with_seed(seed: u64) -> Self {
        let mut env = Self::new();
        env.seed(seed);
        env
    }

    /// Current state [position, velocity]
    pub fn state(&self) -> [f32; 2] {
        [self.position, self.velocity]
    }

    /// Height of the hill at `position`
    pub fn height(position: f32) -> f32 {
        (3.0 * position).sin() * 0.45 + 0.55
    }

    fn is_terminated(&self) -> bool {
        self.position >= GOAL_POSITION && self.velocity >= GOAL_VELOCITY
    }
}

impl Default for MountainCar {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for MountainCar {
    fn reset(&mut self) -> Result<Vec<f32>> {
        self.position = self.rng.gen_range(-0.6..-0.4);
        self.velocity = 0.0;
        Ok(self.state().to_vec())
    }

    fn step(&mut self, action: i64) -> Result<StepResult> {
        check_action(&self.action_space(), action)?;

        self.velocity += (action - 1) as f32 * FORCE - (3.0 * self.position).cos() * GRAVITY;
        self.velocity = self.velocity.clamp(-MAX_SPEED, MAX_SPEED);
        self.position += self.velocity;
        self.position = self.position.clamp(MIN_POSITION, MAX_POSITION);

        // Inelastic collision with the left wall
        if self.position == MIN_POSITION && self.velocity < 0.0 {
            self.velocity = 0.0;
        }

        Ok(StepResult {
            observation: self.state().to_vec(),
            reward: -1.0,
            terminated: self.is_terminated(),
            truncated: false,
            info: StepInfo::default(),
        })
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(3)
    }

    fn observation_space(&self) -> BoxSpace {
        BoxSpace::new(vec![MIN_POSITION, -MAX_SPEED], vec![MAX_POSITION, MAX_SPEED])
            .unwrap_or_else(|_| unreachable!("mountain car bounds are ordered"))
    }

    fn render(&self, mode: RenderMode) -> Result<Option<Frame>> {
        let col = render::column(self.position, MIN_POSITION, MAX_POSITION);
        let flag = render::column(GOAL_POSITION, MIN_POSITION, MAX_POSITION);
        let header = format!(
            "position {:+.3}  velocity {:+.4}  height {:.3}",
            self.position,
            self.velocity,
            Self::height(self.position)
        );

        Ok(Some(render::present(render::track(col, 'o', Some(flag), &header), mode)))
    }

    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
