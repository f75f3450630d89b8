//! Environment traits and implementations
//!
//! This module defines the core environment interface and the built-in
//! classic-control environments.

use anyhow::Result;

use crate::{
    error::GymError,
    render::{Frame, RenderMode},
    spaces::{BoxSpace, Discrete},
};

/// Core trait for RL environments
///
/// Observations are flat `f32` vectors inside [`Environment::observation_space`]
/// and actions are indices into [`Environment::action_space`]. The trait is
/// object safe; the registry hands environments out as
/// `Box<dyn Environment>`.
pub trait Environment {
    /// Reset the environment and return initial observation
    fn reset(&mut self) -> Result<Vec<f32>>;

    /// Step the environment with an action
    fn step(&mut self, action: i64) -> Result<StepResult>;

    /// Legal actions
    fn action_space(&self) -> Discrete;

    /// Bounds of the observations
    fn observation_space(&self) -> BoxSpace;

    /// Draw the current state
    fn render(&self, mode: RenderMode) -> Result<Option<Frame>>;

    /// Reseed the environment's random number generator
    ///
    /// Takes effect on the next `reset`.
    fn seed(&mut self, seed: u64);

    /// Release resources held by the environment
    fn close(&mut self) {}
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn reset(&mut self) -> Result<Vec<f32>> {
        (**self).reset()
    }

    fn step(&mut self, action: i64) -> Result<StepResult> {
        (**self).step(action)
    }

    fn action_space(&self) -> Discrete {
        (**self).action_space()
    }

    fn observation_space(&self) -> BoxSpace {
        (**self).observation_space()
    }

    fn render(&self, mode: RenderMode) -> Result<Option<Frame>> {
        (**self).render(mode)
    }

    fn seed(&mut self, seed: u64) {
        (**self).seed(seed)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Result of an environment step
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Next observation
    pub observation: Vec<f32>,

    /// Reward received
    pub reward: f32,

    /// Whether the episode terminated
    pub terminated: bool,

    /// Whether the episode was truncated
    pub truncated: bool,

    /// Additional info
    pub info: StepInfo,
}

impl StepResult {
    /// Episode is over, for either reason
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Additional step information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Steps taken since the last reset, filled in by [`TimeLimit`]
    pub elapsed_steps: Option<usize>,
}

/// Reject actions outside `space`
pub(crate) fn check_action(space: &Discrete, action: i64) -> Result<()> {
    if !space.contains(action) {
        return Err(GymError::InvalidAction { action, space: space.to_string() }.into());
    }
    Ok(())
}

pub mod cartpole;
pub mod mountain_car;
pub mod time_limit;

pub use cartpole::CartPole;
pub use mountain_car::MountainCar;
pub use time_limit::TimeLimit;
