//! Episode length limit wrapper

use anyhow::Result;

use crate::{
    env::{Environment, StepResult},
    error::GymError,
    render::{Frame, RenderMode},
    spaces::{BoxSpace, Discrete},
};

/// Truncates episodes after a fixed number of steps
///
/// The registry wraps every environment whose spec declares
/// `max_episode_steps`. The wrapper also enforces that `reset` is called
/// before the first `step`.
#[derive(Debug)]
pub struct TimeLimit<E> {
    env: E,
    max_episode_steps: usize,
    elapsed_steps: Option<usize>,
}

impl<E: Environment> TimeLimit<E> {
    /// Wrap `env`, truncating after `max_episode_steps` steps
    pub fn new(env: E, max_episode_steps: usize) -> Self {
        Self { env, max_episode_steps, elapsed_steps: None }
    }

    /// Step limit per episode
    pub fn max_episode_steps(&self) -> usize {
        self.max_episode_steps
    }

    /// Steps taken since the last reset, `None` before the first reset
    pub fn elapsed_steps(&self) -> Option<usize> {
        self.elapsed_steps
    }

    /// Borrow the wrapped environment
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Unwrap into the inner environment
    pub fn into_inner(self) -> E {
        self.env
    }
}

impl<E: Environment> Environment for TimeLimit<E> {
    fn reset(&mut self) -> Result<Vec<f32>> {
        self.elapsed_steps = Some(0);
        self.env.reset()
    }

    fn step(&mut self, action: i64) -> Result<StepResult> {
        let elapsed = self.elapsed_steps.ok_or(GymError::ResetNeeded)?;

        let mut result = self.env.step(action)?;
        let elapsed = elapsed + 1;
        self.elapsed_steps = Some(elapsed);

        if elapsed >= self.max_episode_steps {
            result.truncated = true;
        }
        result.info.elapsed_steps = Some(elapsed);

        Ok(result)
    }

    fn action_space(&self) -> Discrete {
        self.env.action_space()
    }

    fn observation_space(&self) -> BoxSpace {
        self.env.observation_space()
    }

    fn render(&self, mode: RenderMode) -> Result<Option<Frame>> {
        self.env.render(mode)
    }

    fn seed(&mut self, seed: u64) {
        self.env.seed(seed)
    }

    fn close(&mut self) {
        self.env.close()
    }
}
