//! Guided tour of the environment library
//!
//! Five independent routines, each owning its environment for its own
//! duration:
//!
//! - [`random_rollout`]: render and step a random policy for a fixed number
//!   of iterations
//! - [`episodic_rollout`]: run capped episodes, reporting when each ends
//! - [`inspect_spaces`]: print the action and observation spaces
//! - [`discrete_space_check`]: sample a discrete space and check membership
//! - [`list_registry`]: print every registered environment
//!
//! User-facing output goes to the `out` writer; progress is logged through
//! `tracing`.

use std::io::Write;

use anyhow::Result;

use crate::{
    env::Environment,
    error::GymError,
    registry,
    render::RenderMode,
    spaces::{BoxSpace, Discrete},
};

pub mod config;

pub use config::DemoConfig;

/// The available demo routines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// Random rollout with rendering
    RandomRollout,
    /// Capped episodes with termination reporting
    Episodes,
    /// Space inspection
    Spaces,
    /// Discrete space sampling check
    Discrete,
    /// Registry listing
    Registry,
}

impl Demo {
    /// Every routine, in tour order
    pub const ALL: [Demo; 5] =
        [Demo::RandomRollout, Demo::Episodes, Demo::Spaces, Demo::Discrete, Demo::Registry];

    /// Run this routine, discarding its summary
    pub fn run<W: Write>(self, config: &DemoConfig, out: &mut W) -> Result<()> {
        match self {
            Demo::RandomRollout => random_rollout(config, out).map(|_| ()),
            Demo::Episodes => episodic_rollout(config, out).map(|_| ()),
            Demo::Spaces => inspect_spaces(config, out).map(|_| ()),
            Demo::Discrete => discrete_space_check(config, out).map(|_| ()),
            Demo::Registry => list_registry(out).map(|_| ()),
        }
    }
}

/// Outcome of [`random_rollout`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolloutSummary {
    /// Steps submitted to the environment
    pub steps: usize,
    /// Frames rendered
    pub frames: usize,
    /// Times the environment reported the end of an episode
    pub episodes_finished: usize,
}

/// Outcome of [`episodic_rollout`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeSummary {
    /// Steps taken in each episode
    pub lengths: Vec<usize>,
    /// Whether each episode ended before the step cap
    pub finished: Vec<bool>,
}

/// Outcome of [`inspect_spaces`]
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceReport {
    /// Action space of the inspected environment
    pub action_space: Discrete,
    /// Observation space of the inspected environment
    pub observation_space: BoxSpace,
}

fn make_env(id: &str, config: &DemoConfig) -> Result<Box<dyn Environment>> {
    let mut env = registry::make(id)?;
    if let Some(seed) = config.seed {
        env.seed(seed);
    }
    Ok(env)
}

/// Reset once, then render and take random actions for a fixed number of
/// iterations
///
/// Results are discarded and the environment is never reset again, so once
/// an episode ends the remaining steps run past it.
pub fn random_rollout<W: Write>(config: &DemoConfig, out: &mut W) -> Result<RolloutSummary> {
    config.validate()?;
    let mut env = make_env(&config.rollout_env, config)?;
    let mut rng = config.rng();
    let action_space = env.action_space();

    env.reset()?;

    let mut summary = RolloutSummary::default();
    let mut was_done = false;
    for _ in 0..config.rollout_iterations {
        if config.render && env.render(RenderMode::Human)?.is_some() {
            summary.frames += 1;
        }

        let result = env.step(action_space.sample(&mut rng))?;
        summary.steps += 1;

        if result.done() && !was_done {
            summary.episodes_finished += 1;
        }
        was_done = result.done();
    }

    env.close();

    writeln!(
        out,
        "{}: {} random steps, {} frames rendered",
        config.rollout_env, summary.steps, summary.frames
    )?;
    tracing::info!(
        "Random rollout on {} finished: {} steps, {} episode(s) ended",
        config.rollout_env,
        summary.steps,
        summary.episodes_finished
    );

    Ok(summary)
}

/// Run a fixed number of episodes with random actions, stopping each at the
/// step cap or when the environment reports the episode is over
pub fn episodic_rollout<W: Write>(config: &DemoConfig, out: &mut W) -> Result<EpisodeSummary> {
    config.validate()?;
    let mut env = make_env(&config.episode_env, config)?;
    let mut rng = config.rng();
    let action_space = env.action_space();

    let mut summary = EpisodeSummary::default();
    for episode in 0..config.episodes {
        let mut observation = env.reset()?;
        let mut length = 0;
        let mut finished = false;

        for t in 0..config.max_episode_steps {
            if config.render {
                env.render(RenderMode::Human)?;
            }
            writeln!(out, "{:?}", observation)?;

            let action = action_space.sample(&mut rng);
            let result = env.step(action)?;
            observation = result.observation;
            length = t + 1;

            if result.terminated || result.truncated {
                writeln!(out, "Episode finished after {} timesteps", t + 1)?;
                finished = true;
                break;
            }
        }

        tracing::debug!("Episode {} ran {} steps (finished: {})", episode, length, finished);
        summary.lengths.push(length);
        summary.finished.push(finished);
    }

    env.close();
    Ok(summary)
}

/// Print the action space, the observation space and its bounds
pub fn inspect_spaces<W: Write>(config: &DemoConfig, out: &mut W) -> Result<SpaceReport> {
    let mut env = registry::make(&config.inspect_env)?;

    let report = SpaceReport {
        action_space: env.action_space(),
        observation_space: env.observation_space(),
    };

    writeln!(out, "{}", report.action_space)?;
    writeln!(out, "{}", report.observation_space)?;
    writeln!(out, "{:?}", report.observation_space.low())?;
    writeln!(out, "{:?}", report.observation_space.high())?;

    env.close();
    Ok(report)
}

/// Sample a discrete space and check the sample is a member and the space
/// has the configured size
///
/// Returns the sampled value.
pub fn discrete_space_check<W: Write>(config: &DemoConfig, out: &mut W) -> Result<i64> {
    let space = Discrete::try_new(config.discrete_n)?;
    let x = space.sample(&mut config.rng());

    if !space.contains(x) {
        return Err(GymError::AssertionFailed(format!("{} does not contain {}", space, x)).into());
    }
    if space.n() != config.discrete_n {
        return Err(GymError::AssertionFailed(format!(
            "{} reports n = {}, expected {}",
            space,
            space.n(),
            config.discrete_n
        ))
        .into());
    }

    writeln!(out, "{} sampled {}", space, x)?;
    Ok(x)
}

/// Print every environment in the global registry and return their ids
pub fn list_registry<W: Write>(out: &mut W) -> Result<Vec<String>> {
    let registry = registry::registry();
    for spec in registry.all() {
        writeln!(out, "{}", spec)?;
    }
    Ok(registry.ids())
}

/// Run every routine in order
pub fn run_all<W: Write>(config: &DemoConfig, out: &mut W) -> Result<()> {
    for demo in Demo::ALL {
        tracing::info!("Running {:?}", demo);
        demo.run(config, out)?;
    }
    Ok(())
}
