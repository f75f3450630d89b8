//! # gym-demos
//!
//! Runs the guided demo routines from the command line:
//!
//! ```text
//! gym-demos random-rollout --env MountainCar-v0 --iterations 500
//! gym-demos episodes --episodes 20 --max-steps 100
//! gym-demos spaces
//! gym-demos discrete --n 8
//! gym-demos registry
//! gym-demos --seed 7 --no-render all
//! ```
//!
//! Routine output goes to stdout, logs to stderr. `RUST_LOG` takes precedence
//! over `--log-level`.

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use classic_gym::demos::{self, Demo, DemoConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gym-demos", version, about = "Guided tour of the classic-control environments")]
struct Cli {
    /// JSON file with demo settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for environments and action sampling
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Skip rendering frames
    #[arg(long, global = true)]
    no_render: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render and step a random policy for a fixed number of iterations
    RandomRollout {
        /// Environment id
        #[arg(long)]
        env: Option<String>,
        /// Number of render/step iterations
        #[arg(long)]
        iterations: Option<usize>,
    },
    /// Run capped episodes and report when each ends
    Episodes {
        /// Environment id
        #[arg(long)]
        env: Option<String>,
        /// Number of episodes
        #[arg(long)]
        episodes: Option<usize>,
        /// Step cap per episode
        #[arg(long)]
        max_steps: Option<usize>,
    },
    /// Print an environment's action and observation spaces
    Spaces {
        /// Environment id
        #[arg(long)]
        env: Option<String>,
    },
    /// Sample a discrete space and check membership
    Discrete {
        /// Size of the space
        #[arg(long)]
        n: Option<usize>,
    },
    /// List every registered environment
    Registry,
    /// Run every routine in order
    All,
}

impl Cli {
    /// Defaults, then the config file, then command line flags
    fn demo_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load_json(path)?,
            None => DemoConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.no_render {
            config.render = false;
        }

        match &self.command {
            Command::RandomRollout { env, iterations } => {
                if let Some(env) = env {
                    config.rollout_env = env.clone();
                }
                if let Some(iterations) = iterations {
                    config.rollout_iterations = *iterations;
                }
            }
            Command::Episodes { env, episodes, max_steps } => {
                if let Some(env) = env {
                    config.episode_env = env.clone();
                }
                if let Some(episodes) = episodes {
                    config.episodes = *episodes;
                }
                if let Some(max_steps) = max_steps {
                    config.max_episode_steps = *max_steps;
                }
            }
            Command::Spaces { env: Some(env) } => config.inspect_env = env.clone(),
            Command::Discrete { n: Some(n) } => config.discrete_n = *n,
            _ => {}
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = cli.demo_config()?;
    tracing::debug!("Demo config: {:?}", config);

    let mut out = io::stdout().lock();
    match cli.command {
        Command::RandomRollout { .. } => Demo::RandomRollout.run(&config, &mut out),
        Command::Episodes { .. } => Demo::Episodes.run(&config, &mut out),
        Command::Spaces { .. } => Demo::Spaces.run(&config, &mut out),
        Command::Discrete { .. } => Demo::Discrete.run(&config, &mut out),
        Command::Registry => Demo::Registry.run(&config, &mut out),
        Command::All => demos::run_all(&config, &mut out),
    }
}
