//! Demo routine configuration
//!
//! Defaults reproduce the classic tutorial settings. A partial JSON file may
//! override any subset of fields; missing fields keep their defaults.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Parameters for the demo routines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Environment for the random rollout
    pub rollout_env: String,

    /// Render/step iterations in the random rollout
    pub rollout_iterations: usize,

    /// Environment for the episodic rollout
    pub episode_env: String,

    /// Number of episodes in the episodic rollout
    pub episodes: usize,

    /// Step cap per episode in the episodic rollout
    pub max_episode_steps: usize,

    /// Environment whose spaces are inspected
    pub inspect_env: String,

    /// Cardinality of the discrete space check
    pub discrete_n: usize,

    /// Render a frame before each step
    pub render: bool,

    /// Seed for environments and action sampling; entropy when unset
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rollout_env: "MountainCar-v0".to_string(),
            rollout_iterations: 500,
            episode_env: "CartPole-v0".to_string(),
            episodes: 20,
            max_episode_steps: 100,
            inspect_env: "CartPole-v0".to_string(),
            discrete_n: 8,
            render: true,
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.rollout_env.is_empty() || self.episode_env.is_empty() || self.inspect_env.is_empty()
        {
            return Err(anyhow!("environment ids must not be empty"));
        }
        if self.episodes == 0 {
            return Err(anyhow!("episodes must be positive"));
        }
        if self.max_episode_steps == 0 {
            return Err(anyhow!("max_episode_steps must be positive"));
        }
        if self.discrete_n == 0 {
            return Err(anyhow!("discrete_n must be positive"));
        }
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file =
            File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Random number generator for action sampling
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Set the random rollout environment
    pub fn rollout_env(mut self, id: impl Into<String>) -> Self {
        self.rollout_env = id.into();
        self
    }

    /// Set the number of random rollout iterations
    pub fn rollout_iterations(mut self, iterations: usize) -> Self {
        self.rollout_iterations = iterations;
        self
    }

    /// Set the episodic rollout environment
    pub fn episode_env(mut self, id: impl Into<String>) -> Self {
        self.episode_env = id.into();
        self
    }

    /// Set the number of episodes
    pub fn episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    /// Set the per-episode step cap
    pub fn max_episode_steps(mut self, steps: usize) -> Self {
        self.max_episode_steps = steps;
        self
    }

    /// Set the environment whose spaces are inspected
    pub fn inspect_env(mut self, id: impl Into<String>) -> Self {
        self.inspect_env = id.into();
        self
    }

    /// Set the discrete space size
    pub fn discrete_n(mut self, n: usize) -> Self {
        self.discrete_n = n;
        self
    }

    /// Enable or disable rendering
    pub fn render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Fix the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rollout_env, "MountainCar-v0");
        assert_eq!(config.rollout_iterations, 500);
        assert_eq!(config.episodes, 20);
        assert_eq!(config.max_episode_steps, 100);
        assert_eq!(config.discrete_n, 8);
    }

    #[test]
    fn test_config_validation() {
        assert!(DemoConfig::new().episodes(0).validate().is_err());
        assert!(DemoConfig::new().max_episode_steps(0).validate().is_err());
        assert!(DemoConfig::new().discrete_n(0).validate().is_err());
        assert!(DemoConfig::new().episode_env("").validate().is_err());

        // Zero rollout iterations is a no-op, not an error
        assert!(DemoConfig::new().rollout_iterations(0).validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DemoConfig::new().episodes(3).render(false).seed(7);

        assert_eq!(config.episodes, 3);
        assert!(!config.render);
        assert_eq!(config.seed, Some(7));

        // Other values should remain default
        assert_eq!(config.episode_env, "CartPole-v0");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: DemoConfig =
            serde_json::from_str(r#"{ "episodes": 2, "seed": 11 }"#).unwrap();

        assert_eq!(config.episodes, 2);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.rollout_iterations, 500);
        assert!(config.render);
    }

    #[test]
    fn test_json_file_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let config = DemoConfig::new().rollout_env("CartPole-v1").seed(3);

        config.save_json(file.path()).unwrap();
        assert_eq!(DemoConfig::load_json(file.path()).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DemoConfig::load_json("/nonexistent/demo.json").unwrap_err();
        assert!(err.to_string().contains("opening config"));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;

        let config = DemoConfig::new().seed(5);
        let a: u64 = config.rng().r#gen();
        let b: u64 = config.rng().r#gen();
        assert_eq!(a, b);
    }
}
