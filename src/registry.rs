//! Environment registry
//!
//! Maps versioned ids such as `CartPole-v0` to constructors. A process-wide
//! registry pre-populated with the built-in environments is available via
//! [`registry`] and [`make`]; independent registries can be built with
//! [`Registry::new`] or [`Registry::with_builtins`].
//!
//! ```rust
//! use classic_gym::{env::Environment, registry};
//!
//! let mut env = registry::make("CartPole-v0").unwrap();
//! let obs = env.reset().unwrap();
//! assert_eq!(obs.len(), 4);
//! ```

use std::{collections::BTreeMap, fmt, sync::OnceLock};

use anyhow::Result;

use crate::{
    env::{CartPole, Environment, MountainCar, TimeLimit},
    error::GymError,
};

/// Constructor for a registered environment
pub type EntryPoint = fn() -> Box<dyn Environment>;

/// Registration record for one environment id
#[derive(Clone)]
pub struct EnvSpec {
    /// Versioned id, e.g. `CartPole-v1`
    pub id: String,

    /// Builds a fresh, unwrapped environment
    pub entry_point: EntryPoint,

    /// Episodes are truncated after this many steps
    pub max_episode_steps: Option<usize>,

    /// Average episode reward at which the task counts as solved
    pub reward_threshold: Option<f32>,
}

impl EnvSpec {
    /// Create a spec without step limit or reward threshold
    pub fn new(id: impl Into<String>, entry_point: EntryPoint) -> Self {
        Self { id: id.into(), entry_point, max_episode_steps: None, reward_threshold: None }
    }

    /// Set the episode step limit
    pub fn max_episode_steps(mut self, steps: usize) -> Self {
        self.max_episode_steps = Some(steps);
        self
    }

    /// Set the reward threshold
    pub fn reward_threshold(mut self, threshold: f32) -> Self {
        self.reward_threshold = Some(threshold);
        self
    }

    /// Instantiate the environment, applying the step limit if any
    pub fn make(&self) -> Box<dyn Environment> {
        let env = (self.entry_point)();
        match self.max_episode_steps {
            Some(steps) => Box::new(TimeLimit::new(env, steps)),
            None => env,
        }
    }
}

impl fmt::Debug for EnvSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSpec")
            .field("id", &self.id)
            .field("max_episode_steps", &self.max_episode_steps)
            .field("reward_threshold", &self.reward_threshold)
            .finish()
    }
}

impl fmt::Display for EnvSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnvSpec({})", self.id)
    }
}

/// Split a versioned id into its name and version
///
/// Ids look like `Name-vN`, optionally prefixed with `namespace/`. The name
/// may contain letters, digits, `_`, `-`, `.` and `:`.
pub fn parse_id(id: &str) -> Result<(&str, u32), GymError> {
    let malformed = || GymError::MalformedId(id.to_string());

    let (name, version) = id.rsplit_once("-v").ok_or_else(malformed)?;
    if version.is_empty() || !version.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    let version: u32 = version.parse().map_err(|_| malformed())?;

    let bare = name.rsplit_once('/').map_or(name, |(_, bare)| bare);
    let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':');
    if bare.is_empty() || !name.chars().all(|c| valid_char(c) || c == '/') {
        return Err(malformed());
    }

    Ok((name, version))
}

/// A table of environment specs keyed by id
#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: BTreeMap<String, EnvSpec>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in environments
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for spec in builtin_specs() {
            if let Err(e) = registry.register(spec) {
                unreachable!("built-in specs are unique and well formed: {}", e);
            }
        }
        registry
    }

    /// Add a spec, rejecting malformed or duplicate ids
    pub fn register(&mut self, spec: EnvSpec) -> Result<(), GymError> {
        parse_id(&spec.id)?;
        if self.specs.contains_key(&spec.id) {
            return Err(GymError::AlreadyRegistered(spec.id));
        }
        tracing::debug!("Registering env {}", spec.id);
        self.specs.insert(spec.id.clone(), spec);
        Ok(())
    }

    /// Look up the spec for `id`
    pub fn spec(&self, id: &str) -> Result<&EnvSpec, GymError> {
        if let Some(spec) = self.specs.get(id) {
            return Ok(spec);
        }

        let (name, _) = parse_id(id)?;
        let valid: Vec<String> = self
            .specs
            .keys()
            .filter(|key| parse_id(key).is_ok_and(|(other, _)| other == name))
            .cloned()
            .collect();

        if valid.is_empty() {
            Err(GymError::UnregisteredEnv(id.to_string()))
        } else {
            Err(GymError::DeprecatedEnv { id: id.to_string(), valid })
        }
    }

    /// Instantiate the environment registered as `id`
    pub fn make(&self, id: &str) -> Result<Box<dyn Environment>> {
        let spec = self.spec(id)?;
        tracing::info!("Making new env: {}", id);
        Ok(spec.make())
    }

    /// All specs, ordered by id
    pub fn all(&self) -> impl Iterator<Item = &EnvSpec> {
        self.specs.values()
    }

    /// All ids, sorted
    pub fn ids(&self) -> Vec<String> {
        self.specs.keys().cloned().collect()
    }

    /// Number of registered environments
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn builtin_specs() -> Vec<EnvSpec> {
    vec![
        EnvSpec::new("CartPole-v0", || Box::new(CartPole::new()))
            .max_episode_steps(200)
            .reward_threshold(195.0),
        EnvSpec::new("CartPole-v1", || Box::new(CartPole::new()))
            .max_episode_steps(500)
            .reward_threshold(475.0),
        EnvSpec::new("MountainCar-v0", || Box::new(MountainCar::new()))
            .max_episode_steps(200)
            .reward_threshold(-110.0),
    ]
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry of built-in environments
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::with_builtins)
}

/// Instantiate a built-in environment by id
pub fn make(id: &str) -> Result<Box<dyn Environment>> {
    registry().make(id)
}
