//! # classic-gym
//!
//! Classic-control reinforcement learning environments behind a versioned
//! registry, with a guided set of demo routines.
//!
//! ## Quick Start
//!
//! ```rust
//! use classic_gym::prelude::*;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut env = make("CartPole-v0").unwrap();
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! env.reset().unwrap();
//! loop {
//!     let action = env.action_space().sample(&mut rng);
//!     let result = env.step(action).unwrap();
//!     if result.done() {
//!         break;
//!     }
//! }
//! env.close();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Demo routines and their configuration
pub mod demos;

/// Environment traits and implementations
pub mod env;

/// Typed errors
pub mod error;

/// Environment registry
pub mod registry;

/// Text rendering
pub mod render;

/// Action and observation spaces
pub mod spaces;

/// Prelude module for convenient imports
///
/// This module re-exports commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::{
        env::{CartPole, Environment, MountainCar, StepResult, TimeLimit},
        error::GymError,
        registry::{EnvSpec, Registry, make, registry},
        render::{Frame, RenderMode},
        spaces::{BoxSpace, Discrete},
    };
}

/// Current version of classic-gym
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
