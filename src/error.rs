//! Typed errors raised by spaces, environments and the registry
//!
//! Operations return `anyhow::Result`; these variants are the failures callers
//! may want to match on after `downcast_ref::<GymError>()`.

use thiserror::Error;

/// Errors produced by the environment library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GymError {
    /// No environment with this name exists in the registry
    #[error("no registered env with id: {0}")]
    UnregisteredEnv(String),

    /// The name exists, but not at the requested version
    #[error("env {id} not found (valid versions include {valid:?})")]
    DeprecatedEnv {
        /// Requested id
        id: String,
        /// Registered ids sharing the same name
        valid: Vec<String>,
    },

    /// The id does not follow the `Name-vN` convention
    #[error("malformed env id: {0} (expected `Name-vN`)")]
    MalformedId(String),

    /// Registering the same id twice
    #[error("env id already registered: {0}")]
    AlreadyRegistered(String),

    /// Action outside the environment's action space
    #[error("invalid action {action} for action space {space}")]
    InvalidAction {
        /// Offending action
        action: i64,
        /// Display form of the action space
        space: String,
    },

    /// Space constructed with inconsistent parameters
    #[error("invalid space: {0}")]
    InvalidSpace(String),

    /// `step` called before the first `reset`
    #[error("cannot call step() before reset()")]
    ResetNeeded,

    /// A demo routine's sanity check did not hold
    #[error("assertion failed: {0}")]
    AssertionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GymError::UnregisteredEnv("Nope-v0".to_string());
        assert_eq!(err.to_string(), "no registered env with id: Nope-v0");

        let err = GymError::DeprecatedEnv {
            id: "CartPole-v9".to_string(),
            valid: vec!["CartPole-v0".to_string()],
        };
        assert!(err.to_string().contains("CartPole-v0"));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = GymError::ResetNeeded.into();
        assert_eq!(err.downcast_ref::<GymError>(), Some(&GymError::ResetNeeded));
    }
}
