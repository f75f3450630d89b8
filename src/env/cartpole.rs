//! CartPole environment
//!
//! A classic reinforcement learning benchmark where a pole is balanced on a
//! cart. The goal is to prevent the pole from falling over by applying forces
//! to the cart.
//!
//! # Physics
//!
//! The cart-pole system follows these dynamics:
//! - State: [x, x_dot, theta, theta_dot] (cart position, cart velocity, pole
//!   angle, pole angular velocity)
//! - Actions: 0 (push left) or 1 (push right)
//! - Reward: +1 for every step, including the one that ends the episode
//! - Termination: Pole angle > 12° or cart position > 2.4
//!
//! Episode length limits (200 steps for `CartPole-v0`, 500 for
//! `CartPole-v1`) are applied by the registry through
//! [`TimeLimit`](crate::env::TimeLimit), not by the environment itself.

use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    env::{Environment, StepInfo, StepResult, check_action},
    render::{self, Frame, RenderMode},
    spaces::{BoxSpace, Discrete},
};

/// CartPole environment
///
/// A pole is attached to a cart moving along a frictionless track.
/// The goal is to balance the pole by applying forces to the cart.
#[derive(Debug)]
pub struct CartPole {
    // State variables
    x: f32,         // Cart position
    x_dot: f32,     // Cart velocity
    theta: f32,     // Pole angle (radians)
    theta_dot: f32, // Pole angular velocity

    // Steps taken since the episode terminated, None while it is running
    steps_beyond_terminated: Option<usize>,

    rng: StdRng,

    // Physics constants
    gravity: f32,
    mass_cart: f32,
    mass_pole: f32,
    total_mass: f32,
    length: f32,           // Half-length of pole
    pole_mass_length: f32, // pole_mass * length
    force_mag: f32,
    tau: f32, // Time step

    // Thresholds
    theta_threshold: f32,
    x_threshold: f32,
}

impl CartPole {
    /// Create a new CartPole environment with default parameters
    ///
    /// - gravity = 9.8 m/s²
    /// - cart mass = 1.0 kg
    /// - pole mass = 0.1 kg
    /// - pole half-length = 0.5 m
    /// - force magnitude = 10.0 N
    /// - timestep = 0.02 s
    pub fn new() -> Self {
        let gravity = 9.8;
        let mass_cart = 1.0;
        let mass_pole = 0.1;
        let total_mass = mass_cart + mass_pole;
        let length = 0.5;
        let pole_mass_length = mass_pole * length;
        let force_mag = 10.0;
        let tau = 0.02;
        let theta_threshold = 12.0 * 2.0 * std::f32::consts::PI / 360.0; // ~0.2094 radians
        let x_threshold = 2.4;

        Self {
            x: 0.0,
            x_dot: 0.0,
            theta: 0.0,
            theta_dot: 0.0,
            steps_beyond_terminated: None,
            rng: StdRng::from_entropy(),
            gravity,
            mass_cart,
            mass_pole,
            total_mass,
            length,
            pole_mass_length,
            force_mag,
            tau,
            theta_threshold,
            x_threshold,
        }
    }

    /// Create an environment whose resets are reproducible
    pub fn with_seed(seed: u64) -> Self {
        let mut env = Self::new();
        env.seed(seed);
        env
    }

    /// Current state [x, x_dot, theta, theta_dot]
    pub fn state(&self) -> [f32; 4] {
        [self.x, self.x_dot, self.theta, self.theta_dot]
    }

    /// Reset state to random initial conditions
    ///
    /// All state variables are initialized with small random perturbations
    /// around equilibrium (uniform distribution in [-0.05, 0.05])
    fn reset_state(&mut self) {
        self.x = self.rng.gen_range(-0.05..0.05);
        self.x_dot = self.rng.gen_range(-0.05..0.05);
        self.theta = self.rng.gen_range(-0.05..0.05);
        self.theta_dot = self.rng.gen_range(-0.05..0.05);
    }

    /// Perform one physics simulation step using Euler integration
    ///
    /// ```text
    /// temp = (force + pole_mass_length * theta_dot² * sin(theta)) / total_mass
    /// theta_acc = (g * sin(theta) - cos(theta) * temp) /
    ///             (length * (4/3 - mass_pole * cos²(theta) / total_mass))
    /// x_acc = temp - pole_mass_length * theta_acc * cos(theta) / total_mass
    /// ```
    fn physics_step(&mut self, action: i64) {
        // 0 = push left, 1 = push right
        let force = if action == 1 {
            self.force_mag
        } else {
            -self.force_mag
        };

        let cos_theta = self.theta.cos();
        let sin_theta = self.theta.sin();

        let temp = (force + self.pole_mass_length * self.theta_dot * self.theta_dot * sin_theta)
            / self.total_mass;
        let theta_acc = (self.gravity * sin_theta - cos_theta * temp)
            / (self.length
                * (4.0 / 3.0 - self.mass_pole * cos_theta * cos_theta / self.total_mass));
        let x_acc = temp - self.pole_mass_length * theta_acc * cos_theta / self.total_mass;

        // Euler integration
        self.x += self.tau * self.x_dot;
        self.x_dot += self.tau * x_acc;
        self.theta += self.tau * self.theta_dot;
        self.theta_dot += self.tau * theta_acc;
    }

    /// Cart left the track or the pole fell past the angle threshold
    fn is_terminated(&self) -> bool {
        self.x < -self.x_threshold
            || self.x > self.x_threshold
            || self.theta < -self.theta_threshold
            || self.theta > self.theta_threshold
    }

    fn get_observation(&self) -> Vec<f32> {
        self.state().to_vec()
    }
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for CartPole {
    fn reset(&mut self) -> Result<Vec<f32>> {
        self.reset_state();
        self.steps_beyond_terminated = None;
        Ok(self.get_observation())
    }

    fn step(&mut self, action: i64) -> Result<StepResult> {
        check_action(&self.action_space(), action)?;

        self.physics_step(action);
        let terminated = self.is_terminated();

        let reward = match self.steps_beyond_terminated {
            None if !terminated => 1.0,
            None => {
                // Pole just fell
                self.steps_beyond_terminated = Some(0);
                1.0
            }
            Some(ref mut beyond) => {
                if *beyond == 0 {
                    tracing::warn!(
                        "step() called after the episode terminated; call reset() first"
                    );
                }
                *beyond += 1;
                0.0
            }
        };

        Ok(StepResult {
            observation: self.get_observation(),
            reward,
            terminated,
            truncated: false,
            info: StepInfo::default(),
        })
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(2)
    }

    fn observation_space(&self) -> BoxSpace {
        BoxSpace::symmetric(vec![
            self.x_threshold * 2.0,
            f32::MAX,
            self.theta_threshold * 2.0,
            f32::MAX,
        ])
        .unwrap_or_else(|_| unreachable!("symmetric bounds are always ordered"))
    }

    fn render(&self, mode: RenderMode) -> Result<Option<Frame>> {
        let world = self.x_threshold * 2.0;
        let col = render::column(self.x, -world, world);
        let pole = if self.theta > 0.05 {
            '/'
        } else if self.theta < -0.05 {
            '\\'
        } else {
            '|'
        };
        let header = format!("{}{}", " ".repeat(col), pole);

        Ok(Some(render::present(render::track(col, 'C', None, &header), mode)))
    }

    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cartpole_init() {
        let env = CartPole::new();
        assert_eq!(env.gravity, 9.8);
        assert_eq!(env.mass_cart, 1.0);
        assert_eq!(env.mass_pole, 0.1);
        assert_eq!(env.state(), [0.0; 4]);
    }

    #[test]
    fn test_cartpole_reset() {
        let mut env = CartPole::new();
        let obs = env.reset().unwrap();

        assert_eq!(obs.len(), 4, "Observation should have 4 elements");

        // Check that initial state is small (close to equilibrium)
        for &val in &obs {
            assert!(val.abs() <= 0.05, "Initial state should be small perturbation, got {}", val);
        }
    }

    #[test]
    fn test_cartpole_seeded_reset_is_reproducible() {
        let mut a = CartPole::with_seed(123);
        let mut b = CartPole::with_seed(123);

        assert_eq!(a.reset().unwrap(), b.reset().unwrap());
        for action in [0, 1, 1, 0, 1] {
            assert_eq!(a.step(action).unwrap().observation, b.step(action).unwrap().observation);
        }
    }

    #[test]
    fn test_cartpole_step() {
        let mut env = CartPole::new();
        env.reset().unwrap();

        let result = env.step(1).unwrap();

        assert_eq!(result.observation.len(), 4, "Observation should have 4 elements");
        assert_eq!(result.reward, 1.0, "Every live step should be rewarded");
        assert!(!result.truncated, "CartPole never truncates on its own");
    }

    #[test]
    fn test_cartpole_termination() {
        let mut env = CartPole::new();
        env.reset().unwrap();

        // Manually set state to exceed position threshold
        env.x = 3.0;

        let result = env.step(0).unwrap();
        assert!(
            result.terminated,
            "Episode should terminate when cart exceeds position threshold"
        );
        assert_eq!(result.reward, 1.0, "Terminating step is still rewarded");

        // Reset and test angle threshold
        env.reset().unwrap();
        env.theta = 0.5;

        let result = env.step(0).unwrap();
        assert!(result.terminated, "Episode should terminate when pole exceeds angle threshold");
    }

    #[test]
    fn test_cartpole_steps_beyond_termination() {
        let mut env = CartPole::new();
        env.reset().unwrap();
        env.theta = 0.5;

        assert_eq!(env.step(0).unwrap().reward, 1.0);
        for _ in 0..3 {
            let result = env.step(0).unwrap();
            assert!(result.terminated);
            assert_eq!(result.reward, 0.0, "No reward after the episode is over");
        }

        env.reset().unwrap();
        assert_eq!(env.step(0).unwrap().reward, 1.0, "Reset clears the terminated state");
    }

    #[test]
    fn test_cartpole_invalid_action() {
        let mut env = CartPole::new();
        env.reset().unwrap();

        assert!(env.step(2).is_err());
        assert!(env.step(-1).is_err());
    }

    #[test]
    fn test_cartpole_actions_move_cart() {
        let mut left = CartPole::with_seed(5);
        let mut right = CartPole::with_seed(5);
        left.reset().unwrap();
        right.reset().unwrap();

        for _ in 0..5 {
            left.step(0).unwrap();
            right.step(1).unwrap();
        }

        assert!(left.x_dot < right.x_dot, "Pushing left should leave the cart slower");
    }

    #[test]
    fn test_cartpole_observation_space() {
        let env = CartPole::new();
        let obs_space = env.observation_space();

        assert_eq!(obs_space.shape(), vec![4]);
        assert!((obs_space.high()[0] - 4.8).abs() < 1e-6);
        assert_eq!(obs_space.high()[1], f32::MAX);
        assert!((obs_space.high()[2] - 0.418_879).abs() < 1e-5);
        assert_eq!(obs_space.low()[3], -f32::MAX);
    }

    #[test]
    fn test_cartpole_action_space() {
        let env = CartPole::new();
        assert_eq!(env.action_space(), Discrete::new(2));
    }

    #[test]
    fn test_cartpole_observations_stay_in_space() {
        let mut env = CartPole::with_seed(9);
        let space = env.observation_space();
        let mut obs = env.reset().unwrap();

        for step in 0..200 {
            assert!(space.contains(&obs), "Observation {:?} left the space", obs);
            let result = env.step(step % 2).unwrap();
            obs = result.observation;
            if result.terminated {
                break;
            }
        }
    }

    #[test]
    fn test_cartpole_render() {
        let mut env = CartPole::new();
        env.reset().unwrap();

        let frame = env.render(RenderMode::Ansi).unwrap().unwrap();
        let text = frame.as_text();
        assert!(text.contains('C'));
        assert_eq!(text.lines().count(), 2);
    }
}
