//! Action and observation space descriptors
//!
//! Every environment in this crate acts in a [`Discrete`] space and observes
//! through a [`BoxSpace`]. Both support `sample` and `contains`, and print in
//! the familiar `Discrete(2)` / `Box(4,)` notation.

mod box_space;
mod discrete;

pub use box_space::BoxSpace;
pub use discrete::Discrete;
