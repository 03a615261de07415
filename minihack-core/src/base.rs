//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::{Env, ResetOptions};
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
pub trait Obs: Clone + Debug {}

/// An action of an environment.
pub trait Act: Clone + Debug {}

/// A discrete action, an index into the action set of the environment.
///
/// NetHack-like environments take a single integer per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscreteAct(pub i64);

impl Act for DiscreteAct {}

impl From<i64> for DiscreteAct {
    fn from(a: i64) -> Self {
        Self(a)
    }
}
