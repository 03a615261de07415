//! Environment step.
use super::Env;

/// Additional information to `Obs` and `Act`.
pub trait Info {}

impl Info for () {}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits [`Step`] object at every interaction steps.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Reward.
    ///
    /// Simulators giving `float64` rewards, like NLE, are narrowed to `f32`.
    pub reward: f32,

    /// Flag denoting if the episode reached a natural end.
    pub is_terminated: bool,

    /// Flag denoting if the episode was cut short by an external limit.
    pub is_truncated: bool,

    /// Information defined by the environment.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }

    /// Returns `(obs, reward, terminated, truncated, info)`.
    pub fn into_tuple(self) -> (E::Obs, f32, bool, bool, E::Info) {
        (
            self.obs,
            self.reward,
            self.is_terminated,
            self.is_truncated,
            self.info,
        )
    }
}
