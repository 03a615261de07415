//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::{
    collections::{btree_map::Iter, BTreeMap},
    fmt::Debug,
};

/// Optional arguments of [`Env::reset`].
///
/// The values are opaque to this crate and forwarded to the simulator as they are.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResetOptions(BTreeMap<String, Value>);

impl ResetOptions {
    /// Adds an option, replacing a previous value with the same key.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the value of an option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if no option is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the options in key order.
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.0.iter()
    }
}

/// Represents an environment, typically an MDP.
///
/// This is the single interface the [`RllibEnv`](crate::RllibEnv) adapter is written
/// against. Simulators whose native API differs, for example in the signature of
/// their reset method, are expected to conform to this trait in their own
/// implementation rather than being distinguished by the caller.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Description of the action and observation spaces.
    type Space: Debug;

    /// Output of [`Env::render`].
    type Render;

    /// Builds an environment.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// The space of valid actions.
    fn action_space(&self) -> &Self::Space;

    /// The space of valid observations.
    fn observation_space(&self) -> &Self::Space;

    /// Starts a new episode and returns the initial observation with auxiliary
    /// information.
    ///
    /// `seed == None` leaves seeding to the environment.
    fn reset(
        &mut self,
        seed: Option<u64>,
        options: &ResetOptions,
    ) -> Result<(Self::Obs, Self::Info)>;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Renders the current state of the environment.
    fn render(&mut self) -> Result<Self::Render>;

    /// Releases the resources of the environment.
    ///
    /// The environment must not be used after this method is called.
    fn close(&mut self) -> Result<()>;

    /// Resets the environment with a given index.
    ///
    /// The index is used as the random seed, which is useful in evaluation of a
    /// trained agent. See [`DefaultEvaluator`](crate::DefaultEvaluator).
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        let (obs, _) = self.reset(Some(ix as u64), &ResetOptions::default())?;
        Ok(obs)
    }
}
