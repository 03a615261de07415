//! Adapter exposing a dictionary-observation environment to a distributed trainer.
//!
//! [`RllibEnv`] wraps an [`Env`](crate::Env) whose observation is a
//! [`DictObs`](crate::DictObs) and restricts every observation it emits to the
//! configured keys, sorted lexicographically. Trainers batching observations
//! from many workers rely on this fixed layout.
mod base;
mod config;
pub use base::RllibEnv;
pub use config::{RllibEnvConfig, DEFAULT_OBSERVATION_KEYS};
