#![warn(missing_docs)]
//! Core components for running MiniHack and NLE environments under a
//! distributed reinforcement learning trainer.
//!
//! The crate provides
//!
//! * the [`Env`] trait, the single capability interface every simulator implements,
//!   together with [`Obs`], [`Act`], [`Info`], [`Policy`] and [`Step`],
//! * [`DictObs`], the dictionary-valued observation of NetHack-like environments,
//! * [`RllibEnv`], an adapter which wraps any [`Env`] producing [`DictObs`] and
//!   restricts its observations to a fixed, sorted subset of keys,
//! * [`Evaluator`] for running a policy for a number of episodes,
//! * [`dummy::DummyEnv`], a small deterministic simulator used in tests.
//!
//! ```rust
//! use minihack_core::{
//!     dummy::{DummyEnv, DummyEnvConfig},
//!     DiscreteAct, Env as _, ResetOptions, RllibEnv, RllibEnvConfig,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = RllibEnvConfig::new(DummyEnvConfig::default())
//!     .observation_keys(vec!["glyphs", "blstats"]);
//! let mut env = RllibEnv::<DummyEnv>::build(&config)?;
//! let (obs, _info) = env.reset(Some(42), &ResetOptions::default())?;
//! assert_eq!(obs.keys().collect::<Vec<_>>(), vec!["blstats", "glyphs"]);
//!
//! let (step, _record) = env.step(&DiscreteAct(0))?;
//! let (_obs, _reward, _terminated, _truncated, _info) = step.into_tuple();
//! env.close()?;
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod record;
pub mod dummy;

mod base;
pub use base::{Act, DiscreteAct, Env, Info, Obs, Policy, ResetOptions, Step};

mod dict_obs;
pub use dict_obs::{Array, DictObs};

mod space;
pub use space::Space;

mod adapter;
pub use adapter::{RllibEnv, RllibEnvConfig, DEFAULT_OBSERVATION_KEYS};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
