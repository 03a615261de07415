//! A wrapper of [MiniHack](https://github.com/facebookresearch/minihack) and
//! [NLE](https://github.com/facebookresearch/nle) environments on Python.
//!
//! [`PyNleEnv`] is a wrapper based on [`PyO3`](https://github.com/PyO3/pyo3).
//! The environment is created by a factory function in Python, by default
//! `minihack.agent.common.envs.tasks.create_env(flags)`, where `flags` is given
//! in [`PyNleEnvConfig`]. Combined with [`RllibEnv`], it provides observations
//! restricted to a fixed, sorted set of keys:
//!
//! ```no_run
//! use minihack_core::{Env as _, ResetOptions, RllibEnv, RllibEnvConfig};
//! use minihack_py_env::{FlagsFormat, PyNleEnv, PyNleEnvConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let flags = serde_yaml::from_str(
//!     "env: MiniHack-Room-5x5-v0
//! character: mon-hum-neu-mal
//! obs_keys: glyphs,chars,colors,specials,blstats,message
//! penalty_step: -0.001
//! penalty_time: 0.0
//! fn_penalty_step: constant
//! max_num_steps: 100
//! save_tty: false
//! state_counter: none
//! seedspath: ''",
//! )?;
//! // The default factory reads flags as attributes of an OmegaConf object.
//! let config = RllibEnvConfig::new(
//!     PyNleEnvConfig::default()
//!         .flags(flags)
//!         .flags_format(FlagsFormat::Omegaconf),
//! );
//! let mut env = RllibEnv::<PyNleEnv>::build(&config)?;
//! let (obs, _info) = env.reset(Some(42), &ResetOptions::default())?;
//! assert_eq!(obs.keys().collect::<Vec<_>>(), vec!["blstats", "glyphs"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Observation
//!
//! Observation is created in Python as a dict of numpy arrays and converted to
//! [`DictObs`]. Arrays keep their dtypes (`glyphs` is `int16`, `blstats` is
//! `int64` in NLE) and their shapes. The order of the keys is that of the
//! Python dict.
//!
//! ## Action
//!
//! Action is a [`DiscreteAct`] and passed to Python as an `int`.
//!
//! ## Calling convention
//!
//! Versions of MiniHack and NLE differ in how `reset` and `step` are called and
//! what they return. [`GymApi`] in the configuration fixes the convention.
//!
//! [`RllibEnv`]: minihack_core::RllibEnv
//! [`DictObs`]: minihack_core::DictObs
//! [`DiscreteAct`]: minihack_core::DiscreteAct
mod base;
mod config;
pub mod util;
pub use base::{GymInfo, PyNleEnv};
pub use config::{FlagsFormat, GymApi, PyNleEnvConfig};
