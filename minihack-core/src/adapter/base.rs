//! Adapter restricting observations to a sorted set of keys.
use super::RllibEnvConfig;
use crate::{error::EnvError, record::Record, DictObs, Env, ResetOptions, Step};
use anyhow::Result;
use log::{info, trace};

/// Wraps an environment with dictionary observations for a distributed trainer.
///
/// Every observation returned by [`reset`](Env::reset) and [`step`](Env::step)
/// has exactly the configured keys, in ascending lexicographic order. The
/// arrays are moved from the raw observation of the wrapped environment; all
/// other return values pass through unchanged.
///
/// The adapter owns the wrapped environment. After [`close`](Env::close), `reset`,
/// `step` and `render` fail with [`EnvError::Closed`].
pub struct RllibEnv<E: Env> {
    env: E,

    /// Sorted, without duplicates.
    observation_keys: Vec<String>,

    closed: bool,
}

impl<E> RllibEnv<E>
where
    E: Env<Obs = DictObs>,
{
    /// Keys of the observations, in the order they appear.
    pub fn observation_keys(&self) -> &[String] {
        &self.observation_keys
    }

    /// The wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Returns `true` after [`close`](Env::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn process_obs(&self, obs: DictObs) -> Result<DictObs> {
        Ok(obs.select(&self.observation_keys)?)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(EnvError::Closed.into());
        }
        Ok(())
    }
}

impl<E> Env for RllibEnv<E>
where
    E: Env<Obs = DictObs>,
{
    type Config = RllibEnvConfig<E::Config>;
    type Obs = DictObs;
    type Act = E::Act;
    type Info = E::Info;
    type Space = E::Space;
    type Render = E::Render;

    /// Builds the wrapped environment with `config.flags`.
    ///
    /// Errors of the wrapped environment are returned as they are.
    fn build(config: &Self::Config) -> Result<Self> {
        let observation_keys = config.sorted_observation_keys();
        let env = E::build(&config.flags)?;
        info!("Build RllibEnv, observation keys = {:?}", observation_keys);

        Ok(Self {
            env,
            observation_keys,
            closed: false,
        })
    }

    fn action_space(&self) -> &Self::Space {
        self.env.action_space()
    }

    fn observation_space(&self) -> &Self::Space {
        self.env.observation_space()
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: &ResetOptions,
    ) -> Result<(Self::Obs, Self::Info)> {
        trace!("RllibEnv::reset(seed = {:?})", seed);
        self.ensure_open()?;
        let (obs, info) = self.env.reset(seed, options)?;
        Ok((self.process_obs(obs)?, info))
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        trace!("RllibEnv::step()");
        self.ensure_open()?;
        let (step, record) = self.env.step(a)?;
        let Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        } = step;
        let obs = self.process_obs(obs)?;

        Ok((
            Step::new(obs, act, reward, is_terminated, is_truncated, info),
            record,
        ))
    }

    fn render(&mut self) -> Result<Self::Render> {
        self.ensure_open()?;
        self.env.render()
    }

    /// Closes the wrapped environment.
    ///
    /// Calling this method on a closed adapter does nothing. If the wrapped
    /// environment fails to close, the adapter stays open.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        info!("Close RllibEnv");
        self.env.close()?;
        self.closed = true;
        Ok(())
    }
}
