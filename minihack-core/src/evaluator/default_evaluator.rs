//! Default implementation of the [`Evaluator`] trait.
//!
//! Runs a fixed number of episodes and computes the average return.
use super::Evaluator;
use crate::{record::Record, Env, Policy};
use anyhow::{bail, Result};
use log::{debug, info};

/// Runs `n_episodes` episodes and records the average return.
///
/// Episode `ix` is started with [`Env::reset_with_index`], so results are
/// reproducible for deterministic environments.
///
/// # Examples
///
/// ```ignore
/// let config = RllibEnvConfig::new(PyNleEnvConfig::default());
/// let mut evaluator = DefaultEvaluator::<RllibEnv<PyNleEnv>>::new(&config, 10)?;
///
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Average return: {}", record.get_scalar("Episode return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    n_episodes: usize,

    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f32;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut r_episode = 0f32;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act)?;
                r_episode += step.reward;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }

            debug!("Episode {}: return = {}", ix, r_episode);
            r_total += r_episode;
        }

        let r_mean = r_total / self.n_episodes as f32;
        info!("Evaluated {} episodes, average return = {}", self.n_episodes, r_mean);
        Ok(Record::from_scalar("Episode return", r_mean))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Builds the environment for evaluation.
    ///
    /// `n_episodes` must be positive.
    pub fn new(config: &E::Config, n_episodes: usize) -> Result<Self> {
        if n_episodes == 0 {
            bail!("DefaultEvaluator needs at least one episode");
        }
        Ok(Self {
            n_episodes,
            env: E::build(config)?,
        })
    }

    /// Closes the environment.
    pub fn close(mut self) -> Result<()> {
        self.env.close()
    }
}
