//! This module is used for tests.
//!
//! [`DummyEnv`] is a tiny NetHack-like room: the agent `@` walks towards the
//! staircase `>` with the eight compass directions. Its observations have the
//! same keys, dtypes and ranks as those of NLE (`blstats`, `glyphs`, `chars`,
//! `message`), so code consuming MiniHack observations can be tested without
//! a Python interpreter.
use crate::{
    error::EnvError,
    record::{Record, RecordValue},
    DictObs, DiscreteAct, Env, Info, ResetOptions, Space, Step,
};
use anyhow::{bail, Result};
use log::trace;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

const GLYPH_PLAYER: i16 = 333;
const GLYPH_WALL: i16 = 2360;
const GLYPH_FLOOR: i16 = 2378;
const GLYPH_STAIRS: i16 = 2383;

const N_BLSTATS: usize = 27;
const MESSAGE_LEN: usize = 256;

/// N, E, S, W, NE, SE, SW, NW, in the order of NLE's compass directions.
const MOVES: [(i64, i64); 8] = [
    (-1, 0),
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 1),
    (1, 1),
    (1, -1),
    (-1, -1),
];

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DummyEnvConfig {
    /// Number of rows of the map, including walls.
    pub rows: usize,

    /// Number of columns of the map, including walls.
    pub cols: usize,

    /// Episodes are truncated after this number of steps.
    pub max_episode_steps: usize,
}

impl Default for DummyEnvConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 8,
            max_episode_steps: 50,
        }
    }
}

/// Information of [`DummyEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct DummyInfo {
    /// Steps taken in the current episode.
    pub n_steps: usize,
}

impl Info for DummyInfo {}

/// Deterministic NetHack-like environment.
pub struct DummyEnv {
    config: DummyEnvConfig,
    action_space: Space,
    observation_space: Space,
    rng: fastrand::Rng,
    agent: (i64, i64),
    goal: (i64, i64),
    n_steps: usize,
    message: String,
    started: bool,
    closed: bool,
    last_reset_options: Option<ResetOptions>,
}

impl DummyEnv {
    /// Options given at the last call of [`Env::reset`].
    pub fn last_reset_options(&self) -> Option<&ResetOptions> {
        self.last_reset_options.as_ref()
    }

    /// Returns `true` after [`Env::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(EnvError::Closed.into());
        }
        Ok(())
    }

    fn random_interior_cell(&mut self) -> (i64, i64) {
        let r = self.rng.usize(1..self.config.rows - 1);
        let c = self.rng.usize(1..self.config.cols - 1);
        (r as i64, c as i64)
    }

    fn is_wall(&self, (r, c): (i64, i64)) -> bool {
        r <= 0
            || c <= 0
            || r >= self.config.rows as i64 - 1
            || c >= self.config.cols as i64 - 1
    }

    fn cell(&self, pos: (i64, i64)) -> (i16, u8) {
        if pos == self.agent {
            (GLYPH_PLAYER, b'@')
        } else if pos == self.goal {
            (GLYPH_STAIRS, b'>')
        } else if self.is_wall(pos) {
            let horizontal = pos.0 <= 0 || pos.0 >= self.config.rows as i64 - 1;
            (GLYPH_WALL, if horizontal { b'-' } else { b'|' })
        } else {
            (GLYPH_FLOOR, b'.')
        }
    }

    fn observe(&self) -> DictObs {
        let (rows, cols) = (self.config.rows, self.config.cols);
        let mut glyphs = Array2::<i16>::zeros((rows, cols));
        let mut chars = Array2::<u8>::zeros((rows, cols));
        for r in 0..rows {
            for c in 0..cols {
                let (glyph, ch) = self.cell((r as i64, c as i64));
                glyphs[[r, c]] = glyph;
                chars[[r, c]] = ch;
            }
        }

        // x, y, hp, max hp, depth, time and level number
        let mut blstats = Array1::<i64>::zeros(N_BLSTATS);
        blstats[0] = self.agent.1;
        blstats[1] = self.agent.0;
        blstats[10] = 14;
        blstats[11] = 14;
        blstats[12] = 1;
        blstats[20] = self.n_steps as i64;
        blstats[24] = 1;

        let mut message = Array1::<u8>::zeros(MESSAGE_LEN);
        for (i, b) in self.message.bytes().take(MESSAGE_LEN).enumerate() {
            message[i] = b;
        }

        let mut obs = DictObs::new();
        obs.insert("glyphs", glyphs.into_dyn());
        obs.insert("chars", chars.into_dyn());
        obs.insert("message", message.into_dyn());
        obs.insert("blstats", blstats.into_dyn());
        obs
    }
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Obs = DictObs;
    type Act = DiscreteAct;
    type Info = DummyInfo;
    type Space = Space;
    type Render = String;

    fn build(config: &Self::Config) -> Result<Self> {
        if config.rows < 3 || config.cols < 4 {
            bail!(
                "DummyEnv needs at least 3x4 cells, got {}x{}",
                config.rows,
                config.cols
            );
        }
        let grid = vec![config.rows, config.cols];
        let observation_space = Space::Dict(vec![
            (
                "blstats".to_string(),
                Space::Box {
                    shape: vec![N_BLSTATS],
                    dtype: "int64".to_string(),
                },
            ),
            (
                "chars".to_string(),
                Space::Box {
                    shape: grid.clone(),
                    dtype: "uint8".to_string(),
                },
            ),
            (
                "glyphs".to_string(),
                Space::Box {
                    shape: grid,
                    dtype: "int16".to_string(),
                },
            ),
            (
                "message".to_string(),
                Space::Box {
                    shape: vec![MESSAGE_LEN],
                    dtype: "uint8".to_string(),
                },
            ),
        ]);

        Ok(Self {
            config: config.clone(),
            action_space: Space::Discrete {
                n: MOVES.len() as i64,
            },
            observation_space,
            rng: fastrand::Rng::new(),
            agent: (1, 1),
            goal: (1, 2),
            n_steps: 0,
            message: String::new(),
            started: false,
            closed: false,
            last_reset_options: None,
        })
    }

    fn action_space(&self) -> &Self::Space {
        &self.action_space
    }

    fn observation_space(&self) -> &Self::Space {
        &self.observation_space
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: &ResetOptions,
    ) -> Result<(Self::Obs, Self::Info)> {
        self.ensure_open()?;
        if let Some(seed) = seed {
            self.rng = fastrand::Rng::with_seed(seed);
        }
        self.agent = self.random_interior_cell();
        self.goal = loop {
            let goal = self.random_interior_cell();
            if goal != self.agent {
                break goal;
            }
        };
        self.n_steps = 0;
        self.message.clear();
        self.started = true;
        self.last_reset_options = Some(options.clone());
        trace!("DummyEnv::reset(): agent = {:?}, goal = {:?}", self.agent, self.goal);

        Ok((self.observe(), DummyInfo { n_steps: 0 }))
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        self.ensure_open()?;
        if !self.started {
            bail!("DummyEnv::step() called before reset()");
        }
        if !self.action_space.contains_discrete(a.0) {
            return Err(EnvError::InvalidAction(a.0).into());
        }

        let (dr, dc) = MOVES[a.0 as usize];
        let next = (self.agent.0 + dr, self.agent.1 + dc);
        self.message.clear();
        if self.is_wall(next) {
            self.message.push_str("It's a wall.");
        } else {
            self.agent = next;
        }
        self.n_steps += 1;

        let is_terminated = self.agent == self.goal;
        let is_truncated = !is_terminated && self.n_steps >= self.config.max_episode_steps;
        let reward = if is_terminated { 1.0 } else { 0.0 };
        if is_terminated {
            self.message.push_str("You reach the staircase.");
        }
        if is_terminated || is_truncated {
            self.started = false;
        }

        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(reward)),
            ("n_steps", RecordValue::Scalar(self.n_steps as f32)),
            ("message", RecordValue::String(self.message.clone())),
        ]);
        let info = DummyInfo {
            n_steps: self.n_steps,
        };

        Ok((
            Step::new(self.observe(), *a, reward, is_terminated, is_truncated, info),
            record,
        ))
    }

    fn render(&mut self) -> Result<Self::Render> {
        self.ensure_open()?;
        let lines = (0..self.config.rows as i64)
            .map(|r| {
                (0..self.config.cols as i64)
                    .map(|c| self.cell((r, c)).1 as char)
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        Ok(lines.join("\n"))
    }

    fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_env_walls() -> Result<()> {
        let mut env = DummyEnv::build(&DummyEnvConfig::default())?;
        env.reset(Some(0), &ResetOptions::default())?;

        let map = env.render()?;
        let lines = map.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "--------");
        assert!(lines[1].starts_with('|') && lines[1].ends_with('|'));
        assert_eq!(map.matches('@').count(), 1);
        assert_eq!(map.matches('>').count(), 1);
        Ok(())
    }

    #[test]
    fn test_dummy_env_invalid_action() -> Result<()> {
        let mut env = DummyEnv::build(&DummyEnvConfig::default())?;
        env.reset(Some(0), &ResetOptions::default())?;

        let err = env.step(&DiscreteAct(8)).err().unwrap();
        assert_eq!(
            err.downcast_ref::<EnvError>(),
            Some(&EnvError::InvalidAction(8))
        );
        Ok(())
    }

    #[test]
    fn test_dummy_env_truncation() -> Result<()> {
        let config = DummyEnvConfig {
            max_episode_steps: 3,
            ..DummyEnvConfig::default()
        };
        let mut env = DummyEnv::build(&config)?;
        env.reset(Some(1), &ResetOptions::default())?;

        // The goal may lie to the north.
        let mut last = None;
        for _ in 0..3 {
            let (step, _) = env.step(&DiscreteAct(0))?;
            if step.is_terminated {
                return Ok(());
            }
            last = Some(step);
        }
        let last = last.unwrap();
        assert!(last.is_truncated);
        assert_eq!(last.info, DummyInfo { n_steps: 3 });
        Ok(())
    }
}
