use anyhow::{Context, Result};
use minihack_core::{
    error::EnvError, DictObs, DiscreteAct, Env as _, ResetOptions, RllibEnv, RllibEnvConfig,
    Space,
};
use minihack_py_env::{util::pyany_to_space, FlagsFormat, GymApi, PyNleEnv, PyNleEnvConfig};
use pyo3::{types::PyModule, AsPyPointer, Python};
use serde_yaml::Value;
use test_log::test;

type Env = RllibEnv<PyNleEnv>;

const MODULE: &str = "fake_minihack";

const FAKE_MINIHACK: &str = r#"
import numpy as np


class Discrete:
    def __init__(self, n):
        self.n = n


class Box:
    def __init__(self, shape, dtype):
        self.shape = shape
        self.dtype = np.dtype(dtype)


class Dict:
    def __init__(self, spaces):
        self.spaces = spaces


class FakeEnv:
    def __init__(self, flags):
        self.flags = flags
        self.action_space = Discrete(8)
        self.observation_space = Dict({
            "glyphs": Box((3, 4), "int16"),
            "chars": Box((3, 4), "uint8"),
            "blstats": Box((27,), "int64"),
        })
        self.rng = np.random.default_rng()
        self.t = 0
        self.last_options = None
        self.closed = False

    def _obs(self):
        return {
            "glyphs": self.rng.integers(2359, 2400, size=(3, 4), dtype=np.int16),
            "chars": np.full((3, 4), ord("."), dtype=np.uint8),
            "blstats": np.full((27,), self.t, dtype=np.int64),
            "prompt": np.zeros((2,), dtype=np.bool_),
            "inv_strs": np.array(["a key", "a wand"]),
        }

    def reset(self, seed=None, options=None):
        if seed is not None:
            self.rng = np.random.default_rng(seed)
        self.t = 0
        self.last_options = options
        return self._obs(), {"flags": self.flags}

    def step(self, action):
        self.t += 1
        return self._obs(), float(action) / 10, np.bool_(self.t >= 3), False, {"action": action}

    def render(self):
        return "rendered"

    def close(self):
        self.closed = True


class LegacyEnv(FakeEnv):
    def seed(self, seed):
        self.rng = np.random.default_rng(seed)

    def reset(self):
        self.t = 0
        return self._obs()

    def step(self, action):
        self.t += 1
        return self._obs(), 1.0, self.t >= 2, {}


def create_env(flags):
    if flags.get("legacy", False):
        return LegacyEnv(flags)
    env = FakeEnv(flags)
    if flags.get("odd_space", False):
        env.action_space = Box("unknown", "int64")
    return env
"#;

/// Registers the fake module in `sys.modules`.
///
/// Tests in this file need numpy and are run with `cargo test -- --ignored`.
fn setup() -> Result<()> {
    Python::with_gil(|py| {
        py.import("numpy")
            .context("tests of PyNleEnv need numpy in the Python environment")?;
        PyModule::from_code(py, FAKE_MINIHACK, "fake_minihack.py", MODULE)?;
        Ok(())
    })
}

fn py_nle_env_config(flags: &str) -> Result<PyNleEnvConfig> {
    let flags: Value = serde_yaml::from_str(flags)?;
    Ok(PyNleEnvConfig::default()
        .module(MODULE)
        .factory("create_env")
        .flags(flags)
        .flags_format(FlagsFormat::Dict))
}

fn keys(obs: &DictObs) -> Vec<&str> {
    obs.keys().collect()
}

#[test]
#[ignore = "needs Python with numpy"]
fn test_observations_of_python_env() -> Result<()> {
    setup()?;
    let mut env = PyNleEnv::build(&py_nle_env_config("env: MiniHack-Room-5x5-v0")?)?;

    let (obs, info) = env.reset(Some(0), &ResetOptions::default())?;
    // Arrays of strings have no counterpart and are left out.
    assert_eq!(keys(&obs), vec!["glyphs", "chars", "blstats", "prompt"]);
    assert_eq!(obs.get("prompt").unwrap().dtype(), "bool");
    assert_eq!(obs.get("glyphs").unwrap().dtype(), "int16");
    assert_eq!(obs.get("glyphs").unwrap().shape(), &[3, 4]);
    assert_eq!(obs.get("chars").unwrap().dtype(), "uint8");
    assert_eq!(obs.get("blstats").unwrap().dtype(), "int64");

    Python::with_gil(|py| -> Result<()> {
        let env_name: String = info
            .info
            .as_ref(py)
            .get_item("flags")?
            .get_item("env")?
            .extract()?;
        assert_eq!(env_name, "MiniHack-Room-5x5-v0");
        Ok(())
    })
}

#[test]
#[ignore = "needs Python with numpy"]
fn test_rllib_env_on_python_env() -> Result<()> {
    setup()?;
    let config = RllibEnvConfig::new(py_nle_env_config("env: MiniHack-Room-5x5-v0")?);
    let mut env = Env::build(&config)?;

    let (obs, _) = env.reset(Some(42), &ResetOptions::default())?;
    assert_eq!(keys(&obs), vec!["blstats", "glyphs"]);

    let (step, record) = env.step(&DiscreteAct(3))?;
    assert_eq!(keys(&step.obs), vec!["blstats", "glyphs"]);
    assert_eq!(step.reward, 0.3f64 as f32);
    assert_eq!(record.get_scalar("reward")?, 0.3f64 as f32);
    assert!(!step.is_terminated);
    assert!(!step.is_truncated);
    Python::with_gil(|py| -> Result<()> {
        let act: i64 = step.info.info.as_ref(py).get_item("action")?.extract()?;
        assert_eq!(act, 3);
        Ok(())
    })?;

    env.step(&DiscreteAct(0))?;
    let (step, _) = env.step(&DiscreteAct(0))?;
    assert!(step.is_terminated);
    Ok(())
}

#[test]
#[ignore = "needs Python with numpy"]
fn test_reset_with_seed_is_deterministic() -> Result<()> {
    setup()?;
    let config = RllibEnvConfig::new(py_nle_env_config("{}")?)
        .observation_keys(vec!["glyphs", "chars"]);
    let mut env = Env::build(&config)?;

    let (obs1, _) = env.reset(Some(42), &ResetOptions::default())?;
    env.step(&DiscreteAct(1))?;
    let (obs2, _) = env.reset(Some(42), &ResetOptions::default())?;
    assert_eq!(keys(&obs1), vec!["chars", "glyphs"]);
    assert_eq!(obs1, obs2);
    Ok(())
}

#[test]
#[ignore = "needs Python with numpy"]
fn test_missing_observation_key() -> Result<()> {
    setup()?;
    let config = RllibEnvConfig::new(py_nle_env_config("{}")?)
        .observation_keys(vec!["glyphs", "pixel"]);
    let mut env = Env::build(&config)?;

    let err = env.reset(Some(0), &ResetOptions::default()).err().unwrap();
    assert_eq!(
        err.downcast_ref::<EnvError>(),
        Some(&EnvError::MissingObservationKey("pixel".to_string()))
    );
    Ok(())
}

#[test]
#[ignore = "needs Python with numpy"]
fn test_positional_reset_forwards_options() -> Result<()> {
    setup()?;
    let config = py_nle_env_config("{}")?.api(GymApi::Positional);
    let mut env = PyNleEnv::build(&config)?;
    let options = ResetOptions::default().insert("des_file", "room.des");
    env.reset(None, &options)?;

    Python::with_gil(|py| -> Result<()> {
        let des_file: String = env
            .py_env()
            .as_ref(py)
            .getattr("last_options")?
            .get_item("des_file")?
            .extract()?;
        assert_eq!(des_file, "room.des");
        Ok(())
    })
}

#[test]
#[ignore = "needs Python with numpy"]
fn test_legacy_api() -> Result<()> {
    setup()?;
    let config = py_nle_env_config("legacy: true")?.api(GymApi::Legacy);
    let mut env = Env::build(&RllibEnvConfig::new(config))?;

    let (obs1, info) = env.reset(Some(7), &ResetOptions::default())?;
    Python::with_gil(|py| -> Result<()> {
        assert_eq!(info.info.as_ref(py).len()?, 0);
        Ok(())
    })?;

    let (step, _) = env.step(&DiscreteAct(0))?;
    assert!(!step.is_terminated);
    let (step, _) = env.step(&DiscreteAct(0))?;
    assert!(step.is_terminated);
    assert!(!step.is_truncated);

    let (obs2, _) = env.reset(Some(7), &ResetOptions::default())?;
    assert_eq!(obs1, obs2);
    Ok(())
}

#[test]
#[ignore = "needs Python with numpy"]
fn test_spaces_are_those_of_python_env() -> Result<()> {
    setup()?;
    let env = Env::build(&RllibEnvConfig::new(py_nle_env_config("{}")?))?;

    Python::with_gil(|py| -> Result<()> {
        let py_env = env.inner().py_env().as_ref(py);
        assert_eq!(
            env.action_space().as_ptr(),
            py_env.getattr("action_space")?.as_ptr()
        );
        assert_eq!(
            env.observation_space().as_ptr(),
            py_env.getattr("observation_space")?.as_ptr()
        );

        assert_eq!(
            pyany_to_space(env.action_space().as_ref(py))?,
            Space::Discrete { n: 8 }
        );
        let space = pyany_to_space(env.observation_space().as_ref(py))?;
        assert_eq!(
            space.get("glyphs"),
            Some(&Space::Box {
                shape: vec![3, 4],
                dtype: "int16".to_string()
            })
        );
        assert!(space.get("blstats").is_some());
        Ok(())
    })
}

#[test]
#[ignore = "needs Python with numpy"]
fn test_build_with_undescribed_space() -> Result<()> {
    setup()?;
    let mut env = PyNleEnv::build(&py_nle_env_config("odd_space: true")?)?;

    Python::with_gil(|py| {
        assert!(pyany_to_space(env.action_space().as_ref(py)).is_err());
    });
    env.reset(Some(0), &ResetOptions::default())?;
    env.close()
}

#[test]
#[ignore = "needs Python with numpy"]
fn test_close() -> Result<()> {
    setup()?;
    let mut env = Env::build(&RllibEnvConfig::new(py_nle_env_config("{}")?))?;
    env.reset(None, &ResetOptions::default())?;
    let rendered = env.render()?;
    let rendered: String = Python::with_gil(|py| rendered.extract(py))?;
    assert_eq!(rendered, "rendered");

    env.close()?;
    Python::with_gil(|py| -> Result<()> {
        let closed: bool = env.inner().py_env().getattr(py, "closed")?.extract(py)?;
        assert!(closed);
        Ok(())
    })?;

    let err = env.step(&DiscreteAct(0)).err().unwrap();
    assert_eq!(err.downcast_ref::<EnvError>(), Some(&EnvError::Closed));
    env.close()
}
