//! Wrapper of MiniHack and NLE environments implemented in Python.
use crate::{
    util::{pyany_to_dict_obs, pyany_to_space, reset_options_to_pyobj, yaml_to_pyobj},
    FlagsFormat, GymApi, PyNleEnvConfig,
};
use anyhow::Result;
use log::{debug, info, trace};
use minihack_core::{
    error::EnvError, record::Record, DictObs, DiscreteAct, Env, Info, ResetOptions, Step,
};
use pyo3::{types::PyDict, PyAny, PyObject, Python, ToPyObject};

/// Information given at every step of the interaction with the environment.
///
/// The `info` dict returned by the Python environment, untouched.
pub struct GymInfo {
    /// The Python dict.
    pub info: PyObject,
}

impl Info for GymInfo {}

/// A MiniHack or NLE environment created by a factory function in Python.
///
/// Observations are converted to [`DictObs`] with all the keys returned by the
/// environment. The spaces are the Python space objects of the environment.
pub struct PyNleEnv {
    env: PyObject,

    action_space: PyObject,

    observation_space: PyObject,

    api: GymApi,

    closed: bool,
}

impl PyNleEnv {
    /// The Python environment object.
    pub fn py_env(&self) -> &PyObject {
        &self.env
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(EnvError::Closed.into());
        }
        Ok(())
    }
}

fn unexpected_return(method: &str, expected: &str, obj: &PyAny) -> EnvError {
    let got = match obj.get_type().name() {
        Ok(name) => name.to_string(),
        Err(_) => "unknown".to_string(),
    };
    EnvError::UnexpectedReturn {
        method: method.to_string(),
        detail: format!("expected {}, got {}", expected, got),
    }
}

fn flags_to_pyobj(py: Python, config: &PyNleEnvConfig) -> Result<PyObject> {
    let flags = yaml_to_pyobj(py, &config.flags)?;
    match config.flags_format {
        FlagsFormat::Dict => Ok(flags),
        FlagsFormat::Omegaconf => {
            let omegaconf = py.import("omegaconf")?.getattr("OmegaConf")?;
            Ok(omegaconf.call_method1("create", (flags,))?.to_object(py))
        }
    }
}

impl Env for PyNleEnv {
    type Config = PyNleEnvConfig;
    type Obs = DictObs;
    type Act = DiscreteAct;
    type Info = GymInfo;
    type Space = PyObject;
    type Render = PyObject;

    /// Imports `config.module` and calls its factory function with the flags.
    fn build(config: &Self::Config) -> Result<Self> {
        Python::with_gil(|py| {
            let sys = py.import("sys")?;

            // sys.argv is read by some libraries at import time, but it can be
            // empty in an embedded interpreter.
            let argv = sys.getattr("argv")?;
            if argv.len()? == 0 {
                argv.call_method1("append", ("PyNleEnv",))?;
            }
            let path = sys.getattr("path")?;
            for dir in config.sys_path.iter().rev() {
                path.call_method1("insert", (0, dir.as_str()))?;
            }
            info!("Initialize PyNleEnv");
            info!("Python version = {}", sys.getattr("version")?);
            debug!("sys.path = {}", path);

            let flags = flags_to_pyobj(py, config)?;
            let env = py
                .import(config.module.as_str())?
                .getattr(config.factory.as_str())?
                .call1((flags,))?;
            info!("Created environment with {}.{}", config.module, config.factory);

            let action_space = env.getattr("action_space")?;
            let observation_space = env.getattr("observation_space")?;
            for (name, space) in [
                ("Action", action_space),
                ("Observation", observation_space),
            ]
            .iter()
            {
                match pyany_to_space(space) {
                    Ok(space) => info!("{} space = {:?}", name, space),
                    Err(e) => debug!("{} space is not described: {}", name, e),
                }
            }

            Ok(Self {
                env: env.to_object(py),
                action_space: action_space.to_object(py),
                observation_space: observation_space.to_object(py),
                api: config.api,
                closed: false,
            })
        })
    }

    fn action_space(&self) -> &Self::Space {
        &self.action_space
    }

    fn observation_space(&self) -> &Self::Space {
        &self.observation_space
    }

    /// Resets the environment with the calling convention in the configuration.
    ///
    /// With [`GymApi::Legacy`], `options` are ignored and the info is an empty dict.
    fn reset(
        &mut self,
        seed: Option<u64>,
        options: &ResetOptions,
    ) -> Result<(Self::Obs, Self::Info)> {
        trace!("PyNleEnv::reset(seed = {:?})", seed);
        self.ensure_open()?;

        Python::with_gil(|py| {
            let env = self.env.as_ref(py);
            let (obs, info) = match self.api {
                GymApi::Keyword | GymApi::Positional => {
                    let options = reset_options_to_pyobj(py, options)?;
                    let ret = if self.api == GymApi::Keyword {
                        let kwargs = PyDict::new(py);
                        kwargs.set_item("seed", seed)?;
                        kwargs.set_item("options", options)?;
                        env.call_method("reset", (), Some(kwargs))?
                    } else {
                        env.call_method1("reset", (seed, options))?
                    };
                    ret.extract::<(&PyAny, &PyAny)>()
                        .map_err(|_| unexpected_return("reset", "(obs, info)", ret))?
                }
                GymApi::Legacy => {
                    if let Some(seed) = seed {
                        env.call_method1("seed", (seed,))?;
                    }
                    let obs = env.call_method0("reset")?;
                    let info: &PyAny = PyDict::new(py);
                    (obs, info)
                }
            };

            Ok((
                pyany_to_dict_obs(py, obs)?,
                GymInfo {
                    info: info.to_object(py),
                },
            ))
        })
    }

    /// Runs a step of the environment's dynamics.
    ///
    /// The reward is narrowed to `f32`. The returned [`Record`] has the reward.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        trace!("PyNleEnv::step({:?})", a);
        self.ensure_open()?;

        Python::with_gil(|py| {
            let ret = self.env.as_ref(py).call_method1("step", (a.0,))?;
            let (obs, reward, is_terminated, is_truncated, info) = match self.api {
                GymApi::Keyword | GymApi::Positional => {
                    let (obs, reward, terminated, truncated, info) = ret
                        .extract::<(&PyAny, f32, &PyAny, &PyAny, &PyAny)>()
                        .map_err(|_| {
                            unexpected_return(
                                "step",
                                "(obs, reward, terminated, truncated, info)",
                                ret,
                            )
                        })?;
                    (obs, reward, terminated.is_true()?, truncated.is_true()?, info)
                }
                GymApi::Legacy => {
                    let (obs, reward, done, info) = ret
                        .extract::<(&PyAny, f32, &PyAny, &PyAny)>()
                        .map_err(|_| unexpected_return("step", "(obs, reward, done, info)", ret))?;
                    (obs, reward, done.is_true()?, false, info)
                }
            };
            let obs = pyany_to_dict_obs(py, obs)?;
            let info = GymInfo {
                info: info.to_object(py),
            };

            Ok((
                Step::new(obs, *a, reward, is_terminated, is_truncated, info),
                Record::from_scalar("reward", reward),
            ))
        })
    }

    fn render(&mut self) -> Result<Self::Render> {
        self.ensure_open()?;
        Python::with_gil(|py| Ok(self.env.call_method0(py, "render")?))
    }

    fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        info!("Close PyNleEnv");
        Python::with_gil(|py| {
            self.env.call_method0(py, "close")?;
            self.closed = true;
            Ok(())
        })
    }
}
