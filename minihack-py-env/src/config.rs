//! Configuration of [`PyNleEnv`](crate::PyNleEnv).
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Calling convention of the Python environment.
///
/// MiniHack and NLE environments followed different versions of the gym API.
/// The convention is fixed in the configuration, it is never guessed from the
/// Python object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GymApi {
    /// `reset(seed=seed, options=options) -> (obs, info)` and
    /// `step(action) -> (obs, reward, terminated, truncated, info)`, as in gymnasium.
    Keyword,

    /// `reset(seed, options) -> (obs, info)` with positional arguments and the
    /// same `step` as [`GymApi::Keyword`].
    Positional,

    /// `seed(seed)`, `reset() -> obs` and `step(action) -> (obs, reward, done, info)`,
    /// as in gym before version 0.26. `done` is reported as terminated.
    Legacy,
}

/// How `flags` are passed to the factory function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagsFormat {
    /// A Python `dict`.
    Dict,

    /// `omegaconf.OmegaConf.create(dict)`, for factories accessing flags as attributes.
    Omegaconf,
}

/// Configuration of [`PyNleEnv`](crate::PyNleEnv).
///
/// The environment is created by calling `<module>.<factory>(flags)` in Python.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PyNleEnvConfig {
    /// Python module providing the factory function.
    pub module: String,

    /// Name of the factory function.
    pub factory: String,

    /// Argument of the factory function, passed as it is.
    pub flags: Value,

    /// How `flags` are converted to a Python object.
    ///
    /// Defaults to [`FlagsFormat::Omegaconf`], as the default factory reads
    /// flags as attributes.
    pub flags_format: FlagsFormat,

    /// Calling convention of the created environment.
    pub api: GymApi,

    /// Directories prepended to `sys.path` before importing `module`.
    pub sys_path: Vec<String>,
}

impl Default for PyNleEnvConfig {
    fn default() -> Self {
        Self {
            module: "minihack.agent.common.envs.tasks".to_string(),
            factory: "create_env".to_string(),
            flags: Value::Mapping(Mapping::new()),
            flags_format: FlagsFormat::Omegaconf,
            api: GymApi::Keyword,
            sys_path: vec![],
        }
    }
}

impl PyNleEnvConfig {
    /// Sets the Python module providing the factory function.
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Sets the name of the factory function.
    pub fn factory(mut self, factory: impl Into<String>) -> Self {
        self.factory = factory.into();
        self
    }

    /// Sets the argument of the factory function.
    pub fn flags(mut self, flags: Value) -> Self {
        self.flags = flags;
        self
    }

    /// Sets how `flags` are passed to the factory function.
    pub fn flags_format(mut self, v: FlagsFormat) -> Self {
        self.flags_format = v;
        self
    }

    /// Sets the calling convention of the environment.
    pub fn api(mut self, v: GymApi) -> Self {
        self.api = v;
        self
    }

    /// Adds a directory to be prepended to `sys.path`.
    pub fn sys_path(mut self, path: impl Into<String>) -> Self {
        self.sys_path.push(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use minihack_core::RllibEnvConfig;
    use tempdir::TempDir;

    const CONFIG: &str = r#"
observation_keys: [glyphs, chars, blstats]
flags:
  flags:
    env: MiniHack-Room-5x5-v0
    reward_win: 1.0
    max_episode_steps: 100
  flags_format: omegaconf
  api: legacy
"#;

    #[test]
    fn test_parse_rllib_env_config() -> Result<()> {
        let config: RllibEnvConfig<PyNleEnvConfig> = serde_yaml::from_str(CONFIG)?;

        assert_eq!(
            config.sorted_observation_keys(),
            vec!["blstats", "chars", "glyphs"]
        );
        assert_eq!(config.flags.module, "minihack.agent.common.envs.tasks");
        assert_eq!(config.flags.factory, "create_env");
        assert_eq!(config.flags.flags_format, FlagsFormat::Omegaconf);
        assert_eq!(config.flags.api, GymApi::Legacy);
        assert_eq!(
            config.flags.flags["env"],
            Value::String("MiniHack-Room-5x5-v0".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_default_flags_format_is_omegaconf() -> Result<()> {
        let config: RllibEnvConfig<PyNleEnvConfig> =
            serde_yaml::from_str("flags:\n  flags:\n    env: MiniHack-Room-5x5-v0\n")?;
        assert_eq!(config.flags.factory, "create_env");
        assert_eq!(config.flags.flags_format, FlagsFormat::Omegaconf);
        assert_eq!(config.flags.api, GymApi::Keyword);
        Ok(())
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let yaml = "flags:\n  module: minihack.envs\n  reset_convention: positional\n";
        assert!(serde_yaml::from_str::<RllibEnvConfig<PyNleEnvConfig>>(yaml).is_err());
    }

    #[test]
    fn test_serde_py_nle_env_config() -> Result<()> {
        let flags: Value = serde_yaml::from_str("env: MiniHack-KeyRoom-S5-v0\n")?;
        let config = RllibEnvConfig::new(
            PyNleEnvConfig::default()
                .flags(flags)
                .api(GymApi::Positional)
                .sys_path("/opt/minihack"),
        );

        let dir = TempDir::new("py_nle_env_config")?;
        let path = dir.path().join("py_nle_env_config.yaml");
        config.save(&path)?;
        let config_ = RllibEnvConfig::<PyNleEnvConfig>::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
