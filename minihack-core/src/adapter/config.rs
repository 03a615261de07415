//! Configuration of [`RllibEnv`](super::RllibEnv).
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Observation keys retained when none are configured.
pub const DEFAULT_OBSERVATION_KEYS: [&str; 2] = ["blstats", "glyphs"];

/// Configuration of [`RllibEnv`](super::RllibEnv).
///
/// `C` is the configuration of the wrapped environment. It is passed to its
/// [`Env::build`](crate::Env::build) as it is.
///
/// Unknown fields are rejected when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RllibEnvConfig<C> {
    /// Keys of the observation to be retained.
    ///
    /// Treated as a set. If `None`, [`DEFAULT_OBSERVATION_KEYS`] is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_keys: Option<Vec<String>>,

    /// Configuration of the wrapped environment.
    pub flags: C,
}

impl<C: Default> Default for RllibEnvConfig<C> {
    fn default() -> Self {
        Self {
            observation_keys: None,
            flags: C::default(),
        }
    }
}

impl<C> RllibEnvConfig<C> {
    /// Creates a configuration with the default observation keys.
    pub fn new(flags: C) -> Self {
        Self {
            observation_keys: None,
            flags,
        }
    }

    /// Sets the observation keys.
    pub fn observation_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.observation_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the configuration of the wrapped environment.
    pub fn flags(mut self, flags: C) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the observation keys in ascending lexicographic order without
    /// duplicates.
    pub fn sorted_observation_keys(&self) -> Vec<String> {
        let mut keys = match &self.observation_keys {
            Some(keys) => keys.clone(),
            None => DEFAULT_OBSERVATION_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        };
        keys.sort();
        keys.dedup();
        keys
    }

    /// Constructs [`RllibEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self>
    where
        C: DeserializeOwned,
    {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves [`RllibEnvConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()>
    where
        C: Serialize,
    {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
