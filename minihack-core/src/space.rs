//! Spaces of actions and observations.
use serde::{Deserialize, Serialize};

/// Formal description of valid actions or observations of an environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Space {
    /// Integers in `0..n`.
    Discrete {
        /// The number of elements.
        n: i64,
    },

    /// Arrays of a fixed shape and dtype.
    Box {
        /// Shape of arrays.
        shape: Vec<usize>,
        /// Name of the dtype in numpy, e.g., `int16`.
        dtype: String,
    },

    /// Ordered mapping from keys to subspaces.
    Dict(Vec<(String, Space)>),

    /// A space this crate does not interpret, identified by its type name.
    Other(String),
}

impl Space {
    /// Returns `true` if `a` is a valid element of a discrete space.
    ///
    /// Always `false` for non-discrete spaces.
    pub fn contains_discrete(&self, a: i64) -> bool {
        match self {
            Space::Discrete { n } => 0 <= a && a < *n,
            _ => false,
        }
    }

    /// Returns the subspace of the given key of a dict space.
    pub fn get(&self, key: &str) -> Option<&Space> {
        match self {
            Space::Dict(spaces) => spaces.iter().find(|(k, _)| k == key).map(|(_, s)| s),
            _ => None,
        }
    }
}
