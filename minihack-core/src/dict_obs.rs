//! Dictionary-valued observation.
use crate::{error::EnvError, Obs};
use ndarray::ArrayD;
use std::collections::HashMap;

/// An array in an observation, with the dtype used by the simulator.
#[derive(Clone, Debug, PartialEq)]
pub enum Array {
    /// `bool`
    Bool(ArrayD<bool>),
    /// `int8`
    I8(ArrayD<i8>),
    /// `uint8`, e.g., `chars`, `colors` and `message` of NLE.
    U8(ArrayD<u8>),
    /// `uint16`
    U16(ArrayD<u16>),
    /// `int16`, e.g., `glyphs` of NLE.
    I16(ArrayD<i16>),
    /// `uint32`
    U32(ArrayD<u32>),
    /// `int32`
    I32(ArrayD<i32>),
    /// `uint64`
    U64(ArrayD<u64>),
    /// `int64`, e.g., `blstats` of NLE.
    I64(ArrayD<i64>),
    /// `float32`
    F32(ArrayD<f32>),
    /// `float64`
    F64(ArrayD<f64>),
}

macro_rules! impl_from_arrayd {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<ArrayD<$t>> for Array {
                fn from(a: ArrayD<$t>) -> Self {
                    Array::$variant(a)
                }
            }
        )*
    };
}

impl_from_arrayd!(
    bool => Bool, i8 => I8, u8 => U8, u16 => U16, i16 => I16, u32 => U32, i32 => I32,
    u64 => U64, i64 => I64, f32 => F32, f64 => F64
);

macro_rules! map_array {
    ($array:expr, $a:ident => $body:expr) => {
        match $array {
            Array::Bool($a) => $body,
            Array::I8($a) => $body,
            Array::U8($a) => $body,
            Array::U16($a) => $body,
            Array::I16($a) => $body,
            Array::U32($a) => $body,
            Array::I32($a) => $body,
            Array::U64($a) => $body,
            Array::I64($a) => $body,
            Array::F32($a) => $body,
            Array::F64($a) => $body,
        }
    };
}

impl Array {
    /// Shape of the array.
    pub fn shape(&self) -> &[usize] {
        map_array!(self, a => a.shape())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        map_array!(self, a => a.len())
    }

    /// Returns `true` if the array has no element.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the dtype in numpy.
    pub fn dtype(&self) -> &'static str {
        match self {
            Array::Bool(_) => "bool",
            Array::I8(_) => "int8",
            Array::U8(_) => "uint8",
            Array::U16(_) => "uint16",
            Array::I16(_) => "int16",
            Array::U32(_) => "uint32",
            Array::I32(_) => "int32",
            Array::U64(_) => "uint64",
            Array::I64(_) => "int64",
            Array::F32(_) => "float32",
            Array::F64(_) => "float64",
        }
    }

}

/// Observation given as an ordered mapping from keys to arrays.
///
/// The order of entries is the order of insertion. Inserting an existing key
/// replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DictObs(Vec<(String, Array)>);

impl Obs for DictObs {}

impl DictObs {
    /// Creates an empty observation.
    pub fn new() -> Self {
        Self(vec![])
    }

    /// Inserts an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Array>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Returns the array of the given key.
    pub fn get(&self, key: &str) -> Option<&Array> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the observation has the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Array)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the observation has no entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the observation and returns a new one holding exactly `keys`,
    /// in the order of `keys`.
    ///
    /// Arrays are moved, not copied. Entries not listed in `keys` are dropped.
    ///
    /// # Errors
    ///
    /// [`EnvError::MissingObservationKey`] if one of `keys` is absent.
    pub fn select(self, keys: &[String]) -> Result<Self, EnvError> {
        let mut map: HashMap<String, Array> = self.0.into_iter().collect();
        keys.iter()
            .map(|key| match map.remove(key) {
                Some(value) => Ok((key.clone(), value)),
                None => Err(EnvError::MissingObservationKey(key.clone())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<(String, Array)>> for DictObs {
    fn from(entries: Vec<(String, Array)>) -> Self {
        entries.into_iter().collect()
    }
}

impl std::iter::FromIterator<(String, Array)> for DictObs {
    fn from_iter<I: IntoIterator<Item = (String, Array)>>(iter: I) -> Self {
        let mut obs = Self::new();
        for (k, v) in iter {
            obs.insert(k, v);
        }
        obs
    }
}

impl IntoIterator for DictObs {
    type Item = (String, Array);
    type IntoIter = std::vec::IntoIter<(String, Array)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
