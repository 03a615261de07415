//! Conversion between Python objects and Rust values.
use anyhow::Result;
use log::debug;
use minihack_core::{error::EnvError, Array, DictObs, ResetOptions, Space};
use numpy::PyArrayDyn;
use pyo3::{
    types::{PyDict, PyList},
    PyAny, PyObject, Python, ToPyObject,
};
use serde_yaml::Value;

macro_rules! extract_array {
    ($obj:expr, $($t:ty),*) => {
        $(
            if let Ok(a) = $obj.extract::<&PyArrayDyn<$t>>() {
                return Ok(a.to_owned_array().into());
            }
        )*
    };
}

/// Converts a numpy array to [`Array`].
///
/// Objects other than numpy arrays, e.g., Python or numpy scalars, are passed to
/// `numpy.asarray()` first, so a Python `int` becomes a 0-dimensional `int64` array.
pub fn pyany_to_array(py: Python, obj: &PyAny) -> Result<Array> {
    extract_array!(obj, i16, u8, i64, i32, i8, f32, f64, bool, u16, u32, u64);

    let obj = py
        .import("numpy")?
        .call_method1("asarray", (obj.to_object(py),))?;
    extract_array!(obj, i16, u8, i64, i32, i8, f32, f64, bool, u16, u32, u64);

    let dtype = obj.getattr("dtype")?.str()?.to_str()?.to_string();
    Err(EnvError::UnsupportedValue(format!("array of dtype {}", dtype)).into())
}

/// Converts a Python dict of arrays to [`DictObs`], keeping the order of the dict.
///
/// Entries whose values have no [`Array`] counterpart, e.g., arrays of strings,
/// are left out.
pub fn pyany_to_dict_obs(py: Python, obj: &PyAny) -> Result<DictObs> {
    let dict = match obj.downcast::<PyDict>() {
        Ok(dict) => dict,
        Err(_) => {
            return Err(EnvError::UnexpectedReturn {
                method: "observation".to_string(),
                detail: format!("expected dict, got {}", obj.get_type().name()?),
            }
            .into())
        }
    };

    let mut obs = DictObs::new();
    for (k, v) in dict.iter() {
        let key: String = k.extract()?;
        match pyany_to_array(py, v) {
            Ok(value) => obs.insert(key, value),
            Err(e) => {
                let unsupported = match e.downcast_ref::<EnvError>() {
                    Some(EnvError::UnsupportedValue(detail)) => Some(detail.clone()),
                    _ => None,
                };
                match unsupported {
                    Some(detail) => debug!("Observation {} is left out: {}", key, detail),
                    None => return Err(e),
                }
            }
        }
    }
    Ok(obs)
}

/// Converts a YAML value to the corresponding Python object.
///
/// Mappings become `dict`, sequences become `list`.
pub fn yaml_to_pyobj(py: Python, value: &Value) -> Result<PyObject> {
    let obj = match value {
        Value::Null => py.None(),
        Value::Bool(b) => b.to_object(py),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_object(py)
            } else if let Some(u) = n.as_u64() {
                u.to_object(py)
            } else if let Some(f) = n.as_f64() {
                f.to_object(py)
            } else {
                return Err(EnvError::UnsupportedValue(format!("number {}", n)).into());
            }
        }
        Value::String(s) => s.to_object(py),
        Value::Sequence(seq) => {
            let items = seq
                .iter()
                .map(|v| yaml_to_pyobj(py, v))
                .collect::<Result<Vec<_>>>()?;
            PyList::new(py, items).to_object(py)
        }
        Value::Mapping(mapping) => {
            let dict = PyDict::new(py);
            for (k, v) in mapping.iter() {
                dict.set_item(yaml_to_pyobj(py, k)?, yaml_to_pyobj(py, v)?)?;
            }
            dict.to_object(py)
        }
    };
    Ok(obj)
}

/// Converts [`ResetOptions`] to a Python dict.
pub fn reset_options_to_pyobj(py: Python, options: &ResetOptions) -> Result<PyObject> {
    let dict = PyDict::new(py);
    for (k, v) in options.iter() {
        dict.set_item(k, yaml_to_pyobj(py, v)?)?;
    }
    Ok(dict.to_object(py))
}

/// Describes a gym space object as [`Space`].
///
/// Spaces are identified by their class names; unknown classes become
/// [`Space::Other`].
pub fn pyany_to_space(obj: &PyAny) -> Result<Space> {
    let name = obj.get_type().name()?;
    let space = match name {
        "Discrete" => Space::Discrete {
            n: obj.getattr("n")?.extract()?,
        },
        "Box" => Space::Box {
            shape: obj.getattr("shape")?.extract()?,
            dtype: obj.getattr("dtype")?.str()?.to_str()?.to_string(),
        },
        "Dict" => {
            let spaces = obj
                .getattr("spaces")?
                .call_method0("items")?
                .iter()?
                .map(|item| {
                    let (key, space): (String, &PyAny) = item?.extract()?;
                    Ok((key, pyany_to_space(space)?))
                })
                .collect::<Result<Vec<_>>>()?;
            Space::Dict(spaces)
        }
        other => {
            debug!("Space of type {} is not interpreted", other);
            Space::Other(other.to_string())
        }
    };
    Ok(space)
}
