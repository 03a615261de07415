//! Records of values produced while interacting with environments.
//!
//! ```rust
//! use minihack_core::record::{Record, RecordValue};
//!
//! // following values are obtained with some process in reality
//! let step = 1;
//! let message = "It's a wall.";
//! let reward = -1f32;
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(step as f32));
//! record.insert("reward", RecordValue::Scalar(reward));
//! record.insert("message", RecordValue::String(message.to_string()));
//! ```
mod base;

pub use base::{Record, RecordValue};
