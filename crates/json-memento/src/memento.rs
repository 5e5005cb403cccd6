//! Memento envelopes.
//!
//! A registered object travels through the plain tree as a two-key mapping:
//!
//! ```json
//! { "OBJECT_CLASS_KEY": "Point", "OBJECT_MEMENTO_KEY": { "x": 1, "y": 2 } }
//! ```
//!
//! A mapping is an envelope iff its key set is exactly these two keys, in any
//! order. Class registration plays no part in recognizing the shape, so an
//! application mapping that happens to use both reserved keys is read as an
//! envelope as well.

use crate::instance::Instance;
use crate::value::Value;

pub const OBJECT_CLASS_KEY: &str = "OBJECT_CLASS_KEY";
pub const OBJECT_MEMENTO_KEY: &str = "OBJECT_MEMENTO_KEY";

/// Reflective memento: a mapping of the instance's public attributes.
///
/// The payload owns its own copy of every attribute; nested instances are
/// shared behind `Arc` and are never mutated through it.
pub fn default_memento(instance: &dyn Instance) -> Value {
    Value::Map(
        instance
            .attributes()
            .into_iter()
            .map(|(name, value)| (Value::Str(name), value))
            .collect(),
    )
}

/// Builds the envelope for `class_name`.
pub fn wrap(class_name: &str, payload: Value) -> Value {
    Value::Map(vec![
        (Value::from(OBJECT_CLASS_KEY), Value::from(class_name)),
        (Value::from(OBJECT_MEMENTO_KEY), payload),
    ])
}

pub fn is_envelope(value: &Value) -> bool {
    let Some(entries) = value.as_map() else {
        return false;
    };
    if entries.len() != 2 {
        return false;
    }
    let mut has_class = false;
    let mut has_memento = false;
    for (key, _) in entries {
        match key.as_str() {
            Some(OBJECT_CLASS_KEY) => has_class = true,
            Some(OBJECT_MEMENTO_KEY) => has_memento = true,
            _ => return false,
        }
    }
    has_class && has_memento
}

/// Splits an envelope into its class tag and payload.
///
/// Returns `None` for anything that is not an envelope, or whose class tag is
/// not a string.
pub fn unwrap_envelope(value: &Value) -> Option<(&str, &Value)> {
    if !is_envelope(value) {
        return None;
    }
    let class_name = value.get(OBJECT_CLASS_KEY)?.as_str()?;
    let payload = value.get(OBJECT_MEMENTO_KEY)?;
    Some((class_name, payload))
}
