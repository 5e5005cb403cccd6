//! Recursive memento codec for JSON.
//!
//! Converts application values (registered objects, enumeration members,
//! numeric arrays, nested containers) into a plain tree of mappings,
//! sequences, strings, numbers, booleans and null, and back. The plain tree is
//! what a JSON writer understands; `serde_json` handles the text itself.
//!
//! Registered objects travel as memento envelopes,
//! `{"OBJECT_CLASS_KEY": <class>, "OBJECT_MEMENTO_KEY": <payload>}`, and enum
//! members as tokens, `"__enum__.<Enum>.<Member>"`.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use json_memento::{Instance, ObjectCodec, Registry, Value};
//! use serde_json::json;
//!
//! #[derive(Debug)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl Instance for Point {
//!     fn type_name(&self) -> &str {
//!         "Point"
//!     }
//!
//!     fn attributes(&self) -> Vec<(String, Value)> {
//!         vec![("x".into(), self.x.into()), ("y".into(), self.y.into())]
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let registry = Registry::builder()
//!     .register_object(
//!         "Point",
//!         ObjectCodec::new(|memento: Value| {
//!             let x = memento.get("x").and_then(Value::as_i64).ok_or("missing x")?;
//!             let y = memento.get("y").and_then(Value::as_i64).ok_or("missing y")?;
//!             Ok(Point { x, y })
//!         }),
//!     )
//!     .build();
//!
//! let plain = registry.to_plain(&Value::object(Point { x: 1, y: 2 })).unwrap();
//! assert_eq!(
//!     serde_json::Value::try_from(plain.clone()).unwrap(),
//!     json!({"OBJECT_CLASS_KEY": "Point", "OBJECT_MEMENTO_KEY": {"x": 1, "y": 2}})
//! );
//!
//! let decoded = registry.from_plain(&plain).unwrap();
//! let point = decoded.downcast_ref::<Point>().unwrap();
//! assert_eq!((point.x, point.y), (1, 2));
//! ```
//!
//! # Registry lifecycle
//!
//! A [`Registry`] is built once and never mutated afterwards. Pass it around
//! explicitly, or [`install`] it as the process-wide registry used by the free
//! functions [`to_plain`] and [`from_plain`].
//!
//! # Limits
//!
//! Recursion follows the input. Cyclic structures are not detected.

pub mod array;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod enum_token;
pub mod error;
pub mod instance;
pub mod json;
pub mod memento;
pub mod registry;
pub mod value;

pub use array::{ArrayLike, DenseArray, Element};
pub use config::RegistryConfig;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use enum_token::{format_enum_token, parse_enum_token, ENUM_MARKER};
pub use error::{BoxError, MementoError, Result};
pub use instance::{Instance, MappingLike, SequenceLike};
pub use memento::{
    default_memento, is_envelope, unwrap_envelope, wrap, OBJECT_CLASS_KEY, OBJECT_MEMENTO_KEY,
};
pub use registry::{global, install, ObjectCodec, ProduceMemento, Reconstruct, Registry, RegistryBuilder};
pub use value::{EnumMember, PublicEnum, Value};

/// Encodes with the process-wide registry.
pub fn to_plain(value: &Value) -> Result<Value> {
    global().to_plain(value)
}

/// Decodes with the process-wide registry.
pub fn from_plain(value: &Value) -> Result<Value> {
    global().from_plain(value)
}
