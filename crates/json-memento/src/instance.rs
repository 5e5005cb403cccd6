//! Capability probes for application values.
//!
//! The encoder never guesses what an [`Instance`] is by trying an operation
//! and looking at the failure. Each capability is an explicit probe that
//! returns `None` when unsupported; once a probe answers `Some`, any error
//! raised by the capability itself is a genuine fault and is propagated.

use std::any::Any;
use std::fmt;

use crate::array::ArrayLike;
use crate::error::BoxError;
use crate::value::Value;

/// An application value that can travel inside a [`Value::Object`].
pub trait Instance: Any + fmt::Debug + Send + Sync {
    /// Runtime type name, matched against the object registry.
    fn type_name(&self) -> &str;

    /// Publicly visible attributes, keyed by attribute name. Feeds the
    /// reflective memento when a registered class has no memento producer.
    fn attributes(&self) -> Vec<(String, Value)> {
        Vec::new()
    }

    fn as_array(&self) -> Option<&dyn ArrayLike> {
        None
    }

    fn as_mapping(&self) -> Option<&dyn MappingLike> {
        None
    }

    fn as_text(&self) -> Option<&str> {
        None
    }

    fn as_sequence(&self) -> Option<&dyn SequenceLike> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    /// Equivalence used by [`Value`] comparisons: same type name and equal
    /// attributes.
    fn dyn_eq(&self, other: &dyn Instance) -> bool {
        self.type_name() == other.type_name() && self.attributes() == other.attributes()
    }
}

/// Key/value iteration.
pub trait MappingLike {
    fn entries(&self) -> Result<Vec<(Value, Value)>, BoxError>;
}

/// Element iteration.
pub trait SequenceLike {
    fn elements(&self) -> Result<Vec<Value>, BoxError>;
}
