//! Recursive decoder: plain tree back to registered objects and enums.
//!
//! Rules mirror the encoder:
//!
//! 1. envelope whose class tag is registered → payload decoded, then handed
//!    to the class's reconstruction capability;
//! 2. enum token naming a registered enumeration → enum member;
//! 3. mapping → mapping with decoded keys and values;
//! 4. string → unchanged;
//! 5. sequence → sequence of decoded elements;
//! 6. anything else → unchanged.
//!
//! An envelope whose class tag is not registered is not an error: it falls
//! through to rule 3 and comes back as an ordinary two-key mapping.

use tracing::debug;

use crate::enum_token::parse_enum_token;
use crate::error::{MementoError, Result};
use crate::instance::Instance;
use crate::memento::unwrap_envelope;
use crate::registry::Registry;
use crate::value::Value;

pub struct Decoder<'a> {
    registry: &'a Registry,
}

impl<'a> Decoder<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn from_plain(&self, value: &Value) -> Result<Value> {
        if let Some((class_name, payload)) = unwrap_envelope(value) {
            match self.registry.lookup_object(class_name) {
                Some(codec) => {
                    let payload = self.from_plain(payload)?;
                    return codec.reconstruct(payload).map(Value::Object);
                }
                None => debug!(
                    class = class_name,
                    "class not registered, decoding envelope as a plain mapping"
                ),
            }
        }
        if let Value::Str(s) = value {
            if let Some((enum_name, member)) = parse_enum_token(s)? {
                if let Some(member) = self.registry.resolve_enum_member(enum_name, member)? {
                    return Ok(Value::Enum(member));
                }
            }
        }
        match value {
            Value::Map(entries) => self.decode_entries(entries),
            Value::Str(_) => Ok(value.clone()),
            Value::Seq(items) => self.decode_elements(items),
            Value::Object(instance) => self.decode_instance(value, &**instance),
            _ => Ok(value.clone()),
        }
    }

    /// Instances reaching the decoder are read as the built-in value they
    /// stand for, which then goes through every rule, envelopes included.
    fn decode_instance(&self, value: &Value, instance: &dyn Instance) -> Result<Value> {
        if let Some(mapping) = instance.as_mapping() {
            let entries = mapping.entries().map_err(MementoError::Application)?;
            return self.from_plain(&Value::Map(entries));
        }
        if let Some(text) = instance.as_text() {
            return self.from_plain(&Value::Str(text.to_string()));
        }
        if let Some(sequence) = instance.as_sequence() {
            let elements = sequence.elements().map_err(MementoError::Application)?;
            return self.from_plain(&Value::Seq(elements));
        }
        Ok(value.clone())
    }

    fn decode_entries(&self, entries: &[(Value, Value)]) -> Result<Value> {
        entries
            .iter()
            .map(|(key, value)| -> Result<(Value, Value)> {
                Ok((self.from_plain(key)?, self.from_plain(value)?))
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Map)
    }

    fn decode_elements(&self, items: &[Value]) -> Result<Value> {
        items
            .iter()
            .map(|item| self.from_plain(item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Seq)
    }
}
