//! Recursive encoder: arbitrary [`Value`] to plain tree.
//!
//! Each node is offered to the following rules in order; the first rule that
//! applies wins:
//!
//! 1. enum member of a registered enumeration (or a token string naming one)
//!    → enum token;
//! 2. instance whose type name is a registered class → memento envelope;
//! 3. array-like instance → nested sequences;
//! 4. mapping or mapping-like instance → mapping with encoded keys and values;
//! 5. string or text-like instance → string;
//! 6. sequence or sequence-like instance → sequence of encoded elements;
//! 7. anything else is returned as is.
//!
//! Rule 7 never fails. A value that is still not plain after it is rejected
//! later, by the JSON writer.

use tracing::trace;

use crate::enum_token::{format_enum_token, parse_enum_token};
use crate::error::{MementoError, Result};
use crate::instance::Instance;
use crate::memento::{default_memento, wrap};
use crate::registry::{ObjectCodec, Registry};
use crate::value::Value;

pub struct Encoder<'a> {
    registry: &'a Registry,
}

impl<'a> Encoder<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn to_plain(&self, value: &Value) -> Result<Value> {
        if let Some(token) = self.enum_token(value)? {
            return Ok(Value::Str(token));
        }
        let Value::Object(instance) = value else {
            return self.encode_builtin(value);
        };
        let instance: &dyn Instance = &**instance;
        if let Some(codec) = self.registry.lookup_object(instance.type_name()) {
            return self.encode_object(instance, codec);
        }
        if let Some(array) = instance.as_array() {
            let nested = array.to_nested().map_err(MementoError::Application)?;
            return self.to_plain(&nested);
        }
        if let Some(mapping) = instance.as_mapping() {
            let entries = mapping.entries().map_err(MementoError::Application)?;
            return self.encode_entries(&entries);
        }
        if let Some(text) = instance.as_text() {
            return Ok(Value::Str(text.to_string()));
        }
        if let Some(sequence) = instance.as_sequence() {
            let elements = sequence.elements().map_err(MementoError::Application)?;
            return self.encode_elements(&elements);
        }
        trace!(
            type_name = instance.type_name(),
            "no capability matched, passing instance through"
        );
        Ok(value.clone())
    }

    fn enum_token(&self, value: &Value) -> Result<Option<String>> {
        match value {
            Value::Enum(member) => Ok(self
                .registry
                .resolve_enum_member(&member.enum_name, &member.member)?
                .map(|member| format_enum_token(&member.enum_name, &member.member))),
            Value::Str(s) => match parse_enum_token(s)? {
                Some((enum_name, member)) => Ok(self
                    .registry
                    .resolve_enum_member(enum_name, member)?
                    .map(|_| s.clone())),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn encode_object(&self, instance: &dyn Instance, codec: &ObjectCodec) -> Result<Value> {
        let memento = match codec.produce_memento() {
            Some(produce) => produce(instance).map_err(MementoError::Application)?,
            None => default_memento(instance),
        };
        let payload = self.to_plain(&memento)?;
        Ok(wrap(instance.type_name(), payload))
    }

    fn encode_builtin(&self, value: &Value) -> Result<Value> {
        match value {
            Value::Map(entries) => self.encode_entries(entries),
            Value::Str(_) => Ok(value.clone()),
            Value::Seq(items) => self.encode_elements(items),
            _ => Ok(value.clone()),
        }
    }

    fn encode_entries(&self, entries: &[(Value, Value)]) -> Result<Value> {
        entries
            .iter()
            .map(|(key, value)| -> Result<(Value, Value)> {
                Ok((self.to_plain(key)?, self.to_plain(value)?))
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Map)
    }

    fn encode_elements(&self, items: &[Value]) -> Result<Value> {
        items
            .iter()
            .map(|item| self.to_plain(item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EnumMember;
    use std::any::Any;

    #[derive(Debug)]
    struct Opaque;

    impl Instance for Opaque {
        fn type_name(&self) -> &str {
            "Opaque"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn registry() -> Registry {
        Registry::builder().register_enum("Color", ["RED"]).build()
    }

    #[test]
    fn test_enum_member_to_token() {
        let registry = registry();
        let encoded = Encoder::new(&registry)
            .to_plain(&Value::from(EnumMember::new("Color", "RED")))
            .unwrap();
        assert_eq!(encoded, Value::from("__enum__.Color.RED"));
    }

    #[test]
    fn test_unknown_member_of_registered_enum() {
        let registry = registry();
        let err = Encoder::new(&registry)
            .to_plain(&Value::from(EnumMember::new("Color", "BLUE")))
            .unwrap_err();
        assert!(matches!(err, MementoError::UnknownEnumMember { .. }));
    }

    #[test]
    fn test_unregistered_enum_passes_through() {
        let registry = registry();
        let value = Value::from(EnumMember::new("Shape", "CIRCLE"));
        assert_eq!(Encoder::new(&registry).to_plain(&value).unwrap(), value);
    }

    #[test]
    fn test_token_string_is_kept() {
        let registry = registry();
        let value = Value::from("__enum__.Color.RED");
        assert_eq!(Encoder::new(&registry).to_plain(&value).unwrap(), value);
    }

    #[test]
    fn test_malformed_token_string() {
        let registry = registry();
        let err = Encoder::new(&registry)
            .to_plain(&Value::from("__enum__.Color"))
            .unwrap_err();
        assert!(matches!(err, MementoError::MalformedEnumToken(_)));
    }

    #[test]
    fn test_opaque_instance_passes_through() {
        let registry = registry();
        let value = Value::object(Opaque);
        let encoded = Encoder::new(&registry).to_plain(&value).unwrap();
        assert!(encoded.downcast_ref::<Opaque>().is_some());
    }

    #[test]
    fn test_map_keys_are_encoded() {
        let registry = registry();
        let value = Value::map([(EnumMember::new("Color", "RED"), 1)]);
        let encoded = Encoder::new(&registry).to_plain(&value).unwrap();
        assert_eq!(encoded, Value::map([("__enum__.Color.RED", 1)]));
    }
}
