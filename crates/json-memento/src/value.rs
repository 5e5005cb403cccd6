//! [`Value`]: the dynamic value type carried through both transform directions.
//!
//! A value is *plain* when it is built only from `Null`, `Bool`, `Number`,
//! `Str`, `Seq` and `Map` with string keys. Plain values are exactly what the
//! JSON layer accepts; `Enum` and `Object` exist only on the application side.

use std::fmt;
use std::sync::Arc;

use serde_json::Number;

use crate::instance::Instance;

/// A member of an enumeration, identified by enum name and member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumMember {
    pub enum_name: String,
    pub member: String,
}

impl EnumMember {
    pub fn new(enum_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            enum_name: enum_name.into(),
            member: member.into(),
        }
    }

    /// Captures a Rust enum variant.
    pub fn of<E: PublicEnum>(value: &E) -> Self {
        Self::new(E::NAME, value.member_name())
    }

    /// Converts back into a Rust enum. `None` when the enum name differs or
    /// the member is not a variant of `E`.
    pub fn to_enum<E: PublicEnum>(&self) -> Option<E> {
        if self.enum_name != E::NAME {
            return None;
        }
        E::from_member_name(&self.member)
    }
}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.enum_name, self.member)
    }
}

/// A Rust enum that can be registered as an enumeration.
///
/// ```
/// use json_memento::PublicEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Color {
///     Red,
///     Green,
/// }
///
/// impl PublicEnum for Color {
///     const NAME: &'static str = "Color";
///
///     fn members() -> &'static [&'static str] {
///         &["RED", "GREEN"]
///     }
///
///     fn member_name(&self) -> &'static str {
///         match self {
///             Color::Red => "RED",
///             Color::Green => "GREEN",
///         }
///     }
///
///     fn from_member_name(name: &str) -> Option<Self> {
///         match name {
///             "RED" => Some(Color::Red),
///             "GREEN" => Some(Color::Green),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Color::from_member_name(Color::Green.member_name()), Some(Color::Green));
/// ```
pub trait PublicEnum: Sized {
    const NAME: &'static str;

    fn members() -> &'static [&'static str];

    fn member_name(&self) -> &'static str;

    fn from_member_name(name: &str) -> Option<Self>;
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    Str(String),
    Seq(Vec<Value>),
    /// Ordered key/value pairs. Keys are arbitrary values so that encoded and
    /// decoded keys stay representable; only string keys cross the JSON boundary.
    Map(Vec<(Value, Value)>),
    Enum(EnumMember),
    Object(Arc<dyn Instance>),
}

impl Value {
    /// Wraps an application instance.
    pub fn object<T: Instance>(instance: T) -> Self {
        Value::Object(Arc::new(instance))
    }

    pub fn enum_member<E: PublicEnum>(value: &E) -> Self {
        Value::Enum(EnumMember::of(value))
    }

    /// Builds a mapping from key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
            Value::Enum(_) => "enum",
            Value::Object(_) => "object",
        }
    }

    /// `true` when the whole tree can be handed to a JSON writer.
    pub fn is_plain(&self) -> bool {
        match self {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_) => true,
            Value::Seq(items) => items.iter().all(Value::is_plain),
            Value::Map(entries) => entries
                .iter()
                .all(|(k, v)| matches!(k, Value::Str(_)) && v.is_plain()),
            Value::Enum(_) | Value::Object(_) => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumMember> {
        match self {
            Value::Enum(member) => Some(member),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<dyn Instance>> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Downcasts an `Object` value to its concrete type.
    pub fn downcast_ref<T: Instance>(&self) -> Option<&T> {
        self.as_object()?.as_any().downcast_ref::<T>()
    }

    /// Looks up a string key in a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            // Mappings compare by key set, not insertion order.
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len() && entries_contained(a, b) && entries_contained(b, a)
            }
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b) || a.dyn_eq(b.as_ref()),
            _ => false,
        }
    }
}

/// Every entry of `a` has a matching key in `b` with an equal value.
fn entries_contained(a: &[(Value, Value)], b: &[(Value, Value)]) -> bool {
    a.iter().all(|(key, val_a)| {
        b.iter()
            .find(|(k, _)| k == key)
            .is_some_and(|(_, val_b)| val_a == val_b)
    })
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::from(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<EnumMember> for Value {
    fn from(member: EnumMember) -> Self {
        Value::Enum(member)
    }
}

impl From<Arc<dyn Instance>> for Value {
    fn from(instance: Arc<dyn Instance>) -> Self {
        Value::Object(instance)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
