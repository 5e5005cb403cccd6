//! Type registry: which classes and enumerations take part in the transform.
//!
//! A [`Registry`] is assembled with a [`RegistryBuilder`] and is immutable once
//! built. It can be passed around explicitly, or installed once per process
//! with [`install`] and read back with [`global`].

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{BoxError, MementoError, Result};
use crate::instance::Instance;
use crate::value::{EnumMember, PublicEnum, Value};

/// Produces a memento payload from an instance.
pub type ProduceMemento =
    Arc<dyn Fn(&dyn Instance) -> std::result::Result<Value, BoxError> + Send + Sync>;

/// Rebuilds an instance from a decoded memento payload.
pub type Reconstruct =
    Arc<dyn Fn(Value) -> std::result::Result<Arc<dyn Instance>, BoxError> + Send + Sync>;

/// Codec capability of a registered class.
///
/// Reconstruction is mandatory. The memento producer is optional; without it
/// the reflective [`default_memento`](crate::memento::default_memento) is used.
#[derive(Clone)]
pub struct ObjectCodec {
    produce_memento: Option<ProduceMemento>,
    reconstruct: Reconstruct,
}

impl ObjectCodec {
    pub fn new<T, F>(reconstruct: F) -> Self
    where
        T: Instance,
        F: Fn(Value) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            produce_memento: None,
            reconstruct: Arc::new(move |payload: Value| {
                reconstruct(payload).map(|instance| Arc::new(instance) as Arc<dyn Instance>)
            }),
        }
    }

    /// Attaches a custom memento producer for instances of `T`.
    ///
    /// An instance registered under this class name whose concrete type is
    /// not `T` fails to encode.
    pub fn with_memento<T, F>(mut self, produce: F) -> Self
    where
        T: Instance,
        F: Fn(&T) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.produce_memento = Some(Arc::new(move |instance: &dyn Instance| {
            match instance.as_any().downcast_ref::<T>() {
                Some(instance) => produce(instance),
                None => Err(format!(
                    "instance registered as {:?} is not a {}",
                    instance.type_name(),
                    std::any::type_name::<T>()
                )
                .into()),
            }
        }));
        self
    }

    pub fn produce_memento(&self) -> Option<&ProduceMemento> {
        self.produce_memento.as_ref()
    }

    /// Runs the reconstruction capability. Its error is passed through as is.
    pub fn reconstruct(&self, payload: Value) -> Result<Arc<dyn Instance>> {
        (self.reconstruct)(payload).map_err(MementoError::Application)
    }
}

impl fmt::Debug for ObjectCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCodec")
            .field("custom_memento", &self.produce_memento.is_some())
            .finish_non_exhaustive()
    }
}

/// Frozen registry of object codecs and enumeration members.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    objects: HashMap<String, ObjectCodec>,
    enums: HashMap<String, BTreeSet<String>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn lookup_object(&self, name: &str) -> Option<&ObjectCodec> {
        self.objects.get(name)
    }

    pub fn lookup_enum(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.enums.get(name)
    }

    /// Resolves `enum_name.member` against the registered enumerations.
    ///
    /// `Ok(None)` when the enumeration is not registered; an error when it is
    /// registered but has no such member.
    pub fn resolve_enum_member(&self, enum_name: &str, member: &str) -> Result<Option<EnumMember>> {
        let Some(members) = self.lookup_enum(enum_name) else {
            return Ok(None);
        };
        if !members.contains(member) {
            return Err(MementoError::UnknownEnumMember {
                enum_name: enum_name.to_string(),
                member: member.to_string(),
            });
        }
        Ok(Some(EnumMember::new(enum_name, member)))
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.enums.is_empty()
    }

    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(self)
    }

    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(self)
    }

    /// Transforms `value` into a plain tree.
    pub fn to_plain(&self, value: &Value) -> Result<Value> {
        self.encoder().to_plain(value)
    }

    /// Rebuilds registered objects and enums from a plain tree.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_plain(&self, value: &Value) -> Result<Value> {
        self.decoder().from_plain(value)
    }

    /// Encodes `value` all the way to JSON text.
    pub fn encode_json(&self, value: &Value) -> Result<String> {
        let plain = self.to_plain(value)?;
        Ok(serde_json::to_string(&plain)?)
    }

    /// Parses JSON text and decodes it.
    pub fn decode_json(&self, text: &str) -> Result<Value> {
        let plain: Value = serde_json::from_str(text)?;
        self.from_plain(&plain)
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class. A later registration under the same name wins.
    pub fn register_object(mut self, name: impl Into<String>, codec: ObjectCodec) -> Self {
        let name = name.into();
        if self.registry.objects.insert(name.clone(), codec).is_some() {
            warn!(class = %name, "object class registered twice, keeping the last codec");
        }
        self
    }

    /// Registers an enumeration and its member names.
    pub fn register_enum<I, S>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let members = members.into_iter().map(Into::into).collect();
        if self.registry.enums.insert(name.clone(), members).is_some() {
            warn!(enumeration = %name, "enumeration registered twice, keeping the last members");
        }
        self
    }

    pub fn register_public_enum<E: PublicEnum>(self) -> Self {
        self.register_enum(E::NAME, E::members().iter().copied())
    }

    /// Applies enumerations declared in configuration.
    pub fn with_config(self, config: RegistryConfig) -> Self {
        config
            .enums
            .into_iter()
            .fold(self, |builder, (name, members)| builder.register_enum(name, members))
    }

    pub fn build(self) -> Registry {
        debug!(
            objects = self.registry.objects.len(),
            enums = self.registry.enums.len(),
            "registry built"
        );
        self.registry
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Installs the process-wide registry.
///
/// Succeeds once. Any later call, or a call after [`global`] has already been
/// read, fails with [`MementoError::AlreadyInstalled`].
pub fn install(registry: Registry) -> Result<&'static Registry> {
    GLOBAL
        .set(registry)
        .map_err(|_| MementoError::AlreadyInstalled)?;
    debug!("process-wide registry installed");
    Ok(global())
}

/// The process-wide registry. Reading it before [`install`] freezes an empty
/// registry in place.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::default)
}
