//! Error type shared by the encoder, decoder and registry.

use thiserror::Error;

/// Boxed error raised by application code: memento producers, reconstructors
/// and capability implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, MementoError>;

#[derive(Error, Debug)]
pub enum MementoError {
    /// A string carrying the enum marker that is not `__enum__.<Enum>.<Member>`.
    #[error("Malformed enum token: {0:?}")]
    MalformedEnumToken(String),

    #[error("Unknown member {member:?} of enum {enum_name:?}")]
    UnknownEnumMember { enum_name: String, member: String },

    /// The value cannot cross the JSON boundary.
    #[error("Value is not plain JSON: {0}")]
    NotPlain(String),

    #[error("A process-wide registry is already installed")]
    AlreadyInstalled,

    #[error("Array shape {shape:?} does not match {len} elements")]
    InvalidShape { shape: Vec<usize>, len: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Fault raised by application code, passed through untouched.
    #[error(transparent)]
    Application(BoxError),
}

impl MementoError {
    /// Wraps an application-level error.
    pub fn application<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        MementoError::Application(error.into())
    }
}
