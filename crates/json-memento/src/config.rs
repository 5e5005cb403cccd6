//! Registry configuration loaded from data.
//!
//! Enumerations are plain name lists, so they can be declared in a JSON
//! document instead of code:
//!
//! ```
//! use json_memento::{Registry, RegistryConfig};
//!
//! let config = RegistryConfig::from_json_str(r#"{"enums": {"Color": ["RED", "GREEN"]}}"#).unwrap();
//! let registry = Registry::builder().with_config(config).build();
//! assert!(registry.lookup_enum("Color").unwrap().contains("GREEN"));
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Enumeration name to member names.
    pub enums: BTreeMap<String, Vec<String>>,
}

impl RegistryConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
