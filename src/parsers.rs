//! Built-in parser functions
//!
//! Only [`json`] is registered out of the box. [`toml_doc`] and [`yaml`]
//! are ready to hand to [`ParserRegistry::register`](crate::ParserRegistry::register)
//! for applications that accept those formats.

use crate::registry::ParseFailure;
use serde_json::Value;

/// Parse a JSON document.
pub fn json(text: &str) -> Result<Value, ParseFailure> {
    Ok(serde_json::from_str(text)?)
}

/// Parse a TOML document into the common JSON data model.
pub fn toml_doc(text: &str) -> Result<Value, ParseFailure> {
    let value: toml::Value = toml::from_str(text)?;
    Ok(serde_json::to_value(value)?)
}

/// Parse a YAML document into the common JSON data model.
pub fn yaml(text: &str) -> Result<Value, ParseFailure> {
    Ok(serde_yaml::from_str(text)?)
}
