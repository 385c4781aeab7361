//! Extension-keyed parser registry
//!
//! Maps lowercase file extensions (without the dot) to parser functions.
//! The registry is live shared state by contract: callers may add or
//! replace parsers at any time, including between calls on the same
//! loader, and lookups observe whatever state is current when a file is
//! selected. Mutation is guarded by a lock so concurrent edits stay
//! well-defined, but there is no ordering guarantee beyond that.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Error a parser function may return.
pub type ParseFailure = Box<dyn std::error::Error + Send + Sync>;

/// A parser converts decoded file text into structured data.
pub type ParseFn = dyn Fn(&str) -> std::result::Result<Value, ParseFailure> + Send + Sync;

pub struct ParserRegistry {
    inner: RwLock<HashMap<String, Arc<ParseFn>>>,
}

impl ParserRegistry {
    /// Registry with the stock JSON parser only.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register("json", crate::parsers::json);
        registry
    }

    /// Registry with no parsers at all.
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a parser under a file extension, replacing any existing
    /// entry. The extension is stored lowercased, without a leading dot.
    pub fn register<F>(&self, extension: &str, parser: F)
    where
        F: Fn(&str) -> std::result::Result<Value, ParseFailure> + Send + Sync + 'static,
    {
        let key = normalize(extension);
        debug!("Registering parser for .{}", key);
        self.write().insert(key, Arc::new(parser));
    }

    /// Remove the parser for an extension. Returns true if one was present.
    pub fn deregister(&self, extension: &str) -> bool {
        self.write().remove(&normalize(extension)).is_some()
    }

    /// Look up the parser for an extension, case-insensitively.
    pub fn get(&self, extension: &str) -> Option<Arc<ParseFn>> {
        self.read().get(&normalize(extension)).map(Arc::clone)
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.read().contains_key(&normalize(extension))
    }

    /// Currently registered extensions, unordered.
    pub fn extensions(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<ParseFn>>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<ParseFn>>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ParserRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: RwLock::new(self.read().clone()),
        }
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_registry_has_json() {
        let registry = ParserRegistry::new();
        assert!(registry.contains("json"));
        assert_eq!(registry.extensions(), vec!["json".to_string()]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = ParserRegistry::new();
        assert!(registry.contains("JSON"));
        assert!(registry.get("Json").is_some());
    }

    #[test]
    fn test_register_strips_leading_dot() {
        let registry = ParserRegistry::empty();
        registry.register(".yaml", crate::parsers::yaml);
        assert!(registry.contains("yaml"));
    }

    #[test]
    fn test_register_replaces_existing() {
        let registry = ParserRegistry::new();
        registry.register("json", |_text| Ok(json!({"replaced": true})));

        let parser = registry.get("json").unwrap();
        assert_eq!(parser("{}").unwrap(), json!({"replaced": true}));
    }

    #[test]
    fn test_deregister() {
        let registry = ParserRegistry::new();
        assert!(registry.deregister("json"));
        assert!(!registry.deregister("json"));
        assert!(!registry.contains("json"));
    }

    #[test]
    fn test_clone_shares_parsers_not_state() {
        let registry = ParserRegistry::new();
        let cloned = registry.clone();
        registry.register("yaml", crate::parsers::yaml);

        assert!(registry.contains("yaml"));
        assert!(!cloned.contains("yaml"));
    }
}
