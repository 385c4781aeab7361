//! Deep merge over the common JSON data model

use serde_json::Value;

/// Recursively merge `overlay` into `base`, with `overlay` winning on
/// conflicts.
///
/// Objects merge key by key; scalars and arrays are replaced wholesale by
/// the overlay. Arrays are not concatenated: a later config file redefines
/// a list, it does not extend it.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}
