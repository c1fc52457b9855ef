//! Patch overlay for device configurations.
//!
//! - Objects on both sides: merge by key (recursive)
//! - Anything else: the patch value replaces the original wholesale
//!
//! The merge consumes `original` and returns a new value, so no caller can
//! observe a half-merged configuration through a shared reference.

use serde_json::{Map, Value};

use super::error::ResolverError;

/// Maximum object nesting the merge will descend into.
pub const MAX_MERGE_DEPTH: usize = 64;

/// Overlays `patch` onto `original`.
///
/// Both arguments must be JSON objects. For each key in `patch`, if both sides
/// hold an object the two are merged recursively; otherwise the patch value wins.
/// Keys present only in `original` are kept as they are.
pub fn merge_configurations(original: Value, patch: Value) -> Result<Value, ResolverError> {
    match (original, patch) {
        (Value::Object(base), Value::Object(overlay)) => {
            Ok(Value::Object(merge_maps(base, overlay, 1)?))
        }
        (Value::Object(_), other) | (other, _) => Err(ResolverError::TypeMismatch {
            found: value_kind(&other),
        }),
    }
}

fn merge_maps(
    mut base: Map<String, Value>,
    overlay: Map<String, Value>,
    depth: usize,
) -> Result<Map<String, Value>, ResolverError> {
    if depth > MAX_MERGE_DEPTH {
        return Err(ResolverError::DepthExceeded {
            limit: MAX_MERGE_DEPTH,
        });
    }

    for (key, overlay_value) in overlay {
        let merged = match (base.remove(&key), overlay_value) {
            (Some(Value::Object(base_map)), Value::Object(overlay_map)) => {
                Value::Object(merge_maps(base_map, overlay_map, depth + 1)?)
            }
            (_, overlay_value) => overlay_value,
        };
        base.insert(key, merged);
    }

    Ok(base)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
