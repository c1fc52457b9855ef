/// Turns a human-readable device identifier into a lookup key / filename stem.
/// Every character outside `[A-Za-z0-9]` becomes `_`, then the result is lowercased.
///
/// Replacement is per UTF-16 code unit, so a character outside the Basic
/// Multilingual Plane (e.g. an emoji) becomes `__`. Keys written by existing
/// deployments use the same rule.
pub fn normalize_key(value: &str) -> String {
    let mut key = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
        } else {
            key.extend(std::iter::repeat('_').take(c.len_utf16()));
        }
    }
    key
}
