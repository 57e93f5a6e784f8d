//! Option-contract utilities for request parameters.
//!
//! Every resource operation declares a default option mapping and merges the
//! caller's overrides into it with [`merge_defaults`], which rejects keys the
//! operation never declared. Subsets of the merged mapping are carved out with
//! [`select_from`] (or [`select_from_with`] when derived keys must be added),
//! and [`camelize_keys`] renames snake_case option names to their camelCase
//! wire form. All of this happens before any I/O, so a typo in an option name
//! fails at the call site instead of being silently dropped.
//!
//! ## Examples
//!
//! ```rust
//! use candlepin_client::options::merge_defaults;
//! use serde_json::json;
//!
//! let merged = merge_defaults(
//!     json!({ "name": "box" }),
//!     json!({ "name": null, "owner": "admin" }),
//! ).unwrap();
//! assert_eq!(merged["name"], "box");
//! assert_eq!(merged["owner"], "admin");
//! ```

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A per-call option mapping, JSON-shaped end to end.
pub type RequestOptions = Map<String, Value>;

/// Merge supplied options over a declared default mapping.
///
/// Both arguments must be JSON objects. Every key of `defaults` is present in
/// the result; supplied values win. A supplied key that `defaults` does not
/// declare is a contract violation and fails with [`Error::UnknownOptions`],
/// so a typo like `"nmae"` for `"name"` surfaces instead of being silently
/// ignored.
pub fn merge_defaults(supplied: Value, defaults: Value) -> Result<RequestOptions> {
    let supplied = into_object(supplied)?;
    let defaults = into_object(defaults)?;

    let unknown: Vec<String> = supplied
        .keys()
        .filter(|key| !defaults.contains_key(*key))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(Error::UnknownOptions { keys: unknown });
    }

    let mut merged = defaults;
    for (key, value) in supplied {
        merged.insert(key, value);
    }
    Ok(merged)
}

/// Restrict `source` to exactly `keys`, preserving values.
///
/// ## Errors
///
/// Fails with [`Error::MissingKeys`] if any requested key is absent.
pub fn select_from(source: &RequestOptions, keys: &[&str]) -> Result<RequestOptions> {
    select_from_with(source, keys, |_, _| {})
}

/// Like [`select_from`], but yields the subset and the full source to a hook
/// so callers can derive additional keys, e.g. a nested field conditioned on
/// an option that is not itself copied through.
pub fn select_from_with(
    source: &RequestOptions,
    keys: &[&str],
    hook: impl FnOnce(&mut RequestOptions, &RequestOptions),
) -> Result<RequestOptions> {
    let missing: Vec<String> = keys
        .iter()
        .filter(|key| !source.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingKeys { keys: missing });
    }

    let mut subset = RequestOptions::new();
    for key in keys {
        if let Some(value) = source.get(*key) {
            subset.insert((*key).to_string(), value.clone());
        }
    }
    hook(&mut subset, source);
    Ok(subset)
}

/// Convert a snake_case token to camelCase: `service_level` → `serviceLevel`.
/// Tokens without separators pass through unchanged.
pub fn camel_case(token: &str) -> String {
    let mut parts = token.split('_');
    let mut out = String::from(parts.next().unwrap_or(""));
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// Rename every key of `options` with [`camel_case`]; values are untouched.
pub fn camelize_keys(options: &RequestOptions) -> RequestOptions {
    options
        .iter()
        .map(|(key, value)| (camel_case(key), value.clone()))
        .collect()
}

fn into_object(value: Value) -> Result<RequestOptions> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Configuration {
            message: format!("options must be a JSON object, got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_merge_defaults_applies_overrides() {
        let merged = merge_defaults(
            json!({ "name": "box", "facts": { "arch": "x86_64" } }),
            json!({ "name": null, "facts": {}, "owner": "admin" }),
        )
        .unwrap();

        assert_eq!(merged.len(), 3);
        assert_eq!(merged["name"], "box");
        assert_eq!(merged["facts"]["arch"], "x86_64");
        assert_eq!(merged["owner"], "admin");
    }

    #[test]
    fn test_merge_defaults_keeps_null_overrides() {
        let merged = merge_defaults(json!({ "owner": null }), json!({ "owner": "admin" })).unwrap();
        assert_eq!(merged["owner"], Value::Null);
    }

    #[test]
    fn test_merge_defaults_rejects_unknown_keys() {
        let err = merge_defaults(json!({ "nsme": "typo" }), json!({ "name": null })).unwrap_err();
        match err {
            Error::UnknownOptions { keys } => assert_eq!(keys, vec!["nsme"]),
            other => panic!("expected UnknownOptions, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_defaults_rejects_non_objects() {
        let err = merge_defaults(json!([1, 2]), json!({})).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_select_from_returns_exact_subset() {
        let source = merge_defaults(
            json!({}),
            json!({ "hello": "world", "goodbye": "bye", "extra": 1 }),
        )
        .unwrap();

        let subset = select_from(&source, &["hello", "extra"]).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset["hello"], "world");
        assert_eq!(subset["extra"], 1);
    }

    #[test]
    fn test_select_from_reports_missing_keys() {
        let source = merge_defaults(json!({}), json!({ "hello": "world" })).unwrap();
        let err = select_from(&source, &["hello", "send_off"]).unwrap_err();
        match err {
            Error::MissingKeys { keys } => assert_eq!(keys, vec!["send_off"]),
            other => panic!("expected MissingKeys, got {other:?}"),
        }
    }

    #[test]
    fn test_select_from_with_derives_keys_from_source() {
        let source = merge_defaults(
            json!({}),
            json!({ "hello": "world", "goodbye": "bye" }),
        )
        .unwrap();

        let subset = select_from_with(&source, &["hello"], |subset, source| {
            if let Some(farewell) = source.get("goodbye").and_then(Value::as_str) {
                subset.insert("send_off".to_string(), json!(farewell.to_uppercase()));
            }
        })
        .unwrap();

        assert_eq!(subset["hello"], "world");
        assert_eq!(subset["send_off"], "BYE");
    }

    #[test]
    fn test_camel_case_conversion() {
        assert_eq!(camel_case("service_level"), "serviceLevel");
        assert_eq!(camel_case("guest_id"), "guestId");
        assert_eq!(camel_case("super_admin"), "superAdmin");
    }

    #[test]
    fn test_camel_case_idempotent_without_separators() {
        assert_eq!(camel_case("serviceLevel"), "serviceLevel");
        assert_eq!(camel_case("name"), "name");
    }

    #[test]
    fn test_camelize_keys_preserves_values_and_count() {
        let options = merge_defaults(
            json!({}),
            json!({ "service_level": "premium", "guest_ids": [1, 2], "name": "box" }),
        )
        .unwrap();

        let camelized = camelize_keys(&options);
        assert_eq!(camelized.len(), options.len());
        assert_eq!(camelized["serviceLevel"], "premium");
        assert_eq!(camelized["guestIds"], json!([1, 2]));
        assert_eq!(camelized["name"], "box");
    }
}
