//! Recursive masking of sensitive mapping entries.
//!
//! A mapping is the masking unit. When an entry's key is sensitive its value
//! is replaced by [`REDACTION_MARKER`] as a whole, without looking inside it.
//! Every other value is walked depth-first. Scalars are returned as they are,
//! since a scalar only gets masked when it sits under a sensitive key.
//!
//! Two entry points make the ownership contract explicit:
//!
//! - [`Masker::mask_copy`] borrows the input and returns a fresh structure.
//! - [`Masker::mask_in_place`] takes `&mut`, so the caller must own the value
//!   exclusively for the duration of the call.

use crate::keys::SensitiveKeys;
use crate::value::{Map, Value};
use once_cell::sync::Lazy;

/// Placeholder that replaces every masked value, whatever its original type.
pub const REDACTION_MARKER: &str = "****";

static DEFAULT_MASKER: Lazy<Masker> = Lazy::new(Masker::default);

/// Masks sensitive entries using an immutable set of field names.
#[derive(Debug, Clone, Default)]
pub struct Masker {
    keys: SensitiveKeys,
}

impl Masker {
    pub fn new(keys: SensitiveKeys) -> Self {
        Self { keys }
    }

    /// The shared masker over the default sensitive names.
    pub fn global() -> &'static Masker {
        &DEFAULT_MASKER
    }

    pub fn keys(&self) -> &SensitiveKeys {
        &self.keys
    }

    /// Whether an entry under `key` would be masked.
    pub fn is_sensitive(&self, key: &str, extra: &[&str]) -> bool {
        self.keys.contains(key, extra)
    }

    /// Return a masked copy of `value`. The input is never modified.
    ///
    /// Sensitive subtrees are not cloned, only replaced.
    pub fn mask_copy(&self, value: &Value, extra: &[&str]) -> Value {
        match value {
            Value::List(items) => Value::List(self.mask_items(items, extra)),
            Value::Tuple(items) => Value::Tuple(self.mask_items(items, extra)),
            Value::Map(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| {
                        let masked = if self.is_sensitive(k, extra) {
                            marker()
                        } else {
                            self.mask_copy(v, extra)
                        };
                        (k.clone(), masked)
                    })
                    .collect(),
            ),
            scalar => scalar.clone(),
        }
    }

    /// Mask `value` in place.
    pub fn mask_in_place(&self, value: &mut Value, extra: &[&str]) {
        match value {
            Value::List(items) | Value::Tuple(items) => {
                for item in items {
                    self.mask_in_place(item, extra);
                }
            }
            Value::Map(map) => self.mask_map_in_place(map, extra),
            _ => {}
        }
    }

    /// Mask an owned value and hand it back.
    pub fn mask_owned(&self, mut value: Value, extra: &[&str]) -> Value {
        self.mask_in_place(&mut value, extra);
        value
    }

    /// Mask the entries of a mapping in place.
    pub fn mask_map_in_place(&self, map: &mut Map, extra: &[&str]) {
        for (k, v) in map.iter_mut() {
            if self.is_sensitive(k, extra) {
                *v = marker();
            } else {
                self.mask_in_place(v, extra);
            }
        }
    }

    /// Return a masked copy of a plain JSON tree.
    ///
    /// Arrays are treated as sequences and objects as mappings.
    pub fn mask_json(&self, value: &serde_json::Value, extra: &[&str]) -> serde_json::Value {
        let mut out = value.clone();
        self.mask_json_in_place(&mut out, extra);
        out
    }

    /// Mask a plain JSON tree in place.
    pub fn mask_json_in_place(&self, value: &mut serde_json::Value, extra: &[&str]) {
        match value {
            serde_json::Value::Array(items) => {
                for item in items {
                    self.mask_json_in_place(item, extra);
                }
            }
            serde_json::Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    if self.is_sensitive(k, extra) {
                        *v = serde_json::Value::String(REDACTION_MARKER.to_string());
                    } else {
                        self.mask_json_in_place(v, extra);
                    }
                }
            }
            _ => {}
        }
    }

    /// Mask every JSON object or array embedded in free text.
    ///
    /// Text outside those documents is kept byte for byte. A document with
    /// nothing to mask is kept as written; one with masked entries is
    /// re-serialized compactly.
    ///
    /// ```
    /// use gw_redact::Masker;
    ///
    /// let text = r#"payload {"access_token": "t0k"} [INFO]"#;
    /// assert_eq!(
    ///     Masker::default().mask_text(text, &[]),
    ///     r#"payload {"access_token":"****"} [INFO]"#
    /// );
    /// ```
    pub fn mask_text(&self, text: &str, extra: &[&str]) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(['{', '[']) {
            out.push_str(&rest[..start]);
            let candidate = &rest[start..];

            let mut stream =
                serde_json::Deserializer::from_str(candidate).into_iter::<serde_json::Value>();
            match stream.next() {
                Some(Ok(document)) if document.is_object() || document.is_array() => {
                    let end = stream.byte_offset();
                    let masked = self.mask_json(&document, extra);
                    if masked == document {
                        out.push_str(&candidate[..end]);
                    } else {
                        out.push_str(&masked.to_string());
                    }
                    rest = &candidate[end..];
                }
                _ => {
                    // Brackets are one byte wide.
                    out.push_str(&candidate[..1]);
                    rest = &candidate[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn mask_items(&self, items: &[Value], extra: &[&str]) -> Vec<Value> {
        items.iter().map(|item| self.mask_copy(item, extra)).collect()
    }
}

fn marker() -> Value {
    Value::String(REDACTION_MARKER.to_string())
}

/// Masked copy of `value` using the default sensitive names.
pub fn mask_copy(value: &Value, extra: &[&str]) -> Value {
    Masker::global().mask_copy(value, extra)
}

/// Mask `value` in place using the default sensitive names.
pub fn mask_in_place(value: &mut Value, extra: &[&str]) {
    Masker::global().mask_in_place(value, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Decimal;

    fn dec(s: &str) -> Value {
        Value::Decimal(s.parse::<Decimal>().unwrap())
    }

    #[test]
    fn test_scalars_unchanged() {
        let m = Masker::default();
        for v in [
            Value::Null,
            Value::Bool(true),
            Value::Int(3),
            Value::Float(3.142),
            dec("3.142"),
            Value::from("abc"),
        ] {
            assert_eq!(m.mask_copy(&v, &[]), v);
        }
    }

    #[test]
    fn test_list() {
        let m = Masker::default();
        assert_eq!(m.mask_copy(&Value::List(vec![]), &[]), Value::List(vec![]));
        let v = Value::List(vec![Value::Float(-30.010), dec("-30.010"), Value::from("")]);
        assert_eq!(m.mask_copy(&v, &[]), v);
    }

    #[test]
    fn test_tuple_stays_tuple() {
        let m = Masker::default();
        let v = Value::Tuple(vec![Value::Bool(false), Value::Int(0)]);
        let masked = m.mask_copy(&v, &[]);
        assert!(matches!(masked, Value::Tuple(ref items) if items.len() == 2));
        assert_eq!(masked, v);
    }

    #[test]
    fn test_map_masks_sensitive_key() {
        let m = Masker::default();
        let v = Value::map([("b", Value::Bool(false)), ("password", Value::Int(0))]);
        assert_eq!(
            m.mask_copy(&v, &[]),
            Value::map([("b", Value::Bool(false)), ("password", Value::from("****"))])
        );
    }

    #[test]
    fn test_extra_keys() {
        let m = Masker::default();
        let v = Value::map([
            ("code", Value::Float(-30.010)),
            ("jti", dec("-30.010")),
            ("api-key", Value::from("")),
        ]);
        let masked = m.mask_copy(&v, &["api-key"]);
        assert_eq!(
            masked,
            Value::map([("code", "****"), ("jti", "****"), ("api-key", "****")])
        );
    }

    #[test]
    fn test_sensitive_subtree_replaced_whole() {
        let m = Masker::default();
        let v = Value::map([(
            "password",
            Value::map([("nested", Value::from("x")), ("jti", Value::Int(1))]),
        )]);
        assert_eq!(m.mask_copy(&v, &[]), Value::map([("password", "****")]));
    }

    #[test]
    fn test_nested_in_list() {
        let m = Masker::default();
        let v = Value::List(vec![Value::map([("access_token", "t"), ("user", "u")])]);
        assert_eq!(
            m.mask_copy(&v, &[]),
            Value::List(vec![Value::map([("access_token", "****"), ("user", "u")])])
        );
    }

    #[test]
    fn test_copy_leaves_input_alone() {
        let m = Masker::default();
        let v = Value::map([("password", "hunter2")]);
        let _ = m.mask_copy(&v, &[]);
        assert_eq!(v.get("password").and_then(Value::as_str), Some("hunter2"));
    }

    #[test]
    fn test_in_place_matches_copy() {
        let m = Masker::default();
        let original = Value::map([
            ("a", Value::List(vec![Value::map([("code", "123456")])])),
            ("b", Value::Tuple(vec![Value::map([("jti", 1)])])),
        ]);
        let copied = m.mask_copy(&original, &[]);
        let mut owned = original.clone();
        m.mask_in_place(&mut owned, &[]);
        assert_eq!(copied, owned);
        assert_eq!(m.mask_owned(original, &[]), copied);
    }

    #[test]
    fn test_mask_json() {
        let m = Masker::default();
        let v = serde_json::json!({"headers": {"x-api-key": "k", "Host": "h"}, "list": [{"code": 1}]});
        let masked = m.mask_json(&v, &[]);
        assert_eq!(
            masked,
            serde_json::json!({"headers": {"x-api-key": "****", "Host": "h"}, "list": [{"code": "****"}]})
        );
        assert_eq!(v["headers"]["x-api-key"], "k");
    }

    #[test]
    fn test_mask_text_whole_document() {
        let m = Masker::default();
        assert_eq!(
            m.mask_text(r#"{"email":"a@example.com","password":"hunter2"}"#, &[]),
            r#"{"email":"a@example.com","password":"****"}"#
        );
        assert_eq!(
            m.mask_text(r#"[{"jti": 1}, {"n": 2}]"#, &[]),
            r#"[{"jti":"****"},{"n":2}]"#
        );
    }

    #[test]
    fn test_mask_text_embedded_documents() {
        let m = Masker::default();
        let text = r#"user {"code": "123456"} then {"refresh_token": "r"} done"#;
        assert_eq!(
            m.mask_text(text, &[]),
            r#"user {"code":"****"} then {"refresh_token":"****"} done"#
        );
    }

    #[test]
    fn test_mask_text_keeps_plain_text() {
        let m = Masker::default();
        for text in [
            "",
            "no json here",
            "[INFO] started {",
            r#"kept as written: {"user": "alice"}"#,
            "unbalanced [[{ ] }",
        ] {
            assert_eq!(m.mask_text(text, &[]), text);
        }
    }

    #[test]
    fn test_mask_text_extra_and_unicode() {
        let m = Masker::default();
        assert_eq!(
            m.mask_text(r#"ünïcode {"ssn": "078"} ✓"#, &["ssn"]),
            r#"ünïcode {"ssn":"****"} ✓"#
        );
    }

    #[test]
    fn test_custom_key_set() {
        let m = Masker::new(SensitiveKeys::from_names(["ssn"]));
        let v = Value::map([("ssn", "123"), ("password", "p")]);
        assert_eq!(
            m.mask_copy(&v, &[]),
            Value::map([("ssn", "****"), ("password", "p")])
        );
    }

    #[test]
    fn test_free_functions_use_defaults() {
        let mut v = Value::map([("refresh_token", "r")]);
        assert_eq!(mask_copy(&v, &[]), Value::map([("refresh_token", "****")]));
        mask_in_place(&mut v, &[]);
        assert_eq!(v, Value::map([("refresh_token", "****")]));
    }
}
