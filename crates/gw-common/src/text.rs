//! String helpers for request fields and generated names.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// `snake_case` to `PascalCase`: `hello_world_123_abc` becomes
/// `HelloWorld123Abc`.
pub fn snake_to_pascal(src: &str) -> String {
    src.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// A string trimmed of surrounding whitespace when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrimmedString(String);

impl TrimmedString {
    pub fn new(s: &str) -> Self {
        TrimmedString(s.trim().to_string())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for TrimmedString {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TrimmedString {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for TrimmedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TrimmedString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct TrimmedStringVisitor;

impl<'de> Visitor<'de> for TrimmedStringVisitor {
    type Value = TrimmedString;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(TrimmedString::new(value))
    }
}

impl<'de> Deserialize<'de> for TrimmedString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TrimmedStringVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_to_pascal() {
        assert_eq!(snake_to_pascal("hello"), "Hello");
        assert_eq!(snake_to_pascal("hello_world"), "HelloWorld");
        assert_eq!(snake_to_pascal("hello_world_123"), "HelloWorld123");
        assert_eq!(snake_to_pascal("hello_world_123_abc"), "HelloWorld123Abc");
        assert_eq!(snake_to_pascal("double__underscore"), "DoubleUnderscore");
        assert_eq!(snake_to_pascal(""), "");
    }

    #[test]
    fn test_trimmed_string_deserialize() {
        #[derive(Deserialize)]
        struct Req {
            email: TrimmedString,
        }
        let req: Req = serde_json::from_str(r#"{"email": "  a@example.com\n"}"#).unwrap();
        assert_eq!(req.email.as_str(), "a@example.com");
    }

    #[test]
    fn test_trimmed_string_serialize() {
        let s = TrimmedString::new(" x ");
        assert_eq!(serde_json::to_string(&s).unwrap(), r#""x""#);
        assert_eq!(s.to_string(), "x");
    }

    #[test]
    fn test_trimmed_string_rejects_non_string() {
        assert!(serde_json::from_str::<TrimmedString>("42").is_err());
    }
}
