//! Sensitive field names.
//!
//! Membership is exact, case-sensitive equality on a mapping key. Paths and
//! values are never inspected.

use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// Field names whose values are always redacted.
pub const DEFAULT_SENSITIVE_KEYS: &[&str] = &[
    "Postman-Token",
    "x-api-key",
    "apiKey",
    "apiKeyId",
    "accessKey",
    "password",
    "session_token",
    "code",
    "refresh_token",
    "access_token",
    "jti",
    "verification_code",
    "authorizationToken",
];

static DEFAULT_KEYS: Lazy<SensitiveKeys> = Lazy::new(SensitiveKeys::new);

/// An immutable set of sensitive field names.
///
/// Built once at startup and shared read-only. Names that only matter for a
/// single call are passed to the masker as an `extra` slice instead of being
/// added here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveKeys {
    names: BTreeSet<String>,
}

impl SensitiveKeys {
    /// The default set.
    pub fn new() -> Self {
        Self::from_names(DEFAULT_SENSITIVE_KEYS.iter().copied())
    }

    /// A set containing exactly `names`.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The default set plus `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys = Self::new();
        keys.names.extend(extra.into_iter().map(Into::into));
        keys
    }

    /// The shared process-wide default set.
    pub fn global() -> &'static SensitiveKeys {
        &DEFAULT_KEYS
    }

    /// Whether `key` is sensitive, considering this set and the per-call
    /// `extra` names.
    pub fn contains(&self, key: &str, extra: &[&str]) -> bool {
        self.names.contains(key) || extra.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for SensitiveKeys {
    fn default() -> Self {
        Self::new()
    }
}
