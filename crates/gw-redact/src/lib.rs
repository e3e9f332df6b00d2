//! Sensitive-field masking and secret derivation for request handlers.
//!
//! # Key Features
//!
//! - **Structural masking**: walks any [`Value`] and replaces the values of
//!   sensitive mapping keys with `****`. Matching is on exact key names only.
//! - **Explicit ownership**: [`Masker::mask_copy`] never touches its input,
//!   [`Masker::mask_in_place`] requires exclusive access.
//! - **Salted hashing**: scrypt-derived secret hashes with constant-time
//!   verification.
//! - **Verification codes**: uniformly random zero-padded digit strings from
//!   the OS random source.
//!
//! # Example
//!
//! ```
//! use gw_redact::{Masker, Value};
//!
//! let masker = Masker::default();
//! let event = Value::map([("user", "alice"), ("password", "hunter2")]);
//! let masked = masker.mask_copy(&event, &[]);
//! assert_eq!(masked.get("password").and_then(Value::as_str), Some("****"));
//! ```

pub mod error;
pub mod keys;
pub mod mask;
pub mod secret;
pub mod value;

pub use error::{RedactionError, Result};
pub use keys::{SensitiveKeys, DEFAULT_SENSITIVE_KEYS};
pub use mask::{mask_copy, mask_in_place, Masker, REDACTION_MARKER};
pub use secret::{
    gen_code, hash_secret, verify_secret, SecretHash, DEFAULT_CODE_WIDTH, MAX_CODE_WIDTH,
};
pub use value::{Decimal, Map, Value};
