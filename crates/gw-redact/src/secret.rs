//! Salted secret hashing and numeric verification codes.
//!
//! Hashes use scrypt with fixed parameters. Changing any of them makes every
//! stored hash unverifiable, so the set is named by [`KDF_VERSION`] and a new
//! version must be introduced alongside the old one rather than replacing it.

use crate::error::{RedactionError, Result};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Identifier of the parameter set below.
pub const KDF_VERSION: &str = "scrypt-n16384-r8-p1-64";

/// log2 of the scrypt cost factor N (N = 16384).
pub const SCRYPT_LOG_N: u8 = 14;
/// scrypt block size r.
pub const SCRYPT_R: u32 = 8;
/// scrypt parallelism p.
pub const SCRYPT_P: u32 = 1;
/// Derived hash length in bytes.
pub const HASH_LEN: usize = 64;
/// Length of a freshly generated salt in bytes.
pub const SALT_LEN: usize = 32;

/// Default width of a verification code.
pub const DEFAULT_CODE_WIDTH: usize = 6;
/// Widest code [`gen_code`] will produce.
pub const MAX_CODE_WIDTH: usize = 65_536;

/// A derived hash and the salt it was derived with, both lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretHash {
    pub hash: String,
    pub salt: String,
}

impl SecretHash {
    /// Raw salt bytes decoded from the stored hex.
    pub fn salt_bytes(&self) -> Result<Vec<u8>> {
        hex::decode(&self.salt).map_err(|e| RedactionError::invalid(format!("salt is not hex: {}", e)))
    }
}

/// Hash `secret` with `salt`, or with 32 fresh random bytes when `salt` is
/// `None`.
///
/// Deterministic for a given `(secret, salt)` pair.
pub fn hash_secret(secret: &str, salt: Option<&[u8]>) -> Result<SecretHash> {
    if secret.is_empty() {
        return Err(RedactionError::invalid("secret cannot be empty"));
    }

    let salt = match salt {
        Some(salt) if !salt.is_empty() => salt.to_vec(),
        _ => random_bytes(SALT_LEN)?,
    };

    let hash = derive(secret, &salt)?;
    Ok(SecretHash {
        hash: hex::encode(hash),
        salt: hex::encode(salt),
    })
}

/// Check `secret` against a stored hash.
///
/// The comparison runs in constant time with respect to the hash contents.
pub fn verify_secret(secret: &str, stored: &SecretHash) -> Result<bool> {
    let expected = hex::decode(&stored.hash)
        .map_err(|e| RedactionError::invalid(format!("hash is not hex: {}", e)))?;
    let salt = stored.salt_bytes()?;
    if salt.is_empty() {
        return Err(RedactionError::invalid("stored salt is empty"));
    }

    let actual = derive(secret, &salt)?;
    Ok(bool::from(actual.as_slice().ct_eq(expected.as_slice())))
}

/// Generate a zero-padded decimal code of exactly `width` digits, uniform
/// over `[0, 10^width)`.
///
/// `width` must be between 1 and [`MAX_CODE_WIDTH`].
pub fn gen_code(width: usize) -> Result<String> {
    if width == 0 {
        return Err(RedactionError::invalid("code width must be positive"));
    }
    if width > MAX_CODE_WIDTH {
        return Err(RedactionError::invalid(format!(
            "code width {} exceeds maximum {}",
            width, MAX_CODE_WIDTH
        )));
    }

    let mut code = String::with_capacity(width);
    let mut buf = [0u8; 32];
    while code.len() < width {
        getrandom::getrandom(&mut buf)
            .map_err(|e| RedactionError::Random(format!("failed to read random bytes: {}", e)))?;
        // 250 is the largest multiple of 10 that fits in a byte; anything
        // above it would bias the low digits.
        for &b in buf.iter().filter(|&&b| b < 250) {
            if code.len() == width {
                break;
            }
            code.push(char::from(b'0' + b % 10));
        }
    }
    Ok(code)
}

fn derive(secret: &str, salt: &[u8]) -> Result<Vec<u8>> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, HASH_LEN)
        .map_err(|e| RedactionError::Kdf(format!("invalid scrypt params: {}", e)))?;
    let mut out = vec![0u8; HASH_LEN];
    scrypt::scrypt(secret.as_bytes(), salt, &params, &mut out)
        .map_err(|e| RedactionError::Kdf(format!("scrypt failed: {}", e)))?;
    Ok(out)
}

fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; len];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| RedactionError::Random(format!("failed to generate salt: {}", e)))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic_with_salt() {
        let salt = [7u8; 32];
        let a = hash_secret("correct horse", Some(&salt)).unwrap();
        let b = hash_secret("correct horse", Some(&salt)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.salt, hex::encode(salt));
    }

    #[test]
    fn test_hash_format() {
        let h = hash_secret("secret", None).unwrap();
        assert_eq!(h.hash.len(), HASH_LEN * 2);
        assert_eq!(h.salt.len(), SALT_LEN * 2);
        assert!(h
            .hash
            .chars()
            .chain(h.salt.chars())
            .all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_different_salt_different_hash() {
        let a = hash_secret("secret", Some(&[1u8; 32])).unwrap();
        let b = hash_secret("secret", Some(&[2u8; 32])).unwrap();
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = hash_secret("", None).unwrap_err();
        assert!(matches!(err, RedactionError::InvalidArgument(_)));
    }

    #[test]
    fn test_verify() {
        let stored = hash_secret("hunter2", None).unwrap();
        assert!(verify_secret("hunter2", &stored).unwrap());
        assert!(!verify_secret("hunter3", &stored).unwrap());
    }

    #[test]
    fn test_verify_rejects_bad_hex() {
        let stored = SecretHash {
            hash: "zz".to_string(),
            salt: "00".to_string(),
        };
        assert!(verify_secret("x", &stored).is_err());
    }

    #[test]
    fn test_verify_truncated_hash_is_false() {
        let mut stored = hash_secret("hunter2", None).unwrap();
        stored.hash.truncate(32);
        assert!(!verify_secret("hunter2", &stored).unwrap());
    }

    #[test]
    fn test_gen_code_width() {
        for width in [1, 2, 3, 6, 25] {
            let code = gen_code(width).unwrap();
            assert_eq!(code.len(), width);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_gen_code_width_limit() {
        assert_eq!(gen_code(MAX_CODE_WIDTH).unwrap().len(), MAX_CODE_WIDTH);
        for width in [MAX_CODE_WIDTH + 1, usize::MAX] {
            assert!(matches!(
                gen_code(width).unwrap_err(),
                RedactionError::InvalidArgument(_)
            ));
        }
    }

    #[test]
    fn test_gen_code_zero_width_rejected() {
        assert!(matches!(
            gen_code(0).unwrap_err(),
            RedactionError::InvalidArgument(_)
        ));
    }
}
