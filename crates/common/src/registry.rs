//! In-memory registry mapping key ids to signing secrets.
//!
//! The registry is populated once at configuration time and read-only on the
//! verification path. It resolves "which key material and algorithm should
//! check this request's signature" and nothing else: no expiry, no fallback
//! key, no validation of the material itself.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::SignatureError;

/// Opaque identifier selecting which secret signs or verifies a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct KeyId(String);

impl From<&str> for KeyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for KeyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for KeyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Cryptographic primitive a secret is used with.
///
/// This is a capability reference only: the digest computation itself lives in
/// the signature layer on top of this crate, keyed off this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    HmacSha256,
    HmacSha512,
    Ed25519,
}

impl Algorithm {
    /// Stable lowercase name used in configuration files.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::HmacSha256 => "hmac-sha256",
            Self::HmacSha512 => "hmac-sha512",
            Self::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Algorithm {
    type Err = SignatureError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "hmac-sha256" => Ok(Self::HmacSha256),
            "hmac-sha512" => Ok(Self::HmacSha512),
            "ed25519" => Ok(Self::Ed25519),
            other => Err(SignatureError::Configuration {
                message: format!("Unknown signing algorithm '{}'", other),
            }),
        }
    }
}

/// Signing material plus the algorithm it is used with.
///
/// Immutable once constructed. The key encoding is algorithm-dependent and
/// not validated at this layer; empty keys are accepted here and fail later
/// in whatever primitive consumes them.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    key: String,
    algorithm: Algorithm,
}

impl Secret {
    pub fn new(key: impl Into<String>, algorithm: Algorithm) -> Self {
        Self {
            key: key.into(),
            algorithm,
        }
    }

    /// Raw key material. Callers must not log or otherwise leak this.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl fmt::Debug for Secret {
    // Key material must never end up in logs via {:?}.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Mapping from [`KeyId`] to an exclusively-owned [`Secret`].
///
/// Build it once from configuration, then share it immutably across request
/// handlers. For rotation, publish a whole new registry through
/// [`crate::rotation::SharedRegistry`] instead of mutating this one in place.
#[derive(Debug, Default, Clone)]
pub struct SecretRegistry {
    secrets: HashMap<KeyId, Secret>,
}

impl SecretRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from `(key id, secret)` pairs. Duplicate ids follow
    /// map semantics: the last pair wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (KeyId, Secret)>) -> Self {
        Self {
            secrets: pairs.into_iter().collect(),
        }
    }

    /// Resolves the secret registered under `id`.
    ///
    /// Absence is a normal outcome, not an error: callers must map `None` to
    /// an authentication failure, never to a default key.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&Secret> {
        self.secrets.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Registered key ids, in unspecified order.
    pub fn key_ids(&self) -> impl Iterator<Item = &KeyId> {
        self.secrets.keys()
    }

    /// Registered `(key id, secret)` pairs, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyId, &Secret)> {
        self.secrets.iter()
    }
}

impl FromIterator<(KeyId, Secret)> for SecretRegistry {
    fn from_iter<I: IntoIterator<Item = (KeyId, Secret)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_registered_secret() {
        let registry = SecretRegistry::from_pairs([(
            KeyId::from("key1"),
            Secret::new("secret1", Algorithm::HmacSha256),
        )]);

        let secret = registry.lookup("key1").expect("key1 should resolve");
        assert_eq!(secret.key(), "secret1");
        assert_eq!(secret.algorithm(), Algorithm::HmacSha256);
        assert!(registry.lookup("key2").is_none());
    }

    #[test]
    fn empty_registry_misses_every_lookup() {
        let registry = SecretRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("").is_none());
        assert!(registry.lookup("key1").is_none());
    }

    #[test]
    fn duplicate_key_id_last_write_wins() {
        let registry = SecretRegistry::from_pairs([
            (
                KeyId::from("key1"),
                Secret::new("old", Algorithm::HmacSha256),
            ),
            (
                KeyId::from("key1"),
                Secret::new("new", Algorithm::HmacSha512),
            ),
        ]);

        assert_eq!(registry.len(), 1);
        let secret = registry.lookup("key1").expect("key1 should resolve");
        assert_eq!(secret.key(), "new");
        assert_eq!(secret.algorithm(), Algorithm::HmacSha512);
    }

    #[test]
    fn any_string_is_a_legal_key_id() {
        let registry = SecretRegistry::from_pairs([
            (KeyId::from(""), Secret::new("empty", Algorithm::Ed25519)),
            (
                KeyId::from("spaces and ünicode"),
                Secret::new("odd", Algorithm::HmacSha256),
            ),
        ]);

        assert!(registry.lookup("").is_some());
        assert!(registry.lookup("spaces and ünicode").is_some());
    }

    #[test]
    fn secret_debug_redacts_key_material() {
        let secret = Secret::new("super-secret-material", Algorithm::HmacSha256);
        let debug = format!("{:?}", secret);

        assert!(!debug.contains("super-secret-material"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("HmacSha256"));
    }

    #[test]
    fn algorithm_wire_names_round_trip() {
        for algorithm in [
            Algorithm::HmacSha256,
            Algorithm::HmacSha512,
            Algorithm::Ed25519,
        ] {
            let parsed: Algorithm = algorithm.wire_name().parse().expect("should parse");
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn unknown_algorithm_name_is_a_configuration_error() {
        let err = "hmac-md5".parse::<Algorithm>().expect_err("should reject");
        assert!(matches!(err, SignatureError::Configuration { .. }));
        assert!(err.to_string().contains("hmac-md5"));
    }
}
