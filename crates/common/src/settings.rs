//! Configuration loading for the verification core.
//!
//! Settings come from a TOML document with environment overrides
//! (`HTTPSIGN__<SECTION>__<FIELD>`), then build the two runtime components:
//! the secret registry and the date validator. All configuration mistakes
//! surface here, at build time, never on the per-request path.

use std::str::FromStr;

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use validator::Validate;

use crate::error::SignatureError;
use crate::registry::{Algorithm, KeyId, Secret, SecretRegistry};
use crate::validator::DateValidator;

const ENV_PREFIX: &str = "HTTPSIGN";

#[derive(Debug, Deserialize, Validate)]
pub struct Validation {
    /// Symmetric freshness tolerance in seconds. Must be strictly positive.
    #[validate(range(min = 1))]
    #[serde(default = "default_time_gap_secs")]
    pub time_gap_secs: u32,
}

fn default_time_gap_secs() -> u32 {
    30
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            time_gap_secs: default_time_gap_secs(),
        }
    }
}

/// One configured signer: key id, raw secret material, algorithm wire name.
#[derive(Debug, Deserialize)]
pub struct SigningKeyEntry {
    pub key_id: String,
    pub secret: String,
    pub algorithm: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Signing {
    #[serde(default)]
    pub keys: Vec<SigningKeyEntry>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub validation: Validation,
    #[serde(default)]
    pub signing: Signing,
}

impl Settings {
    /// Parses settings from a TOML string, applying environment overrides.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when the TOML is invalid, a field has
    /// the wrong shape, or validation fails (e.g. `time_gap_secs = 0`).
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<SignatureError>> {
        let environment = Environment::default()
            .prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .map_err(|e| {
                Report::new(SignatureError::Configuration {
                    message: format!("Failed to read settings: {}", e),
                })
            })?;

        let settings: Self = config.try_deserialize().map_err(|e| {
            Report::new(SignatureError::Configuration {
                message: format!("Failed to deserialize settings: {}", e),
            })
        })?;

        settings
            .validate()
            .change_context(SignatureError::Configuration {
                message: "Settings validation failed".to_string(),
            })?;

        Ok(settings)
    }

    /// Builds the secret registry from the configured signing keys.
    ///
    /// Duplicate key ids follow map semantics (last entry wins). An unknown
    /// algorithm name fails the whole build rather than skipping the entry.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error naming the offending key id when an
    /// algorithm wire name does not parse.
    pub fn build_registry(&self) -> Result<SecretRegistry, Report<SignatureError>> {
        let mut pairs = Vec::with_capacity(self.signing.keys.len());
        for entry in &self.signing.keys {
            let algorithm = Algorithm::from_str(&entry.algorithm)
                .attach(format!("while configuring key id '{}'", entry.key_id))?;
            pairs.push((
                KeyId::from(entry.key_id.as_str()),
                Secret::new(entry.secret.as_str(), algorithm),
            ));
        }

        let registry = SecretRegistry::from_pairs(pairs);
        log::info!("secret registry built with {} key(s)", registry.len());
        Ok(registry)
    }

    /// Builds the freshness validator from the configured time gap.
    #[must_use]
    pub fn build_validator(&self) -> DateValidator {
        DateValidator::with_time_gap(self.validation.time_gap_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tests::{crate_test_settings_str, create_test_settings};
    use chrono::TimeDelta;

    #[test]
    fn test_settings_from_valid_toml() {
        let settings = create_test_settings();

        assert_eq!(settings.validation.time_gap_secs, 30);
        assert_eq!(settings.signing.keys.len(), 2);
        assert_eq!(settings.signing.keys[0].key_id, "key1");
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let settings = Settings::from_toml("").expect("empty settings are legal");

        assert_eq!(settings.validation.time_gap_secs, 30);
        assert!(settings.signing.keys.is_empty());
        assert!(settings.build_registry().expect("should build").is_empty());
    }

    #[test]
    fn test_zero_time_gap_fails_validation() {
        let toml_str = r#"
            [validation]
            time_gap_secs = 0
            "#;

        let err = Settings::from_toml(toml_str).expect_err("should reject zero gap");
        assert!(matches!(
            err.current_context(),
            SignatureError::Configuration { .. }
        ));
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let toml_str = r#"
            [validation
            time_gap_secs = 30
            "#;

        assert!(Settings::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_build_registry_resolves_configured_keys() {
        let settings = Settings::from_toml(&crate_test_settings_str()).expect("should parse");
        let registry = settings.build_registry().expect("should build");

        assert_eq!(registry.len(), 2);
        let secret = registry.lookup("key1").expect("key1 should resolve");
        assert_eq!(secret.key(), "secret1");
        assert_eq!(secret.algorithm(), Algorithm::HmacSha256);
        assert!(registry.lookup("key3").is_none());
    }

    #[test]
    fn test_build_registry_rejects_unknown_algorithm() {
        let toml_str = r#"
            [[signing.keys]]
            key_id = "key1"
            secret = "secret1"
            algorithm = "rot13"
            "#;

        let settings = Settings::from_toml(toml_str).expect("should parse");
        let err = settings.build_registry().expect_err("should reject rot13");
        assert!(matches!(
            err.current_context(),
            SignatureError::Configuration { .. }
        ));
    }

    #[test]
    fn test_build_validator_uses_configured_gap() {
        let toml_str = r#"
            [validation]
            time_gap_secs = 120
            "#;

        let settings = Settings::from_toml(toml_str).expect("should parse");
        assert_eq!(
            settings.build_validator().time_gap(),
            TimeDelta::seconds(120)
        );
    }

    #[test]
    fn test_env_overrides_time_gap() {
        temp_env::with_var(
            "HTTPSIGN__VALIDATION__TIME_GAP_SECS",
            Some("45"),
            || {
                let settings =
                    Settings::from_toml(&crate_test_settings_str()).expect("should parse");
                assert_eq!(settings.validation.time_gap_secs, 45);
            },
        );
    }
}
