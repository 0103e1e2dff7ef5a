//! Two-gate authentication check for signed requests.
//!
//! Freshness and secret resolution are independent gates with no data flow
//! between them; both must pass before a request counts as authenticated.
//! Extracting the key id and computing the signature digest stay with the
//! HTTP-layer dispatcher.

use error_stack::Report;

use crate::error::SignatureError;
use crate::http_util::HeaderSource;
use crate::registry::{Secret, SecretRegistry};
use crate::validator::DateValidator;

/// Runs the freshness gate and the registry gate for one request.
///
/// Returns the resolved secret on success so the dispatcher can hand it to
/// its signature verifier. Failures are terminal for the request; mapping
/// them to a transport status (401/403) is the caller's job, honoring each
/// error's [`disclosure`](SignatureError::disclosure) classification.
///
/// # Errors
///
/// Any [`DateValidator::validate`] failure, or
/// [`SignatureError::UnknownKeyId`] when no secret is registered under
/// `key_id`. A miss never falls back to a default key.
pub fn authenticate<'a>(
    registry: &'a SecretRegistry,
    validator: &DateValidator,
    key_id: &str,
    req: &impl HeaderSource,
) -> Result<&'a Secret, Report<SignatureError>> {
    validator.validate(req)?;

    registry.lookup(key_id).ok_or_else(|| {
        log::warn!("signed request referenced an unregistered key id");
        Report::new(SignatureError::UnknownKeyId {
            key_id: key_id.to_string(),
        })
    })
}
