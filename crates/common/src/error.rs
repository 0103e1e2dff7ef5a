//! Error types for signature verification.
//!
//! Every error kind carries a [`Disclosure`] classification so that HTTP-layer
//! callers can decide what is safe to echo back to a client without depending
//! on any particular web framework's public/internal error flagging.

use derive_more::{Display, Error};

/// Whether an error's message may be surfaced to the client that sent the
/// request, or must stay in server logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    /// Safe to include in the response body. Generic text only; never server
    /// time, window size, or key material.
    ClientVisible,
    /// Server-side only. Callers should respond with a generic rejection.
    InternalOnly,
}

/// Failures produced by the verification core.
#[derive(Debug, Display, Error)]
pub enum SignatureError {
    /// The request carried no `date` header (or an empty one).
    #[display("date header is required")]
    MissingTimestamp,

    /// The `date` header was present but not a base-10 integer.
    #[display("Could not parse date header to timestamp. Error: {message}")]
    MalformedTimestamp { message: String },

    /// The submitted timestamp parsed but fell outside the freshness window.
    /// The message must not reveal the server time or the window size.
    #[display("Date submit is not in acceptable range")]
    DateNotInRange,

    /// No signing secret is registered under the requested key id.
    #[display("no signing secret registered for key id '{key_id}'")]
    UnknownKeyId { key_id: String },

    /// Settings could not be loaded or failed validation.
    #[display("Configuration error: {message}")]
    Configuration { message: String },
}

impl SignatureError {
    /// Classification attached to every error kind, independent of transport.
    #[must_use]
    pub fn disclosure(&self) -> Disclosure {
        match self {
            Self::MalformedTimestamp { .. } | Self::DateNotInRange => Disclosure::ClientVisible,
            Self::MissingTimestamp | Self::UnknownKeyId { .. } | Self::Configuration { .. } => {
                Disclosure::InternalOnly
            }
        }
    }

    #[must_use]
    pub fn is_client_visible(&self) -> bool {
        self.disclosure() == Disclosure::ClientVisible
    }
}
