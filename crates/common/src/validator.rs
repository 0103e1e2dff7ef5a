//! Freshness validation of the client-submitted request timestamp.
//!
//! Incoming signed requests carry a `date` header holding Unix seconds. The
//! validator rejects requests whose timestamp falls outside a symmetric
//! window around the server's current time, which bounds how long a captured
//! request stays replayable. Full anti-replay needs nonce tracking on top of
//! this gate; that is the dispatcher's concern, not this crate's.

use chrono::{DateTime, TimeDelta, Utc};
use error_stack::Report;

use crate::constants::HEADER_DATE;
use crate::error::SignatureError;
use crate::http_util::HeaderSource;

/// Default tolerance between the client-submitted timestamp and server time.
const DEFAULT_TIME_GAP_SECS: u32 = 30;

/// Stateless per-request freshness check.
///
/// A timestamp `T` is accepted iff `now - time_gap <= T <= now + time_gap`,
/// both boundaries inclusive, where `now` is read from the wall clock at the
/// moment of the call. The gap is fixed per validator instance so behavior is
/// predictable and testable. Comparison is at second granularity, matching
/// the wire format of the `date` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateValidator {
    time_gap: TimeDelta,
}

impl DateValidator {
    /// Validator with the default 30 second gap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_time_gap(DEFAULT_TIME_GAP_SECS)
    }

    /// Validator with a custom gap. The gap applies symmetrically before and
    /// after server time and must be strictly positive to accept anything
    /// beyond an exact clock match.
    #[must_use]
    pub fn with_time_gap(seconds: u32) -> Self {
        Self {
            time_gap: TimeDelta::seconds(i64::from(seconds)),
        }
    }

    #[must_use]
    pub fn time_gap(&self) -> TimeDelta {
        self.time_gap
    }

    /// Checks the request's `date` header against the freshness window.
    ///
    /// # Errors
    ///
    /// - [`SignatureError::MissingTimestamp`] when the header is absent or empty.
    /// - [`SignatureError::MalformedTimestamp`] when it is not a base-10 integer
    ///   (or not representable as a point in time).
    /// - [`SignatureError::DateNotInRange`] when it falls outside the window.
    pub fn validate(&self, req: &impl HeaderSource) -> Result<(), Report<SignatureError>> {
        self.validate_at(req.header(&HEADER_DATE), Utc::now())
    }

    // The window comparison with "now" factored out so tests can pin it.
    fn validate_at(
        &self,
        raw: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), Report<SignatureError>> {
        let raw = raw
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Report::new(SignatureError::MissingTimestamp))?;

        let timestamp: i64 = raw.parse().map_err(|e: std::num::ParseIntError| {
            Report::new(SignatureError::MalformedTimestamp {
                message: e.to_string(),
            })
        })?;

        let submitted = DateTime::<Utc>::from_timestamp(timestamp, 0).ok_or_else(|| {
            Report::new(SignatureError::MalformedTimestamp {
                message: format!("timestamp {} is not a representable point in time", timestamp),
            })
        })?;

        let start = now - self.time_gap;
        let stop = now + self.time_gap;
        if submitted < start || submitted > stop {
            log::debug!("rejecting request timestamp outside freshness window");
            return Err(Report::new(SignatureError::DateNotInRange));
        }

        Ok(())
    }
}

impl Default for DateValidator {
    fn default() -> Self {
        Self::new()
    }
}
