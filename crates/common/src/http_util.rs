//! Header-lookup seam over `http` types.
//!
//! The freshness validator only needs to read headers, so it takes any
//! [`HeaderSource`] rather than a concrete request type. That keeps the core
//! free of a web framework dependency while still working directly with
//! `http::Request` and `http::HeaderMap` at call sites.

use http::header::HeaderName;
use http::HeaderMap;

/// Minimal header-lookup capability a request must expose.
pub trait HeaderSource {
    /// Returns the header value as a string, or `None` when the header is
    /// absent or not valid visible ASCII.
    fn header(&self, name: &HeaderName) -> Option<&str>;
}

impl HeaderSource for HeaderMap {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        self.get(name).and_then(|value| value.to_str().ok())
    }
}

impl<T> HeaderSource for http::Request<T> {
    fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers().header(name)
    }
}
