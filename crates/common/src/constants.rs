use http::header::HeaderName;

/// Header carrying the client-submitted Unix timestamp, in decimal seconds.
pub const HEADER_DATE: HeaderName = HeaderName::from_static("date");
/// Header some dispatchers use to carry the signer's key id.
pub const HEADER_KEY_ID: HeaderName = HeaderName::from_static("x-key-id");
