//! Request envelope.

use http::header::AUTHORIZATION;

/// A B2 request wrapping an operation input with the inbound headers.
#[derive(Debug, Clone)]
pub struct B2Request<T> {
    /// The input payload.
    pub input: T,
    /// Inbound HTTP headers (or RPC metadata mapped to headers).
    pub headers: http::HeaderMap,
}

impl<T: Default> Default for B2Request<T> {
    fn default() -> Self {
        Self {
            input: T::default(),
            headers: http::HeaderMap::new(),
        }
    }
}

impl<T> B2Request<T> {
    /// Create a new request with no headers.
    #[must_use]
    pub fn new(input: T) -> Self {
        Self {
            input,
            headers: http::HeaderMap::new(),
        }
    }

    /// Set the `authorization` header.
    ///
    /// Values that are not valid header values are ignored.
    #[must_use]
    pub fn with_authorization(mut self, value: &str) -> Self {
        if let Ok(v) = http::HeaderValue::from_str(value) {
            self.headers.insert(AUTHORIZATION, v);
        }
        self
    }

    /// The `authorization` header, if present and valid UTF-8.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}
