//! Read-only view of captured HTTP transactions
//!
//! The capture host owns its history items; the export pipeline only needs to
//! read them. [`HttpTransaction`] is that boundary, and [`Transaction`] is an
//! owned implementation used for capture manifests and tests.

use std::fmt;

use bytes::Bytes;

/// Target service of a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpService {
    /// Scheme (`http` or `https`)
    pub protocol: String,
    /// Target host
    pub host: String,
    /// Target port
    pub port: u16,
}

impl HttpService {
    /// Create a new service description
    pub fn new(protocol: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for HttpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Capability the capture host exposes for each selected history item
pub trait HttpTransaction {
    /// Raw request bytes, if the host holds any
    fn request(&self) -> Option<&[u8]>;

    /// Raw response bytes, absent when no response was captured
    fn response(&self) -> Option<&[u8]>;

    /// Full request URL
    fn url(&self) -> &str;

    /// HTTP method
    fn method(&self) -> &str;

    /// Target service
    fn service(&self) -> &HttpService;

    /// Monotonic capture time, used only for ordering
    fn capture_time(&self) -> u64;

    /// User annotation attached to the history item
    fn comment(&self) -> Option<&str> {
        None
    }
}

/// Owned captured transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Raw request bytes
    pub request: Option<Bytes>,
    /// Raw response bytes
    pub response: Option<Bytes>,
    /// Request URL
    pub url: String,
    /// HTTP method
    pub method: String,
    /// Target service
    pub service: HttpService,
    /// Capture time
    pub capture_time: u64,
    /// Optional annotation
    pub comment: Option<String>,
}

impl Transaction {
    /// Create a transaction with a request and no response
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        service: HttpService,
        capture_time: u64,
        request: impl Into<Bytes>,
    ) -> Self {
        Self {
            request: Some(request.into()),
            response: None,
            url: url.into(),
            method: method.into(),
            service,
            capture_time,
            comment: None,
        }
    }

    /// Attach response bytes
    #[must_use]
    pub fn with_response(mut self, response: impl Into<Bytes>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Attach a comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl HttpTransaction for Transaction {
    fn request(&self) -> Option<&[u8]> {
        self.request.as_deref()
    }

    fn response(&self) -> Option<&[u8]> {
        self.response.as_deref()
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn service(&self) -> &HttpService {
        &self.service
    }

    fn capture_time(&self) -> u64 {
        self.capture_time
    }

    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl<T: HttpTransaction + ?Sized> HttpTransaction for &T {
    fn request(&self) -> Option<&[u8]> {
        (**self).request()
    }

    fn response(&self) -> Option<&[u8]> {
        (**self).response()
    }

    fn url(&self) -> &str {
        (**self).url()
    }

    fn method(&self) -> &str {
        (**self).method()
    }

    fn service(&self) -> &HttpService {
        (**self).service()
    }

    fn capture_time(&self) -> u64 {
        (**self).capture_time()
    }

    fn comment(&self) -> Option<&str> {
        (**self).comment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_display() {
        let service = HttpService::new("https", "example.com", 443);
        assert_eq!(service.to_string(), "https://example.com:443");
    }

    #[test]
    fn test_builder() {
        let tx = Transaction::new(
            "POST",
            "http://example.com/login",
            HttpService::new("http", "example.com", 80),
            7,
            &b"POST /login HTTP/1.1\r\n\r\n"[..],
        )
        .with_response(&b"HTTP/1.1 302 Found\r\n\r\n"[..])
        .with_comment("login flow");

        assert_eq!(tx.method(), "POST");
        assert_eq!(tx.capture_time(), 7);
        assert_eq!(tx.comment(), Some("login flow"));
        assert_eq!(tx.response(), Some(&b"HTTP/1.1 302 Found\r\n\r\n"[..]));
    }

    #[test]
    fn test_reference_forwarding() {
        let tx = Transaction::new(
            "GET",
            "http://example.com/",
            HttpService::new("http", "example.com", 80),
            1,
            &b"GET / HTTP/1.1\r\n\r\n"[..],
        );
        let by_ref: &Transaction = &tx;
        assert_eq!(HttpTransaction::url(&by_ref), "http://example.com/");
        assert!(HttpTransaction::response(&by_ref).is_none());
    }
}
