//! Classify HTTP status and curl errors into transient or fatal failures.

use super::error::FailureClass;

/// HTTP statuses the conversion service uses when it is overloaded or behind
/// a failing gateway.
pub const DEFAULT_TRANSIENT_STATUSES: [u16; 6] = [502, 503, 504, 520, 522, 524];

/// High-level classification of one failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request timed out (connect or whole transfer).
    Timeout,
    /// Network-level failure (refused, reset, DNS, empty reply, TLS handshake,
    /// HTTP/2 framing).
    Connection,
    /// One of the configured overload statuses.
    Overloaded(u16),
    /// Anything else; not retried.
    Other,
}

impl ErrorKind {
    /// Failure class for retryable kinds; `None` means fatal.
    pub fn failure_class(self) -> Option<FailureClass> {
        match self {
            ErrorKind::Timeout | ErrorKind::Connection => Some(FailureClass::Network),
            ErrorKind::Overloaded(_) => Some(FailureClass::Server),
            ErrorKind::Other => None,
        }
    }
}

/// Classify a non-2xx HTTP status against the configured transient set.
pub fn classify_http_status(code: u32, transient: &[u16]) -> ErrorKind {
    match u16::try_from(code) {
        Ok(code) if transient.contains(&code) => ErrorKind::Overloaded(code),
        _ => ErrorKind::Other,
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
        || e.is_ssl_connect_error()
        || e.is_http2_error()
        || e.is_http2_stream_error()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overload_statuses_are_transient() {
        for code in DEFAULT_TRANSIENT_STATUSES {
            assert_eq!(
                classify_http_status(u32::from(code), &DEFAULT_TRANSIENT_STATUSES),
                ErrorKind::Overloaded(code)
            );
        }
    }

    #[test]
    fn other_statuses_are_fatal() {
        for code in [400, 401, 403, 404, 429, 500, 501, 521] {
            let kind = classify_http_status(code, &DEFAULT_TRANSIENT_STATUSES);
            assert_eq!(kind, ErrorKind::Other, "status {code}");
            assert_eq!(kind.failure_class(), None);
        }
    }

    #[test]
    fn transient_set_is_configurable() {
        assert_eq!(classify_http_status(503, &[429]), ErrorKind::Other);
        assert_eq!(classify_http_status(429, &[429]), ErrorKind::Overloaded(429));
    }

    #[test]
    fn failure_classes() {
        assert_eq!(ErrorKind::Timeout.failure_class(), Some(FailureClass::Network));
        assert_eq!(ErrorKind::Connection.failure_class(), Some(FailureClass::Network));
        assert_eq!(
            ErrorKind::Overloaded(503).failure_class(),
            Some(FailureClass::Server)
        );
    }

    #[test]
    fn curl_timeout_and_connect() {
        // CURLE_OPERATION_TIMEDOUT = 28, CURLE_COULDNT_CONNECT = 7, CURLE_URL_MALFORMAT = 3
        assert_eq!(classify_curl_error(&curl::Error::new(28)), ErrorKind::Timeout);
        assert_eq!(classify_curl_error(&curl::Error::new(7)), ErrorKind::Connection);
        assert_eq!(classify_curl_error(&curl::Error::new(3)), ErrorKind::Other);
    }

    #[test]
    fn curl_handshake_and_http2_failures_are_connection() {
        // CURLE_SSL_CONNECT_ERROR = 35, CURLE_HTTP2 = 16, CURLE_HTTP2_STREAM = 92
        for code in [35, 16, 92] {
            let kind = classify_curl_error(&curl::Error::new(code));
            assert_eq!(kind, ErrorKind::Connection, "curl code {code}");
            assert_eq!(kind.failure_class(), Some(FailureClass::Network));
        }
    }
}
