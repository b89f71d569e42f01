//! Error kind enumeration for categorizing SDK errors.

/// Categorization of SDK errors.
///
/// The kinds group into three families:
///
/// | Family            | Kinds                                                   |
/// |-------------------|---------------------------------------------------------|
/// | Network failure   | `Connection`, `Timeout`, `Transport` and HTTP statuses  |
/// | Shape mismatch    | `InvalidResponse`, `Rejected`                           |
/// | Validation        | `Validation`                                            |
///
/// Both network failures and shape mismatches land in the same error slot
/// of a controller; the message text tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Authentication failed (missing, invalid or expired token).
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// Valid session but insufficient permissions.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// Requested resource was not found.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// Invalid request argument or payload.
    ///
    /// HTTP: 400 Bad Request
    #[error("invalid argument")]
    InvalidArgument,

    /// Conflict with existing resource state.
    ///
    /// HTTP: 409 Conflict
    #[error("conflict")]
    Conflict,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// Service temporarily unavailable.
    ///
    /// HTTP: 502, 503
    #[error("service unavailable")]
    Unavailable,

    /// Request timed out, either client side or HTTP 504.
    #[error("timeout")]
    Timeout,

    /// Internal server error.
    ///
    /// HTTP: 500 and unmapped 5xx
    #[error("internal error")]
    Internal,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Generic HTTP transport error that fits no other category.
    #[error("transport error")]
    Transport,

    /// Response parsed as JSON but lacks the expected shape.
    ///
    /// Raised when the `results` field is missing or records fail to decode.
    #[error("invalid response")]
    InvalidResponse,

    /// Response envelope carried `success: false`.
    ///
    /// The server's `message` is preserved verbatim when present.
    #[error("request rejected")]
    Rejected,

    /// Input rejected locally before any network call.
    #[error("validation failed")]
    Validation,

    /// Configuration error (invalid URL, bad environment value).
    #[error("configuration error")]
    Configuration,

    /// Persistent storage could not be read or written.
    #[error("storage error")]
    Storage,

    /// CSV export failed.
    #[error("export error")]
    Export,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if the failure happened at the HTTP call itself.
    ///
    /// This covers connectivity problems and every non-2xx status.
    #[inline]
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unauthorized
                | ErrorKind::Forbidden
                | ErrorKind::NotFound
                | ErrorKind::InvalidArgument
                | ErrorKind::Conflict
                | ErrorKind::RateLimited
                | ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::Internal
                | ErrorKind::Connection
                | ErrorKind::Transport
        )
    }

    /// Returns `true` if the server answered but the body had the wrong shape.
    #[inline]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, ErrorKind::InvalidResponse | ErrorKind::Rejected)
    }

    /// Returns `true` if a later manual retry has a reasonable chance to succeed.
    ///
    /// The SDK itself never retries; this only informs retry affordances.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::Connection
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            502 | 503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Transport,
        }
    }
}
