//! Error types for the request/response core and the user accessors.
//!
//! # Design
//! Failures are split by where they happen. `TransportError` means no
//! response was received at all; `ParseError` means bytes arrived but the
//! status line could not be read. `RequestError` is the union returned by
//! `Request::get` and friends, so a failed exchange never yields a
//! `Response` whose fields could be read by mistake. `ApiError` sits one
//! layer up and adds status-code interpretation for the user endpoints.

/// A network-level failure: nothing usable came back from the server.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The transport refused to build the request (bad URL, header or verb).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// DNS lookup, connect or socket I/O failed.
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("tls failure: {0}")]
    Tls(String),

    #[error("transport error: {0}")]
    Other(String),
}

impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> Self {
        let msg = e.to_string();
        match e {
            ureq::Error::BadUri(_) | ureq::Error::Http(_) => TransportError::InvalidRequest(msg),
            ureq::Error::HostNotFound | ureq::Error::ConnectionFailed | ureq::Error::Io(_) => {
                TransportError::Connect(msg)
            }
            ureq::Error::Timeout(_) => TransportError::Timeout(msg),
            ureq::Error::Tls(_) => TransportError::Tls(msg),
            _ => TransportError::Other(msg),
        }
    }
}

/// The header section arrived but its status line is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("response has no status line")]
    MissingStatusLine,

    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),

    #[error("invalid status code: {0:?}")]
    InvalidStatusCode(String),
}

/// Failure of a single `get` / `post` / `request` exchange.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("unparsable response: {0}")]
    Parse(#[from] ParseError),
}

/// Errors returned by `UserClient` accessors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The exchange itself failed before a status could be interpreted.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The server returned 404; the user (or resource) does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The JSON document lacks a field the accessor reads.
    #[error("response is missing field `{0}`")]
    MissingField(&'static str),
}
