//! Wire-level data handed between `Request` and an `Executor`.
//!
//! # Design
//! `PreparedRequest` is the fully serialized form of a `Request`: header
//! lines are already rendered as `"Name: value"` strings, including the
//! synthesized `Cookie` line. `RawResponse` is what comes back untouched: the
//! header section as text bytes (status line first, CRLF terminated) and the
//! body bytes. Keeping both as plain owned data lets tests script an executor
//! without any network.

use std::fmt;

/// HTTP verb for an exchange. `Custom` is passed to the transport verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Custom(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Custom(verb) => verb,
        }
    }
}

impl From<&str> for Method {
    fn from(verb: &str) -> Self {
        match verb {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: String,
    pub method: Method,
    pub body: Vec<u8>,
    pub header_lines: Vec<String>,
}

impl PreparedRequest {
    /// Split each header line back into a name/value pair on the first colon.
    ///
    /// Lines without a colon are dropped; they cannot be expressed as a header.
    pub fn header_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header_lines.iter().filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim(), value.trim()))
        })
    }
}

/// Unparsed result of one successful network round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub header_bytes: Vec<u8>,
    pub body: Vec<u8>,
}
