//! Parsed result of one exchange.
//!
//! # Design
//! `Response::parse` turns a `RawResponse` into structured fields:
//!
//! 1. The header section is split on `\n`; a trailing `\r` is dropped from
//!    every line.
//! 2. The first line is the status line. The version token is discarded, the
//!    next token must be a numeric status code and the remainder is the
//!    reason phrase. A non-numeric code is a `ParseError`, never a silent 0.
//! 3. Every following non-empty line is split on its first colon. The name is
//!    trimmed and lower-cased, the value is trimmed. A line without a colon is
//!    skipped with a warning rather than failing the whole response.
//! 4. `set-cookie` values are additionally split into `name=value` pairs that
//!    land in the cookie map. The first pair is always the cookie; well-known
//!    attributes after it are not cookies.
//! 5. Every header, `set-cookie` included, is stored in the header map; a
//!    repeated name keeps the last value seen.
//!
//! The body is decoded lossily as UTF-8 with no charset negotiation, and the
//! raw bytes are kept alongside.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::ParseError;
use crate::http::RawResponse;

/// Attribute names that may follow the cookie pair on a `Set-Cookie` line.
const COOKIE_ATTRIBUTES: &[&str] = &[
    "path",
    "domain",
    "expires",
    "max-age",
    "secure",
    "httponly",
    "samesite",
    "partitioned",
    "priority",
];

/// Structured response. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    status_message: String,
    body: String,
    raw_body: Vec<u8>,
    raw_headers: Vec<u8>,
    headers: HashMap<String, String>,
    cookies: HashMap<String, String>,
}

impl Response {
    pub fn parse(raw: RawResponse) -> Result<Self, ParseError> {
        let RawResponse { header_bytes, body } = raw;
        let section = String::from_utf8_lossy(&header_bytes).into_owned();

        let mut lines = section.split('\n').map(|line| line.trim_end_matches('\r'));
        let status_line = lines
            .next()
            .filter(|line| !line.trim().is_empty())
            .ok_or(ParseError::MissingStatusLine)?;
        let (status_code, status_message) = parse_status_line(status_line)?;

        let mut headers = HashMap::new();
        let mut cookies = HashMap::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let Some((name, value)) = parse_header_line(line) else {
                log::warn!("skipping header line without a colon: {line:?}");
                continue;
            };
            if name == "set-cookie" {
                parse_set_cookie(&value, &mut cookies);
            }
            headers.insert(name, value);
        }

        log::debug!(
            "{status_code} {status_message} ({} headers, {} cookies, {} body bytes)",
            headers.len(),
            cookies.len(),
            body.len()
        );

        Ok(Self {
            status_code,
            status_message,
            body: String::from_utf8_lossy(&body).into_owned(),
            raw_body: body,
            raw_headers: header_bytes,
            headers,
            cookies,
        })
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    /// The header section exactly as the executor returned it.
    pub fn raw_headers(&self) -> &[u8] {
        &self.raw_headers
    }

    /// All headers, keyed by lower-cased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.raw_body)
    }
}

/// Split `HTTP/1.1 200 OK` into `(200, "OK")`.
fn parse_status_line(line: &str) -> Result<(u16, String), ParseError> {
    let (_version, rest) = line
        .split_once(' ')
        .ok_or_else(|| ParseError::MalformedStatusLine(line.to_string()))?;
    let (code, message) = rest.split_once(' ').unwrap_or((rest, ""));
    let code = code
        .parse::<u16>()
        .map_err(|_| ParseError::InvalidStatusCode(code.to_string()))?;
    Ok((code, message.to_string()))
}

fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_lowercase(), value.trim().to_string()))
}

/// The first pair on a line is always the cookie itself; later pairs are
/// cookies only when they are not a known attribute.
fn parse_set_cookie(value: &str, cookies: &mut HashMap<String, String>) {
    for (index, pair) in value.split(';').enumerate() {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || (index > 0 && is_cookie_attribute(name)) {
            continue;
        }
        cookies.insert(name.to_string(), value.trim().to_string());
    }
}

fn is_cookie_attribute(name: &str) -> bool {
    COOKIE_ATTRIBUTES.iter().any(|attr| attr.eq_ignore_ascii_case(name))
}
