//! Transport executor: one blocking network round trip per call.
//!
//! # Design
//! `Executor` is the seam between the request model and the network. The
//! model hands over a `PreparedRequest` and gets back the raw header section
//! and body bytes; it never sees transport types. `UreqExecutor` is the
//! production implementation. It owns a `ureq::Agent` for its whole lifetime,
//! so the transport handle is acquired when the executor is built and released
//! when it is dropped, on every exit path.
//!
//! ureq hands back a parsed `http::Response`, so the header section is
//! re-rendered as `HTTP/x.y CODE Reason\r\nname: value\r\n...\r\n` before it is
//! returned. The reason phrase is the canonical one for the status code.

use ureq::http;

use crate::config::ExecutorConfig;
use crate::error::TransportError;
use crate::http::{Method, PreparedRequest, RawResponse};

/// Performs a single exchange and returns the unparsed response.
///
/// Implementations must not retry and must not follow redirects.
pub trait Executor {
    fn execute(&mut self, request: &PreparedRequest) -> Result<RawResponse, TransportError>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn execute(&mut self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking executor backed by a `ureq::Agent`.
///
/// Not meant to be shared between threads; give each thread its own instance.
pub struct UreqExecutor {
    agent: ureq::Agent,
    config: ExecutorConfig,
}

impl Default for UreqExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqExecutor {
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    pub fn with_config(config: ExecutorConfig) -> Self {
        // 4xx/5xx are data for the caller, redirects are never followed and
        // extension verbs go out as given.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .allow_non_standard_methods(true)
            .build()
            .new_agent();
        Self { agent, config }
    }

    fn send(
        &self,
        request: &PreparedRequest,
    ) -> Result<http::Response<ureq::Body>, TransportError> {
        let method = http::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let mut builder = http::Request::builder().method(method).uri(request.url.as_str());
        for (name, value) in request.header_pairs() {
            builder = builder.header(name, value);
        }

        // POST always carries a body, even an empty one; other verbs only
        // when one was configured.
        let response = if request.body.is_empty() && request.method != Method::Post {
            let req = builder.body(()).map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
            self.agent.run(req)?
        } else {
            let req = builder
                .body(request.body.as_slice())
                .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
            self.agent.run(req)?
        };
        Ok(response)
    }
}

impl Executor for UreqExecutor {
    fn execute(&mut self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        log::debug!("{} {}", request.method, request.url);
        if self.config.verbose {
            for line in &request.header_lines {
                log::trace!("> {line}");
            }
        }

        let mut response = self.send(request).inspect_err(|e| {
            log::debug!("{} {} failed: {e}", request.method, request.url);
        })?;

        let header_bytes = render_header_section(&response);
        if self.config.verbose {
            for line in String::from_utf8_lossy(&header_bytes).lines() {
                log::trace!("< {line}");
            }
        }

        let body = response
            .body_mut()
            .with_config()
            .limit(self.config.body_limit)
            .read_to_vec()?;

        Ok(RawResponse { header_bytes, body })
    }
}

fn render_header_section<B>(response: &http::Response<B>) -> Vec<u8> {
    let status = response.status();
    let mut out = format!(
        "{:?} {} {}\r\n",
        response.version(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
    .into_bytes();

    for (name, value) in response.headers() {
        out.extend_from_slice(name.as_str().as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b"\r\n");
    out
}
