//! Blocking HTTP request/response core for a REST API client.
//!
//! # Overview
//! A `Request` is configured (URL, body, headers, cookies), then executed
//! with `get`, `post` or `request(verb)`. Execution serializes the current
//! state, hands it to an `Executor` for one network round trip, and parses
//! the raw header section and body into a `Response`.
//!
//! # Design
//! - `Executor` is the only I/O seam. `UreqExecutor` is the real transport;
//!   tests substitute scripted executors that return canned bytes.
//! - Parsing works on the raw header section text (status line plus
//!   `Name: value` lines), not on transport types, so it behaves the same for
//!   any executor.
//! - Failures are values: `RequestError::Transport` when nothing came back,
//!   `RequestError::Parse` when the status line is unusable.
//! - `UserClient` layers the public user endpoints on top of `Request`.

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod request;
pub mod response;
pub mod types;

pub use client::{Relation, UserClient};
pub use config::{Endpoints, ExecutorConfig};
pub use error::{ApiError, ParseError, RequestError, TransportError};
pub use executor::{Executor, UreqExecutor};
pub use http::{Method, PreparedRequest, RawResponse};
pub use request::{Cookies, Headers, Request};
pub use response::Response;
pub use types::{Count, UserProfile};
