//! Mutable request configuration and the execute calls.
//!
//! # Design
//! A `Request` owns its URL, body, header map and cookie map, plus the
//! executor that performs the exchange. Every `get` / `post` / `request` call
//! re-serializes the current state into a fresh `PreparedRequest`, so one
//! instance can be reconfigured and reused for any number of exchanges
//! without state leaking from one to the next.
//!
//! Maps are `BTreeMap`s so header lines come out in a stable, sorted order.
//! The configured body is handed to the executor for every verb, GET
//! included.

use std::collections::BTreeMap;

use crate::config::ExecutorConfig;
use crate::error::RequestError;
use crate::executor::{Executor, UreqExecutor};
use crate::http::{Method, PreparedRequest};
use crate::response::Response;

pub type Headers = BTreeMap<String, String>;
pub type Cookies = BTreeMap<String, String>;

/// A reusable HTTP request bound to an executor.
pub struct Request<E = UreqExecutor> {
    url: String,
    body: String,
    headers: Headers,
    cookies: Cookies,
    executor: E,
}

impl Request<UreqExecutor> {
    /// Create a request with its own `UreqExecutor`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_executor(url, UreqExecutor::new())
    }

    pub fn with_body(url: impl Into<String>, body: impl Into<String>) -> Self {
        let mut req = Self::new(url);
        req.body = body.into();
        req
    }

    pub fn with_headers(url: impl Into<String>, body: impl Into<String>, headers: Headers) -> Self {
        let mut req = Self::with_body(url, body);
        req.headers = headers;
        req
    }

    pub fn with_config(url: impl Into<String>, config: ExecutorConfig) -> Self {
        Self::with_executor(url, UreqExecutor::with_config(config))
    }
}

impl<E: Executor> Request<E> {
    pub fn with_executor(url: impl Into<String>, executor: E) -> Self {
        Self {
            url: url.into(),
            body: String::new(),
            headers: Headers::new(),
            cookies: Cookies::new(),
            executor,
        }
    }

    pub fn get(&mut self) -> Result<Response, RequestError> {
        self.execute(Method::Get)
    }

    pub fn post(&mut self) -> Result<Response, RequestError> {
        self.execute(Method::Post)
    }

    /// Execute with an arbitrary verb. The verb is not validated here; the
    /// executor decides what an unknown verb does.
    pub fn request(&mut self, method: &str) -> Result<Response, RequestError> {
        self.execute(Method::from(method))
    }

    fn execute(&mut self, method: Method) -> Result<Response, RequestError> {
        let prepared = self.prepare(method);
        let raw = self.executor.execute(&prepared)?;
        Ok(Response::parse(raw)?)
    }

    /// Snapshot the current configuration as a `PreparedRequest`.
    pub fn prepare(&self, method: Method) -> PreparedRequest {
        PreparedRequest {
            url: self.url.clone(),
            method,
            body: self.body.as_bytes().to_vec(),
            header_lines: self.header_lines(),
        }
    }

    /// Render headers as `Name: value` lines followed by one `Cookie` line.
    ///
    /// The `Cookie` line is always present, even with no cookies set, and
    /// every pair ends with `"; "`.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .headers
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect();

        let mut cookie = String::from("Cookie: ");
        for (key, value) in &self.cookies {
            cookie.push_str(key);
            cookie.push('=');
            cookie.push_str(value);
            cookie.push_str("; ");
        }
        lines.push(cookie);
        lines
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}

impl<E> Request<E> {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Insert or replace a header. The name is stored as given.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }

    pub fn remove_header(&mut self, key: &str) {
        self.headers.remove(key);
    }

    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    pub fn set_cookie(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(key.into(), value.into());
    }

    pub fn remove_cookie(&mut self, key: &str) {
        self.cookies.remove(key);
    }
}
