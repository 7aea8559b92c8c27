//! Verify response parsing against JSON test vectors stored in `test-vectors/`.
//!
//! Each case gives a raw header section and body as a transport would return
//! them, plus either the expected structured fields or the expected error.
//! A header round trip check serializes a `Request`'s headers into a raw
//! response and parses them back.

use std::collections::HashMap;

use ropp_core::{
    Executor, Method, ParseError, PreparedRequest, RawResponse, Request, Response, TransportError,
};

fn string_map(value: &serde_json::Value) -> HashMap<String, String> {
    value
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, v)| (k.clone(), v.as_str().unwrap().to_string()))
        .collect()
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let raw = RawResponse {
            header_bytes: case["raw_headers"].as_str().unwrap().as_bytes().to_vec(),
            body: case["raw_body"].as_str().unwrap().as_bytes().to_vec(),
        };
        let result = Response::parse(raw);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "InvalidStatusCode" => assert!(
                    matches!(err, ParseError::InvalidStatusCode(_)),
                    "{name}: expected InvalidStatusCode, got {err:?}"
                ),
                "MalformedStatusLine" => assert!(
                    matches!(err, ParseError::MalformedStatusLine(_)),
                    "{name}: expected MalformedStatusLine, got {err:?}"
                ),
                "MissingStatusLine" => {
                    assert_eq!(err, ParseError::MissingStatusLine, "{name}")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let resp = result.unwrap();
        let expected = &case["expected"];
        assert_eq!(
            u64::from(resp.status_code()),
            expected["status_code"].as_u64().unwrap(),
            "{name}: status code"
        );
        assert_eq!(resp.status_message(), expected["status_message"], "{name}: message");
        assert_eq!(resp.headers(), &string_map(&expected["headers"]), "{name}: headers");
        assert_eq!(resp.cookies(), &string_map(&expected["cookies"]), "{name}: cookies");
        assert_eq!(resp.body(), expected["body"], "{name}: body");
    }
}

/// Turns the request's own header lines into the response header section,
/// and its cookies into `Set-Cookie` lines.
struct Mirror;

impl Executor for Mirror {
    fn execute(&mut self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut section = String::from("HTTP/1.1 200 OK\r\n");
        for line in &request.header_lines {
            match line.strip_prefix("Cookie: ") {
                Some(cookies) => {
                    for pair in cookies.split("; ").filter(|p| !p.is_empty()) {
                        section.push_str(&format!("Set-Cookie: {pair}\r\n"));
                    }
                }
                None => section.push_str(&format!("{line}\r\n")),
            }
        }
        section.push_str("\r\n");
        Ok(RawResponse {
            header_bytes: section.into_bytes(),
            body: request.body.clone(),
        })
    }
}

#[test]
fn serialized_headers_and_cookies_parse_back() {
    let mut req = Request::with_executor("http://localhost/mirror", Mirror);
    req.set_header("Accept", "application/json");
    req.set_header("X-Request-Id", "r-17");
    req.set_cookie("session", "abc");
    req.set_cookie("theme", "dark");
    req.set_body("echo me");

    let resp = req.request("PUT").unwrap();

    assert_eq!(resp.header("accept"), Some("application/json"));
    assert_eq!(resp.header("X-Request-Id"), Some("r-17"));
    assert_eq!(resp.cookie("session"), Some("abc"));
    assert_eq!(resp.cookie("theme"), Some("dark"));
    assert_eq!(resp.cookies().len(), 2);
    assert_eq!(resp.body(), "echo me");

    let prepared = req.prepare(Method::Get);
    assert_eq!(prepared.header_lines.len(), 3);
}
