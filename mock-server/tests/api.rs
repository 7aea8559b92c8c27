use axum::http::{
    self,
    header::{LOCATION, SET_COOKIE},
    Request, StatusCode,
};
use http_body_util::BodyExt;
use mock_server::{app, Profile};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- users ---

#[tokio::test]
async fn profile_found() {
    let resp = app().oneshot(get("/v1/users/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Profile = body_json(resp).await;
    assert_eq!(profile.name, "builder");
    assert_eq!(profile.display_name, "Builder");
    assert_eq!(profile.description, "Builds things");
}

#[tokio::test]
async fn profile_unknown_user_returns_404() {
    let resp = app().oneshot(get("/v1/users/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert!(body["errors"].is_array());
}

#[tokio::test]
async fn profile_bad_id_returns_400() {
    let resp = app().oneshot(get("/v1/users/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- friends ---

#[tokio::test]
async fn friends_sorted_alphabetically() {
    let resp = app()
        .oneshot(get("/v1/users/1/friends?userSort=Alphabetical"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alice", "bob"]);
}

#[tokio::test]
async fn followers_respect_limit_and_order() {
    let resp = app()
        .oneshot(get("/v1/users/1/followers?sortOrder=Desc&limit=2"))
        .await
        .unwrap();

    let body: Value = body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "carol");
    assert!(body["nextPageCursor"].is_null());
}

#[tokio::test]
async fn counts() {
    for (path, expected) in [
        ("/v1/users/1/friends/count", 2),
        ("/v1/users/1/followers/count", 3),
        ("/v1/users/1/followings/count", 1),
    ] {
        let resp = app().oneshot(get(path)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let body: Value = body_json(resp).await;
        assert_eq!(body["count"], expected, "{path}");
    }
}

#[tokio::test]
async fn friends_online_lists_presence() {
    let resp = app().oneshot(get("/v1/users/1/friends/online")).await.unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["data"][0]["id"], 3);
}

// --- groups ---

#[tokio::test]
async fn group_roles() {
    let resp = app().oneshot(get("/v1/users/1/groups/roles")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["group"]["name"], "Builders Club");
    assert_eq!(data[0]["role"]["rank"], 255);
}

#[tokio::test]
async fn group_roles_for_user_without_groups() {
    let resp = app().oneshot(get("/v1/users/2/groups/roles")).await.unwrap();
    let body: Value = body_json(resp).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

// --- diagnostics ---

#[tokio::test]
async fn echo_reflects_method_headers_and_body() {
    let req = Request::builder()
        .method("PATCH")
        .uri("/echo")
        .header("X-Token", "abc")
        .header(http::header::COOKIE, "a=1; ")
        .body("payload".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["method"], "PATCH");
    assert_eq!(body["headers"]["x-token"], "abc");
    assert_eq!(body["headers"]["cookie"], "a=1; ");
    assert_eq!(body["body"], "payload");
}

#[tokio::test]
async fn cookies_sets_three_cookie_headers_in_order() {
    let resp = app().oneshot(get("/cookies")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let values: Vec<&str> = resp
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(
        values,
        vec![
            "session=first; Path=/; HttpOnly",
            "theme=dark",
            "session=second; Path=/; Max-Age=3600",
        ]
    );
}

#[tokio::test]
async fn status_returns_requested_code() {
    let resp = app().oneshot(get("/status/418")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"status 418");
}

#[tokio::test]
async fn redirect_points_at_echo() {
    let resp = app().oneshot(get("/redirect")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[LOCATION], "/echo");
}

#[tokio::test]
async fn status_rejects_out_of_range_code() {
    let resp = app().oneshot(get("/status/1000")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
