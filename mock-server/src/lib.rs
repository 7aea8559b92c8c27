use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, Method, StatusCode,
    },
    middleware::{self, Next},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupRole {
    pub group: Group,
    pub role: Role,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    pub rank: u8,
}

#[derive(Clone, Debug, Default)]
pub struct User {
    pub profile: Option<Profile>,
    pub friends: Vec<u64>,
    pub followers: Vec<u64>,
    pub followings: Vec<u64>,
    pub online: Vec<u64>,
    pub groups: Vec<GroupRole>,
}

#[derive(Deserialize)]
pub struct FriendsQuery {
    #[serde(rename = "userSort")]
    pub user_sort: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    pub limit: Option<usize>,
}

pub type Db = Arc<RwLock<HashMap<u64, User>>>;

fn profile(id: u64, name: &str, display_name: &str, description: &str) -> Profile {
    Profile {
        id,
        name: name.to_string(),
        display_name: display_name.to_string(),
        description: description.to_string(),
    }
}

/// Fixed population served by `app()`: user 1 has friends 2 and 3, three
/// followers, one following and two group roles.
pub fn seed() -> HashMap<u64, User> {
    let mut users = HashMap::new();
    users.insert(
        1,
        User {
            profile: Some(profile(1, "builder", "Builder", "Builds things")),
            friends: vec![2, 3],
            followers: vec![2, 3, 4],
            followings: vec![2],
            online: vec![3],
            groups: vec![
                GroupRole {
                    group: Group {
                        id: 10,
                        name: "Builders Club".to_string(),
                    },
                    role: Role {
                        id: 100,
                        name: "Owner".to_string(),
                        rank: 255,
                    },
                },
                GroupRole {
                    group: Group {
                        id: 11,
                        name: "Testers".to_string(),
                    },
                    role: Role {
                        id: 110,
                        name: "Member".to_string(),
                        rank: 1,
                    },
                },
            ],
        },
    );
    for (id, name, display_name, description) in [
        (2, "alice", "Alice", ""),
        (3, "bob", "Bob", "hello"),
        (4, "carol", "Carol", ""),
    ] {
        users.insert(
            id,
            User {
                profile: Some(profile(id, name, display_name, description)),
                ..User::default()
            },
        );
    }
    users
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(seed()));
    Router::new()
        .route("/v1/users/{id}", get(get_profile))
        .route("/v1/users/{id}/friends", get(list_friends))
        .route("/v1/users/{id}/friends/count", get(friends_count))
        .route("/v1/users/{id}/friends/online", get(friends_online))
        .route("/v1/users/{id}/followers", get(list_followers))
        .route("/v1/users/{id}/followers/count", get(followers_count))
        .route("/v1/users/{id}/followings", get(list_followings))
        .route("/v1/users/{id}/followings/count", get(followings_count))
        .route("/v1/users/{id}/groups/roles", get(group_roles))
        .route("/echo", any(echo))
        .route("/cookies", get(cookies))
        .route("/status/{code}", any(status))
        .route("/redirect", any(redirect))
        .layer(middleware::from_fn(log_request))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let resp = next.run(req).await;
    log::info!("{method} {uri} -> {}", resp.status().as_u16());
    resp
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "errors": [{ "code": 3, "message": "The user id is invalid." }] })),
    )
}

async fn user(db: &Db, id: u64) -> Result<User, (StatusCode, Json<Value>)> {
    db.read().await.get(&id).cloned().ok_or_else(not_found)
}

async fn profiles(db: &Db, ids: &[u64]) -> Vec<Profile> {
    let users = db.read().await;
    ids.iter()
        .filter_map(|id| users.get(id).and_then(|u| u.profile.clone()))
        .collect()
}

fn sorted(mut list: Vec<Profile>, order: Option<&str>) -> Vec<Profile> {
    match order {
        Some("Asc") | Some("Alphabetical") => list.sort_by(|a, b| a.name.cmp(&b.name)),
        Some("Desc") => list.sort_by(|a, b| b.name.cmp(&a.name)),
        _ => {}
    }
    list
}

async fn get_profile(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Profile>, (StatusCode, Json<Value>)> {
    user(&db, id).await?.profile.map(Json).ok_or_else(not_found)
}

async fn list_friends(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(q): Query<FriendsQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let u = user(&db, id).await?;
    let list = sorted(profiles(&db, &u.friends).await, q.user_sort.as_deref());
    Ok(Json(json!({ "data": list })))
}

async fn page(db: &Db, ids: &[u64], q: PageQuery) -> Json<Value> {
    let mut list = sorted(profiles(db, ids).await, q.sort_order.as_deref());
    if let Some(limit) = q.limit {
        list.truncate(limit);
    }
    Json(json!({ "previousPageCursor": null, "nextPageCursor": null, "data": list }))
}

async fn list_followers(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let u = user(&db, id).await?;
    Ok(page(&db, &u.followers, q).await)
}

async fn list_followings(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let u = user(&db, id).await?;
    Ok(page(&db, &u.followings, q).await)
}

async fn friends_count(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    Ok(Json(json!({ "count": user(&db, id).await?.friends.len() })))
}

async fn followers_count(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    Ok(Json(json!({ "count": user(&db, id).await?.followers.len() })))
}

async fn followings_count(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    Ok(Json(json!({ "count": user(&db, id).await?.followings.len() })))
}

async fn friends_online(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let u = user(&db, id).await?;
    let online: Vec<Value> = u
        .online
        .iter()
        .map(|id| json!({ "id": id, "userPresence": { "UserPresenceType": "Online" } }))
        .collect();
    Ok(Json(json!({ "data": online })))
}

async fn group_roles(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let u = user(&db, id).await?;
    Ok(Json(json!({ "data": u.groups })))
}

/// Reflect the request back: verb, headers (lower-cased, last value wins)
/// and body.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(json!({ "method": method.as_str(), "headers": headers, "body": body }))
}

async fn cookies() -> impl IntoResponse {
    (
        AppendHeaders([
            (SET_COOKIE, "session=first; Path=/; HttpOnly"),
            (SET_COOKIE, "theme=dark"),
            (SET_COOKIE, "session=second; Path=/; Max-Age=3600"),
        ]),
        "cookies set",
    )
}

/// Always answers `302 Found` pointing at `/echo`.
async fn redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, "/echo")], "moved")
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, format!("status {code}")).into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, "invalid status code").into_response(),
    }
}
