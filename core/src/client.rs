//! Accessors for a single user's public endpoints.
//!
//! # Design
//! `UserClient` holds a user id, the service base URLs and one executor.
//! Each accessor builds a fresh `Request` that borrows the executor, sets the
//! `Referer` header the API expects, issues a GET and hands the `Response` to
//! a `parse_*` function. The parse step is pure, so tests can feed it canned
//! responses without a server.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Endpoints;
use crate::error::ApiError;
use crate::executor::{Executor, UreqExecutor};
use crate::request::Request;
use crate::response::Response;
use crate::types::{Count, UserProfile};

pub const REFERER: &str = "https://www.roblox.com/";

/// Which relationship list a count or page refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Friends,
    Followers,
    Followings,
}

impl Relation {
    fn path(self) -> &'static str {
        match self {
            Relation::Friends => "friends",
            Relation::Followers => "followers",
            Relation::Followings => "followings",
        }
    }
}

pub struct UserClient<E = UreqExecutor> {
    user_id: u64,
    endpoints: Endpoints,
    executor: E,
}

impl UserClient<UreqExecutor> {
    pub fn new(user_id: u64) -> Self {
        Self::with_executor(user_id, Endpoints::default(), UreqExecutor::new())
    }
}

impl<E: Executor> UserClient<E> {
    pub fn with_executor(user_id: u64, endpoints: Endpoints, executor: E) -> Self {
        Self {
            user_id,
            endpoints,
            executor,
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn friends(&mut self, sort: &str) -> Result<Value, ApiError> {
        let url = format!(
            "{}/v1/users/{}/friends?userSort={sort}",
            self.endpoints.friends, self.user_id
        );
        parse_json(self.fetch(url)?)
    }

    pub fn followers(&mut self, sort: &str, limit: u32) -> Result<Value, ApiError> {
        self.relation_page(Relation::Followers, sort, limit)
    }

    pub fn followings(&mut self, sort: &str, limit: u32) -> Result<Value, ApiError> {
        self.relation_page(Relation::Followings, sort, limit)
    }

    fn relation_page(
        &mut self,
        relation: Relation,
        sort: &str,
        limit: u32,
    ) -> Result<Value, ApiError> {
        let url = format!(
            "{}/v1/users/{}/{}?sortOrder={sort}&limit={limit}",
            self.endpoints.friends,
            self.user_id,
            relation.path()
        );
        parse_json(self.fetch(url)?)
    }

    pub fn count(&mut self, relation: Relation) -> Result<u64, ApiError> {
        let url = format!(
            "{}/v1/users/{}/{}/count",
            self.endpoints.friends,
            self.user_id,
            relation.path()
        );
        parse_count(self.fetch(url)?)
    }

    pub fn friends_count(&mut self) -> Result<u64, ApiError> {
        self.count(Relation::Friends)
    }

    pub fn followers_count(&mut self) -> Result<u64, ApiError> {
        self.count(Relation::Followers)
    }

    pub fn followings_count(&mut self) -> Result<u64, ApiError> {
        self.count(Relation::Followings)
    }

    pub fn friends_online(&mut self) -> Result<Value, ApiError> {
        let url = format!(
            "{}/v1/users/{}/friends/online",
            self.endpoints.friends, self.user_id
        );
        parse_json(self.fetch(url)?)
    }

    pub fn profile(&mut self) -> Result<UserProfile, ApiError> {
        let url = format!("{}/v1/users/{}", self.endpoints.users, self.user_id);
        parse_json(self.fetch(url)?)
    }

    pub fn username(&mut self) -> Result<String, ApiError> {
        Ok(self.profile()?.name)
    }

    pub fn display_name(&mut self) -> Result<String, ApiError> {
        Ok(self.profile()?.display_name)
    }

    pub fn description(&mut self) -> Result<String, ApiError> {
        Ok(self.profile()?.description)
    }

    pub fn groups(&mut self) -> Result<Value, ApiError> {
        let url = format!(
            "{}/v1/users/{}/groups/roles",
            self.endpoints.groups, self.user_id
        );
        parse_json(self.fetch(url)?)
    }

    /// Number of group role entries the user holds.
    pub fn groups_count(&mut self) -> Result<usize, ApiError> {
        let groups = self.groups()?;
        groups
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::len)
            .ok_or(ApiError::MissingField("data"))
    }

    fn fetch(&mut self, url: String) -> Result<Response, ApiError> {
        let mut req = Request::with_executor(url, &mut self.executor);
        req.set_header("Referer", REFERER);
        Ok(req.get()?)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &Response) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status_code() == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status_code(),
        body: response.body().to_string(),
    })
}

pub fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check_status(&response)?;
    response
        .json()
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}

pub fn parse_count(response: Response) -> Result<u64, ApiError> {
    let count: Count = parse_json(response)?;
    Ok(count.count)
}
