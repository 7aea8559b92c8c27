//! DTOs for the user endpoints.
//!
//! # Design
//! Only the shapes the accessors read are typed. List endpoints are returned
//! as `serde_json::Value` because callers page through them as-is.

use serde::{Deserialize, Serialize};

/// Profile returned by `GET /v1/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// Body of the `/count` endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Count {
    pub count: u64,
}
