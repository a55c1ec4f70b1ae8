use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// User document (collection "users"), keyed by email.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Any other fields the client sent, stored untouched
    #[serde(flatten)]
    pub extra: Document,
}

/// Body of POST /user
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Document,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateUserResponse {
    pub message: String,
    pub inserted: bool,
    #[serde(rename = "insertedId", skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
}

impl CreateUserResponse {
    pub fn already_exists() -> Self {
        Self {
            message: "User already exists".to_string(),
            inserted: false,
            inserted_id: None,
        }
    }

    pub fn inserted(id: &ObjectId) -> Self {
        Self {
            message: "User inserted".to_string(),
            inserted: true,
            inserted_id: Some(id.to_hex()),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Document,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email,
            name: user.name,
            photo: user.photo,
            extra: user.extra,
        }
    }
}
