use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::to_utc;

/// Comment document (collection "comments").
///
/// `name` and `photo` are copied from the author's user record when the
/// comment is created and are never refreshed afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub task_id: String,
    pub text: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default = "crate::models::epoch")]
    pub created_at: BsonDateTime,
}

/// Body of POST /comments
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Query string of GET /comments
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CommentsQuery {
    /// Only return comments attached to this task
    pub task_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub task_id: String,
    pub text: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        CommentResponse {
            id: comment.id.map(|id| id.to_hex()).unwrap_or_default(),
            task_id: comment.task_id,
            text: comment.text,
            email: comment.email,
            name: comment.name,
            photo: comment.photo,
            created_at: to_utc(comment.created_at),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreateCommentResponse {
    pub message: String,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
    pub comment: CommentResponse,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteCommentResponse {
    pub message: String,
    pub result: crate::database::DeleteOutcome,
}
