use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};

use super::to_utc;

/// Task document (collection "tasks")
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Task {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owner email; checked against "users" only when the task is created
    pub email: String,

    #[serde(default)]
    pub text: String,

    /// Assigned by the server, stored as a BSON Date
    #[serde(rename = "createdAt", default = "crate::models::epoch")]
    pub created_at: BsonDateTime,

    #[serde(flatten)]
    pub extra: Document,
}

/// Body of POST /task
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Document,
}

/// Body of PUT /task/{id}
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpdateTaskResponse {
    pub message: String,
    pub result: crate::database::UpdateOutcome,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TaskResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Document,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        TaskResponse {
            id: task.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: task.email,
            text: task.text,
            created_at: to_utc(task.created_at),
            extra: task.extra,
        }
    }
}
