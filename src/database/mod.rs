// ==================== DOCUMENT STORE ====================
// Persistence contract used by the services. One implementation talks to
// MongoDB, the other keeps everything in process memory.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::{Comment, Task, User};

pub const USERS: &str = "users";
pub const TASKS: &str = "tasks";
pub const COMMENTS: &str = "comments";

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Database(String),
    /// A unique index rejected the write
    DuplicateKey(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(msg) => write!(f, "Database error: {}", msg),
            StoreError::DuplicateKey(msg) => write!(f, "Duplicate key: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of a single-document insert
#[derive(Debug, Clone, Serialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    #[serde(serialize_with = "serialize_hex")]
    #[schema(value_type = String)]
    pub inserted_id: ObjectId,
}

fn serialize_hex<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.to_hex())
}

/// Result of a single-document update
#[derive(Debug, Clone, Serialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Result of a single-document delete
#[derive(Debug, Clone, Serialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Collection-level operations the service needs from its backing store.
///
/// Lookups that take an `ObjectId` expect the caller to have parsed the
/// client-supplied id already; an id that does not parse cannot match.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Round-trip to the store, used by the health endpoint
    async fn ping(&self) -> StoreResult<()>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Fails with `StoreError::DuplicateKey` when the email is already taken
    async fn insert_user(&self, user: User) -> StoreResult<InsertOutcome>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn insert_task(&self, task: Task) -> StoreResult<InsertOutcome>;

    async fn find_task(&self, id: &ObjectId) -> StoreResult<Option<Task>>;

    /// Sets `text` on the matching task, leaving every other field alone
    async fn update_task_text(&self, id: &ObjectId, text: &str) -> StoreResult<UpdateOutcome>;

    async fn delete_task(&self, id: &ObjectId) -> StoreResult<DeleteOutcome>;

    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    async fn insert_comment(&self, comment: Comment) -> StoreResult<InsertOutcome>;

    async fn find_comment(&self, id: &ObjectId) -> StoreResult<Option<Comment>>;

    async fn delete_comment(&self, id: &ObjectId) -> StoreResult<DeleteOutcome>;

    /// Comments newest first, optionally restricted to one task
    async fn list_comments(&self, task_id: Option<&str>) -> StoreResult<Vec<Comment>>;
}
