use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{
    DeleteOutcome, DocumentStore, InsertOutcome, StoreError, StoreResult, UpdateOutcome,
};
use crate::models::{Comment, Task, User};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    tasks: Vec<Task>,
    comments: Vec<Comment>,
}

/// Process-local store with the same observable behaviour as `MongoStore`.
///
/// Records keep insertion order, which is what listings return unless a
/// sort is part of the contract (comments).
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn inserted(id: ObjectId) -> InsertOutcome {
    InsertOutcome {
        acknowledged: true,
        inserted_id: id,
    }
}

fn remove_by_id<T>(
    records: &mut Vec<T>,
    id: &ObjectId,
    id_of: impl Fn(&T) -> Option<ObjectId>,
) -> DeleteOutcome {
    let before = records.len();
    if let Some(pos) = records.iter().position(|r| id_of(r).as_ref() == Some(id)) {
        records.remove(pos);
    }

    DeleteOutcome {
        acknowledged: true,
        deleted_count: (before - records.len()) as u64,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let data = self.inner.read().await;
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, mut user: User) -> StoreResult<InsertOutcome> {
        // Check and insert under one write lock, like a unique index would
        let mut data = self.inner.write().await;
        if data.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateKey(format!("email: {}", user.email)));
        }

        let id = user.id.unwrap_or_else(ObjectId::new);
        user.id = Some(id);
        data.users.push(user);
        Ok(inserted(id))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn insert_task(&self, mut task: Task) -> StoreResult<InsertOutcome> {
        let id = task.id.unwrap_or_else(ObjectId::new);
        task.id = Some(id);
        self.inner.write().await.tasks.push(task);
        Ok(inserted(id))
    }

    async fn find_task(&self, id: &ObjectId) -> StoreResult<Option<Task>> {
        let data = self.inner.read().await;
        Ok(data.tasks.iter().find(|t| t.id.as_ref() == Some(id)).cloned())
    }

    async fn update_task_text(&self, id: &ObjectId, text: &str) -> StoreResult<UpdateOutcome> {
        let mut data = self.inner.write().await;
        let outcome = match data.tasks.iter_mut().find(|t| t.id.as_ref() == Some(id)) {
            Some(task) => {
                let modified = task.text != text;
                task.text = text.to_string();
                UpdateOutcome {
                    acknowledged: true,
                    matched_count: 1,
                    modified_count: u64::from(modified),
                }
            }
            None => UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
            },
        };
        Ok(outcome)
    }

    async fn delete_task(&self, id: &ObjectId) -> StoreResult<DeleteOutcome> {
        let mut data = self.inner.write().await;
        Ok(remove_by_id(&mut data.tasks, id, |t| t.id))
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.inner.read().await.tasks.clone())
    }

    async fn insert_comment(&self, mut comment: Comment) -> StoreResult<InsertOutcome> {
        let id = comment.id.unwrap_or_else(ObjectId::new);
        comment.id = Some(id);
        self.inner.write().await.comments.push(comment);
        Ok(inserted(id))
    }

    async fn find_comment(&self, id: &ObjectId) -> StoreResult<Option<Comment>> {
        let data = self.inner.read().await;
        Ok(data.comments.iter().find(|c| c.id.as_ref() == Some(id)).cloned())
    }

    async fn delete_comment(&self, id: &ObjectId) -> StoreResult<DeleteOutcome> {
        let mut data = self.inner.write().await;
        Ok(remove_by_id(&mut data.comments, id, |c| c.id))
    }

    async fn list_comments(&self, task_id: Option<&str>) -> StoreResult<Vec<Comment>> {
        let data = self.inner.read().await;

        // Newest insertion first, then a stable sort keeps that order for equal timestamps
        let mut comments: Vec<Comment> = data
            .comments
            .iter()
            .rev()
            .filter(|c| task_id.map_or(true, |id| c.task_id == id))
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(comments)
    }
}
