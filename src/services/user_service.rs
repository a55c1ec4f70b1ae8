// ==================== USERS ====================

use crate::{
    database::{DocumentStore, StoreError},
    models::{CreateUserRequest, CreateUserResponse, User, UserResponse},
    utils::error::AppError,
};

/// Inserts the user unless one with the same email already exists.
///
/// An existing email is not an error: the caller gets `inserted: false`
/// and nothing is written.
pub async fn create_user(
    store: &dyn DocumentStore,
    request: CreateUserRequest,
) -> Result<CreateUserResponse, AppError> {
    let email = request
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Email is required".to_string()))?;

    if store.find_user_by_email(&email).await?.is_some() {
        log::info!("ℹ️  User {} already exists", email);
        return Ok(CreateUserResponse::already_exists());
    }

    let mut extra = request.extra;
    extra.remove("_id");

    let user = User {
        id: None,
        email,
        name: request.name,
        photo: request.photo,
        extra,
    };

    match store.insert_user(user).await {
        Ok(outcome) => Ok(CreateUserResponse::inserted(&outcome.inserted_id)),
        // Lost the race against a concurrent insert of the same email
        Err(StoreError::DuplicateKey(_)) => Ok(CreateUserResponse::already_exists()),
        Err(e) => Err(e.into()),
    }
}

pub async fn list_users(store: &dyn DocumentStore) -> Result<Vec<UserResponse>, AppError> {
    let users = store.list_users().await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{
        DeleteOutcome, InsertOutcome, MemoryStore, StoreResult, UpdateOutcome,
    };
    use crate::models::{Comment, Task};
    use async_trait::async_trait;
    use mongodb::bson::{doc, oid::ObjectId, Document};

    /// Answers every email lookup with "no such user", as a reader would
    /// that ran just before a concurrent insert of the same email
    struct StaleLookup(MemoryStore);

    #[async_trait]
    impl DocumentStore for StaleLookup {
        async fn ping(&self) -> StoreResult<()> {
            self.0.ping().await
        }
        async fn find_user_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
            Ok(None)
        }
        async fn insert_user(&self, user: User) -> StoreResult<InsertOutcome> {
            self.0.insert_user(user).await
        }
        async fn list_users(&self) -> StoreResult<Vec<User>> {
            self.0.list_users().await
        }
        async fn insert_task(&self, task: Task) -> StoreResult<InsertOutcome> {
            self.0.insert_task(task).await
        }
        async fn find_task(&self, id: &ObjectId) -> StoreResult<Option<Task>> {
            self.0.find_task(id).await
        }
        async fn update_task_text(&self, id: &ObjectId, text: &str) -> StoreResult<UpdateOutcome> {
            self.0.update_task_text(id, text).await
        }
        async fn delete_task(&self, id: &ObjectId) -> StoreResult<DeleteOutcome> {
            self.0.delete_task(id).await
        }
        async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
            self.0.list_tasks().await
        }
        async fn insert_comment(&self, comment: Comment) -> StoreResult<InsertOutcome> {
            self.0.insert_comment(comment).await
        }
        async fn find_comment(&self, id: &ObjectId) -> StoreResult<Option<Comment>> {
            self.0.find_comment(id).await
        }
        async fn delete_comment(&self, id: &ObjectId) -> StoreResult<DeleteOutcome> {
            self.0.delete_comment(id).await
        }
        async fn list_comments(&self, task_id: Option<&str>) -> StoreResult<Vec<Comment>> {
            self.0.list_comments(task_id).await
        }
    }

    fn request(email: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            email: email.map(str::to_string),
            name: Some("Ann".into()),
            photo: Some("https://img.example/ann.png".into()),
            extra: doc! { "role": "admin" },
        }
    }

    #[tokio::test]
    async fn test_create_user_inserts_once() {
        let store = MemoryStore::new();

        let first = create_user(&store, request(Some("a@x.com"))).await.unwrap();
        assert!(first.inserted);
        assert!(first.inserted_id.is_some());

        let second = create_user(&store, request(Some("a@x.com"))).await.unwrap();
        assert!(!second.inserted);
        assert_eq!(second.message, "User already exists");
        assert!(second.inserted_id.is_none());

        let users = list_users(&store).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].extra.get_str("role").unwrap(), "admin");
    }

    #[tokio::test]
    async fn test_create_user_requires_email() {
        let store = MemoryStore::new();

        for email in [None, Some(""), Some("  ")] {
            let err = create_user(&store, request(email)).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
        assert!(list_users(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_client_supplied_id_is_ignored() {
        let store = MemoryStore::new();
        let mut req = request(Some("a@x.com"));
        req.extra = doc! { "_id": "mine" };

        let created = create_user(&store, req).await.unwrap();
        let users = list_users(&store).await.unwrap();
        assert_eq!(Some(users[0].id.clone()), created.inserted_id);
        assert_eq!(users[0].extra, Document::new());
    }

    #[tokio::test]
    async fn test_duplicate_key_on_insert_reports_already_exists() {
        let store = StaleLookup(MemoryStore::new());

        let first = create_user(&store, request(Some("a@x.com"))).await.unwrap();
        assert!(first.inserted);

        // The lookup misses, so the unique constraint on insert has to catch it
        let second = create_user(&store, request(Some("a@x.com"))).await.unwrap();
        assert!(!second.inserted);
        assert_eq!(second.message, "User already exists");
        assert!(second.inserted_id.is_none());

        assert_eq!(list_users(&store).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_signups_store_one_user() {
        let store = std::sync::Arc::new(MemoryStore::new());

        let (a, b) = tokio::join!(
            {
                let store = store.clone();
                tokio::spawn(async move {
                    create_user(&*store, request(Some("a@x.com"))).await
                })
            },
            {
                let store = store.clone();
                tokio::spawn(async move {
                    create_user(&*store, request(Some("a@x.com"))).await
                })
            }
        );
        let a = a.unwrap().unwrap();
        let b = b.unwrap().unwrap();

        assert_eq!(u8::from(a.inserted) + u8::from(b.inserted), 1);
        assert_eq!(list_users(&*store).await.unwrap().len(), 1);
    }
}
