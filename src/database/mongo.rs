use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::results::InsertOneResult;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;
use std::time::Duration;

use super::{
    DeleteOutcome, DocumentStore, InsertOutcome, StoreError, StoreResult, UpdateOutcome,
    COMMENTS, TASKS, USERS,
};
use crate::models::{Comment, Task, User};

const DUPLICATE_KEY_CODE: i32 = 11000;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                StoreError::DuplicateKey(write_error.message.clone())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// MongoDB-backed document store. Cloning shares the driver's connection pool.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        db.run_command(doc! { "ping": 1 }).await?;
        log::info!("✅ Pinged deployment, connected to database '{}'", db_name);

        let store = Self { db };
        store.ensure_indexes().await;

        Ok(store)
    }

    /// Creates the indexes the queries rely on. Failures are logged and
    /// tolerated, e.g. a unique index cannot be built over existing duplicates.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let users_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.raw(USERS).create_index(users_email).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create users(email) index: {}", e),
        }

        let tasks_email = IndexModel::builder().keys(doc! { "email": 1 }).build();

        match self.raw(TASKS).create_index(tasks_email).await {
            Ok(_) => log::info!("   ✅ Index created: tasks(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let comments_task = IndexModel::builder()
            .keys(doc! { "taskId": 1, "createdAt": -1 })
            .build();

        match self.raw(COMMENTS).create_index(comments_task).await {
            Ok(_) => log::info!("   ✅ Index created: comments(taskId, createdAt)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    fn raw(&self, name: &str) -> Collection<Document> {
        self.collection(name)
    }
}

fn insert_outcome(result: InsertOneResult) -> StoreResult<InsertOutcome> {
    match result.inserted_id {
        Bson::ObjectId(inserted_id) => Ok(InsertOutcome {
            acknowledged: true,
            inserted_id,
        }),
        other => Err(StoreError::Database(format!(
            "Unexpected inserted id type: {}",
            other
        ))),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = self
            .collection::<User>(USERS)
            .find_one(doc! { "email": email })
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: User) -> StoreResult<InsertOutcome> {
        let result = self.collection::<User>(USERS).insert_one(&user).await?;
        insert_outcome(result)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let cursor = self.collection::<User>(USERS).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_task(&self, task: Task) -> StoreResult<InsertOutcome> {
        let result = self.collection::<Task>(TASKS).insert_one(&task).await?;
        insert_outcome(result)
    }

    async fn find_task(&self, id: &ObjectId) -> StoreResult<Option<Task>> {
        let task = self
            .collection::<Task>(TASKS)
            .find_one(doc! { "_id": *id })
            .await?;
        Ok(task)
    }

    async fn update_task_text(&self, id: &ObjectId, text: &str) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection::<Task>(TASKS)
            .update_one(doc! { "_id": *id }, doc! { "$set": { "text": text } })
            .await?;

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_task(&self, id: &ObjectId) -> StoreResult<DeleteOutcome> {
        let result = self
            .collection::<Task>(TASKS)
            .delete_one(doc! { "_id": *id })
            .await?;

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let cursor = self.collection::<Task>(TASKS).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_comment(&self, comment: Comment) -> StoreResult<InsertOutcome> {
        let result = self
            .collection::<Comment>(COMMENTS)
            .insert_one(&comment)
            .await?;
        insert_outcome(result)
    }

    async fn find_comment(&self, id: &ObjectId) -> StoreResult<Option<Comment>> {
        let comment = self
            .collection::<Comment>(COMMENTS)
            .find_one(doc! { "_id": *id })
            .await?;
        Ok(comment)
    }

    async fn delete_comment(&self, id: &ObjectId) -> StoreResult<DeleteOutcome> {
        let result = self
            .collection::<Comment>(COMMENTS)
            .delete_one(doc! { "_id": *id })
            .await?;

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn list_comments(&self, task_id: Option<&str>) -> StoreResult<Vec<Comment>> {
        let filter = match task_id {
            Some(task_id) => doc! { "taskId": task_id },
            None => doc! {},
        };

        let cursor = self
            .collection::<Comment>(COMMENTS)
            .find(filter)
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
