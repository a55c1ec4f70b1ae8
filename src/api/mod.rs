pub mod comments;
pub mod health;
pub mod metrics;
pub mod swagger;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::utils::error::AppError;

/// Malformed or non-JSON bodies get the same `{ "message" }` shape as every
/// other client error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("⚠️  Rejected body on {} {}: {}", req.method(), req.path(), err);
        AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
    })
}

/// Registers every route. The store is not referenced here: handlers pull
/// `web::Data<dyn DocumentStore>` from whatever the `App` was given.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(health::index))
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Users
        .route("/user", web::post().to(users::create_user))
        .route("/users", web::get().to(users::list_users))
        // Tasks
        .service(
            web::resource("/task")
                .route(web::post().to(tasks::create_task))
                .route(web::get().to(tasks::list_tasks)),
        )
        .service(
            web::resource("/task/{id}")
                .route(web::put().to(tasks::update_task))
                .route(web::delete().to(tasks::delete_task)),
        )
        // Comments
        .service(
            web::resource("/comments")
                .route(web::post().to(comments::create_comment))
                .route(web::get().to(comments::list_comments)),
        )
        .route("/comments/{id}", web::delete().to(comments::delete_comment));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{
        DeleteOutcome, DocumentStore, InsertOutcome, MemoryStore, StoreError, StoreResult,
        UpdateOutcome,
    };
    use crate::models::{Comment, Task, User};
    use actix_web::{body::to_bytes, http::StatusCode, test, App};
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// Store whose every call fails, standing in for a lost database
    struct UnreachableStore;

    fn down<T>() -> StoreResult<T> {
        Err(StoreError::Database("server selection timeout".to_string()))
    }

    #[async_trait]
    impl DocumentStore for UnreachableStore {
        async fn ping(&self) -> StoreResult<()> {
            down()
        }
        async fn find_user_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
            down()
        }
        async fn insert_user(&self, _user: User) -> StoreResult<InsertOutcome> {
            down()
        }
        async fn list_users(&self) -> StoreResult<Vec<User>> {
            down()
        }
        async fn insert_task(&self, _task: Task) -> StoreResult<InsertOutcome> {
            down()
        }
        async fn find_task(&self, _id: &ObjectId) -> StoreResult<Option<Task>> {
            down()
        }
        async fn update_task_text(&self, _id: &ObjectId, _text: &str) -> StoreResult<UpdateOutcome> {
            down()
        }
        async fn delete_task(&self, _id: &ObjectId) -> StoreResult<DeleteOutcome> {
            down()
        }
        async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
            down()
        }
        async fn insert_comment(&self, _comment: Comment) -> StoreResult<InsertOutcome> {
            down()
        }
        async fn find_comment(&self, _id: &ObjectId) -> StoreResult<Option<Comment>> {
            down()
        }
        async fn delete_comment(&self, _id: &ObjectId) -> StoreResult<DeleteOutcome> {
            down()
        }
        async fn list_comments(&self, _task_id: Option<&str>) -> StoreResult<Vec<Comment>> {
            down()
        }
    }

    #[actix_web::test]
    async fn test_root_banner() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "Server is running");

        let req = test::TestRequest::get().uri("/health").to_request();
        let health: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["database"], "connected");
    }

    #[actix_web::test]
    async fn test_store_failures_surface_as_500() {
        let store: Arc<dyn DocumentStore> = Arc::new(UnreachableStore);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store.clone()))
                .configure(configure),
        )
        .await;

        for uri in ["/task", "/comments", "/users"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);

            let bytes = to_bytes(resp.into_body()).await.unwrap_or_default();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["message"], "Internal server error");
            assert!(body["error"].as_str().unwrap().contains("server selection timeout"));
        }

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_task_and_comment_lifecycle() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store.clone()))
                .configure(configure),
        )
        .await;

        // user
        let req = test::TestRequest::post()
            .uri("/user")
            .set_json(json!({ "email": "a@x.com", "name": "Ann", "photo": "https://img/ann.png" }))
            .to_request();
        let user: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user["inserted"], true);

        // task
        let req = test::TestRequest::post()
            .uri("/task")
            .set_json(json!({ "email": "a@x.com", "text": "buy milk" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let created: Value = test::read_body_json(resp).await;
        let task_id = created["insertedId"].as_str().unwrap().to_string();

        // edit
        let req = test::TestRequest::put()
            .uri(&format!("/task/{}", task_id))
            .set_json(json!({ "text": "buy bread" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["message"], "Task updated successfully");
        assert_eq!(updated["result"]["matchedCount"], 1);

        let req = test::TestRequest::get().uri("/task").to_request();
        let tasks: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tasks[0]["text"], "buy bread");

        // comment
        let req = test::TestRequest::post()
            .uri("/comments")
            .set_json(json!({ "taskId": task_id, "text": "done", "email": "a@x.com" }))
            .to_request();
        let comment: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(comment["comment"]["name"], "Ann");
        assert_eq!(comment["comment"]["photo"], "https://img/ann.png");
        assert_eq!(comment["comment"]["taskId"], task_id.as_str());
        let comment_id = comment["insertedId"].as_str().unwrap().to_string();

        let req = test::TestRequest::delete()
            .uri(&format!("/comments/{}", comment_id))
            .to_request();
        let deleted: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(deleted["result"]["deletedCount"], 1);

        let req = test::TestRequest::get()
            .uri(&format!("/comments?taskId={}", task_id))
            .to_request();
        let comments: Value = test::call_and_read_body_json(&app, req).await;
        assert!(comments.as_array().unwrap().is_empty());

        // delete task
        let req = test::TestRequest::delete()
            .uri(&format!("/task/{}", task_id))
            .to_request();
        let removed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(removed["acknowledged"], true);
        assert_eq!(removed["deletedCount"], 1);

        let req = test::TestRequest::get().uri("/task").to_request();
        let tasks: Value = test::call_and_read_body_json(&app, req).await;
        assert!(tasks.as_array().unwrap().is_empty());
    }
}
