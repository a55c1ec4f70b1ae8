use actix_web::{web, HttpResponse};

use crate::{
    database::{DeleteOutcome, DocumentStore, InsertOutcome},
    models::{CreateTaskRequest, TaskResponse, UpdateTaskRequest, UpdateTaskResponse},
    services::task_service,
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/task",
    tag = "Tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 200, description = "Task stored", body = InsertOutcome),
        (status = 404, description = "Owner email does not belong to any user")
    )
)]
pub async fn create_task(
    store: web::Data<dyn DocumentStore>,
    request: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "📝 POST /task - owner: {}",
        request.email.as_deref().unwrap_or("N/A")
    );

    let outcome = task_service::create_task(store.get_ref(), request.into_inner())
        .await
        .map_err(|e| e.log("Create task"))?;

    log::info!("✅ Task created: {}", outcome.inserted_id);
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    put,
    path = "/task/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Text replaced", body = UpdateTaskResponse),
        (status = 400, description = "Text missing or empty"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update_task(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
    request: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PUT /task/{}", id);

    let response = task_service::update_task(store.get_ref(), &id, request.into_inner())
        .await
        .map_err(|e| e.log("Update task"))?;

    log::info!("✅ Task {} updated", id);
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/task/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task removed", body = DeleteOutcome),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /task/{}", id);

    let outcome = task_service::delete_task(store.get_ref(), &id)
        .await
        .map_err(|e| e.log("Delete task"))?;

    log::info!("✅ Task {} deleted", id);
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    get,
    path = "/task",
    tag = "Tasks",
    responses(
        (status = 200, description = "All tasks", body = [TaskResponse]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_tasks(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /task");

    let tasks = task_service::list_tasks(store.get_ref())
        .await
        .map_err(|e| e.log("List tasks"))?;

    Ok(HttpResponse::Ok().json(tasks))
}
