// ==================== TASKS ====================

use crate::{
    database::{DeleteOutcome, DocumentStore, InsertOutcome},
    models::{now, CreateTaskRequest, Task, TaskResponse, UpdateTaskRequest, UpdateTaskResponse},
    services::parse_object_id,
    utils::error::AppError,
};

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".to_string())
}

/// Stores the task for an existing user, stamping `createdAt`.
pub async fn create_task(
    store: &dyn DocumentStore,
    request: CreateTaskRequest,
) -> Result<InsertOutcome, AppError> {
    let email = request.email.unwrap_or_default();

    if store.find_user_by_email(&email).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    // Server-owned fields cannot be smuggled in through the free-form part
    let mut extra = request.extra;
    extra.remove("_id");
    extra.remove("createdAt");

    let task = Task {
        id: None,
        email,
        text: request.text,
        created_at: now(),
        extra,
    };

    Ok(store.insert_task(task).await?)
}

/// Replaces the task's text; nothing else on the record changes.
pub async fn update_task(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdateTaskRequest,
) -> Result<UpdateTaskResponse, AppError> {
    let text = request
        .text
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AppError::BadRequest("Text is required".to_string()))?;

    let object_id = parse_object_id(id).ok_or_else(task_not_found)?;

    let result = store.update_task_text(&object_id, &text).await?;
    if result.matched_count == 0 {
        return Err(task_not_found());
    }

    Ok(UpdateTaskResponse {
        message: "Task updated successfully".to_string(),
        result,
    })
}

pub async fn delete_task(store: &dyn DocumentStore, id: &str) -> Result<DeleteOutcome, AppError> {
    let object_id = parse_object_id(id).ok_or_else(task_not_found)?;

    if store.find_task(&object_id).await?.is_none() {
        return Err(task_not_found());
    }

    Ok(store.delete_task(&object_id).await?)
}

pub async fn list_tasks(store: &dyn DocumentStore) -> Result<Vec<TaskResponse>, AppError> {
    let tasks = store.list_tasks().await?;
    Ok(tasks.into_iter().map(TaskResponse::from).collect())
}
