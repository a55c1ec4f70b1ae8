// ==================== COMMENTS ====================

use crate::{
    database::DocumentStore,
    models::{
        now, Comment, CommentResponse, CreateCommentRequest, CreateCommentResponse,
        DeleteCommentResponse,
    },
    services::parse_object_id,
    utils::error::AppError,
};

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validates the comment against its author and task, then stores it with
/// a snapshot of the author's name and photo.
pub async fn create_comment(
    store: &dyn DocumentStore,
    request: CreateCommentRequest,
) -> Result<CreateCommentResponse, AppError> {
    // 1. Required fields
    let (task_id, text, email) = match (
        required(request.task_id),
        required(request.text),
        required(request.email),
    ) {
        (Some(task_id), Some(text), Some(email)) => {
            (task_id.trim().to_string(), text, email)
        }
        _ => {
            return Err(AppError::BadRequest(
                "taskId, text and email are required".to_string(),
            ))
        }
    };

    // 2. Author
    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // 3. Task
    let task_exists = match parse_object_id(&task_id) {
        Some(object_id) => store.find_task(&object_id).await?.is_some(),
        None => false,
    };
    if !task_exists {
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    let mut comment = Comment {
        id: None,
        task_id,
        text,
        email,
        name: user.name,
        photo: user.photo,
        created_at: now(),
    };

    let outcome = store.insert_comment(comment.clone()).await?;
    comment.id = Some(outcome.inserted_id);

    Ok(CreateCommentResponse {
        message: "Comment added successfully".to_string(),
        inserted_id: outcome.inserted_id.to_hex(),
        comment: CommentResponse::from(comment),
    })
}

/// Comments newest first. A missing or empty `task_id` lists every comment.
pub async fn list_comments(
    store: &dyn DocumentStore,
    task_id: Option<&str>,
) -> Result<Vec<CommentResponse>, AppError> {
    let task_id = task_id.filter(|id| !id.is_empty());
    let comments = store.list_comments(task_id).await?;
    Ok(comments.into_iter().map(CommentResponse::from).collect())
}

pub async fn delete_comment(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<DeleteCommentResponse, AppError> {
    let not_found = || AppError::NotFound("Comment not found".to_string());
    let object_id = parse_object_id(id).ok_or_else(not_found)?;

    if store.find_comment(&object_id).await?.is_none() {
        return Err(not_found());
    }

    let result = store.delete_comment(&object_id).await?;

    Ok(DeleteCommentResponse {
        message: "Comment deleted successfully".to_string(),
        result,
    })
}
