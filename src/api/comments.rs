use actix_web::{web, HttpResponse};

use crate::{
    database::DocumentStore,
    models::{
        CommentResponse, CommentsQuery, CreateCommentRequest, CreateCommentResponse,
        DeleteCommentResponse,
    },
    services::comment_service,
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/comments",
    tag = "Comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment stored with the author's name and photo", body = CreateCommentResponse),
        (status = 400, description = "taskId, text or email missing"),
        (status = 404, description = "User not found / Task not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_comment(
    store: web::Data<dyn DocumentStore>,
    request: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "💬 POST /comments - task: {}, author: {}",
        request.task_id.as_deref().unwrap_or("N/A"),
        request.email.as_deref().unwrap_or("N/A")
    );

    let response = comment_service::create_comment(store.get_ref(), request.into_inner())
        .await
        .map_err(|e| e.log("Create comment"))?;

    log::info!("✅ Comment added: {}", response.inserted_id);
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/comments",
    tag = "Comments",
    params(CommentsQuery),
    responses(
        (status = 200, description = "Comments, newest first", body = [CommentResponse]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_comments(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<CommentsQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "📋 GET /comments - task: {}",
        query.task_id.as_deref().unwrap_or("all")
    );

    let comments = comment_service::list_comments(store.get_ref(), query.task_id.as_deref())
        .await
        .map_err(|e| e.log("List comments"))?;

    log::info!("✅ Listed {} comments", comments.len());
    Ok(HttpResponse::Ok().json(comments))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "Comments",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment removed", body = DeleteCommentResponse),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /comments/{}", id);

    let response = comment_service::delete_comment(store.get_ref(), &id)
        .await
        .map_err(|e| e.log("Delete comment"))?;

    log::info!("✅ Comment {} deleted", id);
    Ok(HttpResponse::Ok().json(response))
}
