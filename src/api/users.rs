use actix_web::{web, HttpResponse};

use crate::{
    database::DocumentStore,
    models::{CreateUserRequest, CreateUserResponse, UserResponse},
    services::user_service,
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User inserted, or already present (inserted = false)", body = CreateUserResponse),
        (status = 400, description = "Email missing")
    )
)]
pub async fn create_user(
    store: web::Data<dyn DocumentStore>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "👤 POST /user - email: {}",
        request.email.as_deref().unwrap_or("N/A")
    );

    let response = user_service::create_user(store.get_ref(), request.into_inner())
        .await
        .map_err(|e| e.log("Create user"))?;

    if let Some(id) = &response.inserted_id {
        log::info!("✅ User inserted: {}", id);
    }

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users");

    let users = user_service::list_users(store.get_ref())
        .await
        .map_err(|e| e.log("List users"))?;

    Ok(HttpResponse::Ok().json(users))
}
