use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task Manager API",
        version = "1.0.0",
        description = "Users, tasks and task comments backed by MongoDB.\n\n**Notes:**\n- No authentication\n- Comments carry a snapshot of the author's name and photo taken when the comment is created\n- Deleting a task does not delete its comments"
    ),
    paths(
        // Health & Metrics
        crate::api::health::index,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,

        // Tasks
        crate::api::tasks::create_task,
        crate::api::tasks::update_task,
        crate::api::tasks::delete_task,
        crate::api::tasks::list_tasks,

        // Comments
        crate::api::comments::create_comment,
        crate::api::comments::list_comments,
        crate::api::comments::delete_comment,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,

            crate::models::CreateUserRequest,
            crate::models::CreateUserResponse,
            crate::models::UserResponse,

            crate::models::CreateTaskRequest,
            crate::models::UpdateTaskRequest,
            crate::models::UpdateTaskResponse,
            crate::models::TaskResponse,

            crate::models::CreateCommentRequest,
            crate::models::CreateCommentResponse,
            crate::models::CommentResponse,
            crate::models::DeleteCommentResponse,

            crate::database::InsertOutcome,
            crate::database::UpdateOutcome,
            crate::database::DeleteOutcome,
        )
    ),
    tags(
        (name = "Health", description = "Liveness banner, health check and request counters."),
        (name = "Users", description = "Create users (idempotent per email) and list them."),
        (name = "Tasks", description = "Create, edit, delete and list tasks. A task's owner must be an existing user."),
        (name = "Comments", description = "Attach comments to tasks, list them newest first, delete them."),
    )
)]
pub struct ApiDoc;
