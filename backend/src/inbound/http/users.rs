//! User directory handlers.
//!
//! ```text
//! GET    /users
//! POST   /users          {"name":"Ada","age":31,"gender":"female"}
//! DELETE /users/{user_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::{NewUser, UserWithHistory};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// List every user with their purchase history, ordered by name.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users with purchase summaries", body = [UserWithHistory]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserWithHistory>>> {
    Ok(web::Json(state.directory.list_users().await?))
}

/// Register a user; the starting balance and a zero eaten-count are applied
/// server-side.
#[utoipa::path(
    post,
    path = "/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = crate::domain::User),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<NewUser>,
) -> ApiResult<HttpResponse> {
    let user = state.directory.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Delete a user by id.
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User to delete")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = crate::inbound::http::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.directory.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
