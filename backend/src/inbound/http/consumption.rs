//! Consumption logging handler.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::ConsumeRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /log_pizza`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LogRequest {
    /// Purchase record to mark as eaten.
    pub id: i64,
    /// User whose eaten-count is incremented.
    pub user_id: i64,
}

/// Mark a purchased slice as eaten and bump the user's eaten-count.
#[utoipa::path(
    post,
    path = "/log_pizza",
    request_body = LogRequest,
    responses(
        (status = 200, description = "Slice logged as eaten"),
        (status = 400, description = "No pending record with that id", body = crate::inbound::http::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::inbound::http::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorResponse)
    ),
    tags = ["economy"],
    operation_id = "logPizza"
)]
#[post("/log_pizza")]
pub async fn log_pizza(
    state: web::Data<HttpState>,
    payload: web::Json<LogRequest>,
) -> ApiResult<HttpResponse> {
    state
        .consumption
        .log_eaten(ConsumeRequest {
            record_id: payload.id,
            user_id: payload.user_id,
        })
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Pizza slice logged as eaten!" })))
}
