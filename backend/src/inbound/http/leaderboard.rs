//! Leaderboard handler.

use actix_web::{get, web};

use crate::domain::LeaderboardEntry;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// The ranked leaderboard, recomputed from stored eaten-counts on each call.
#[utoipa::path(
    get,
    path = "/leaderboard",
    responses(
        (status = 200, description = "Ranked entries, highest eaten-count first", body = [LeaderboardEntry]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorResponse)
    ),
    tags = ["economy"],
    operation_id = "getLeaderboard"
)]
#[get("/leaderboard")]
pub async fn get_leaderboard(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LeaderboardEntry>>> {
    Ok(web::Json(state.directory.leaderboard().await?))
}
