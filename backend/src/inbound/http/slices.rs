//! Pizza slice catalogue handler.

use actix_web::{get, web};

use crate::domain::PizzaSlice;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// List every purchasable slice.
#[utoipa::path(
    get,
    path = "/pizza_slices",
    responses(
        (status = 200, description = "Available pizza slices", body = [PizzaSlice]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorResponse)
    ),
    tags = ["economy"],
    operation_id = "listPizzaSlices"
)]
#[get("/pizza_slices")]
pub async fn list_slices(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PizzaSlice>>> {
    Ok(web::Json(state.directory.list_slices().await?))
}
