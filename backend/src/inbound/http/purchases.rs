//! Purchase handlers.
//!
//! ```text
//! POST /buy_pizza            {"user_id":1,"items":[{"slice_id":10,"quantity":2}]}
//! GET  /user_history/{user_id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{HistoryEntry, LineItem, PurchaseRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /buy_pizza`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BuyRequest {
    /// Buying user.
    pub user_id: i64,
    /// Requested lines; must be non-empty with positive quantities.
    pub items: Vec<LineItem>,
}

/// Buy one or more slices, debiting the coin balance.
#[utoipa::path(
    post,
    path = "/buy_pizza",
    request_body = BuyRequest,
    responses(
        (status = 201, description = "Purchase recorded"),
        (status = 400, description = "Invalid request or not enough coins", body = crate::inbound::http::error::ErrorResponse),
        (status = 404, description = "Unknown user or slice", body = crate::inbound::http::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorResponse)
    ),
    tags = ["economy"],
    operation_id = "buyPizza"
)]
#[post("/buy_pizza")]
pub async fn buy_pizza(
    state: web::Data<HttpState>,
    payload: web::Json<BuyRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    state
        .purchases
        .purchase(PurchaseRequest {
            user_id: payload.user_id,
            items: payload.items,
        })
        .await?;
    Ok(HttpResponse::Created().json(json!({ "message": "Purchase successful" })))
}

/// Purchase history for one user, including consumption timestamps.
#[utoipa::path(
    get,
    path = "/user_history/{user_id}",
    params(("user_id" = i64, Path, description = "User whose history to fetch")),
    responses(
        (status = 200, description = "Purchase records, oldest first", body = [HistoryEntry]),
        (status = 500, description = "Internal server error", body = crate::inbound::http::error::ErrorResponse)
    ),
    tags = ["economy"],
    operation_id = "getUserHistory"
)]
#[get("/user_history/{user_id}")]
pub async fn user_history(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<HistoryEntry>>> {
    Ok(web::Json(
        state.directory.user_history(path.into_inner()).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_support;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::Value;

    #[actix_web::test]
    async fn purchases_debit_coins_and_report_success() {
        let store = test_support::store();
        test_support::seed_user(&store, 1, "Ada", 100, 0);
        test_support::seed_slice(&store, 10, "Margherita", 30);
        let app = actix_test::init_service(
            App::new()
                .app_data(test_support::state(&store))
                .service(buy_pizza),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/buy_pizza")
            .set_json(json!({ "user_id": 1, "items": [{ "slice_id": 10, "quantity": 2 }] }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], json!("Purchase successful"));
        assert_eq!(store.rows("users")[0]["coins"], json!(40));
        assert_eq!(store.rows("user_slices").len(), 2);
    }

    #[actix_web::test]
    async fn an_unaffordable_purchase_is_a_bad_request() {
        let store = test_support::store();
        test_support::seed_user(&store, 1, "Ben", 10, 0);
        test_support::seed_slice(&store, 10, "Margherita", 30);
        let app = actix_test::init_service(
            App::new()
                .app_data(test_support::state(&store))
                .service(buy_pizza),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/buy_pizza")
            .set_json(json!({ "user_id": 1, "items": [{ "slice_id": 10, "quantity": 1 }] }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"], json!("Not enough coins"));
        assert_eq!(store.rows("users")[0]["coins"], json!(10));
    }

    #[actix_web::test]
    async fn an_unknown_user_is_not_found() {
        let store = test_support::store();
        test_support::seed_slice(&store, 10, "Margherita", 30);
        let app = actix_test::init_service(
            App::new()
                .app_data(test_support::state(&store))
                .service(buy_pizza),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/buy_pizza")
            .set_json(json!({ "user_id": 99, "items": [{ "slice_id": 10, "quantity": 1 }] }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn history_carries_slice_names_and_timestamps() {
        let store = test_support::store();
        test_support::seed_user(&store, 1, "Ada", 100, 0);
        test_support::seed_slice(&store, 10, "Margherita", 30);
        test_support::seed_record(&store, 7, 1, 10);
        let app = actix_test::init_service(
            App::new()
                .app_data(test_support::state(&store))
                .service(user_history),
        )
        .await;

        let body: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/user_history/1")
                .to_request(),
        )
        .await;

        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["id"], json!(7));
        assert_eq!(body[0]["sliceName"], json!("Margherita"));
        assert!(body[0]["eaten_at"].is_null());
    }
}
