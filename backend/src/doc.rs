//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API. It registers every HTTP endpoint from the inbound layer
//! plus the request and response schemas they reference. Debug builds serve
//! the generated document at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::domain::{
    ErrorCode, HistoryEntry, HistorySummary, LeaderboardEntry, LineItem, NewUser, PizzaSlice,
    User, UserWithHistory,
};
use crate::inbound::http::consumption::LogRequest;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::purchases::BuyRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pizza economy backend API",
        description = "REST interface for the coin economy, pizza purchases, \
                       consumption logging, and the leaderboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::slices::list_slices,
        crate::inbound::http::leaderboard::get_leaderboard,
        crate::inbound::http::purchases::buy_pizza,
        crate::inbound::http::purchases::user_history,
        crate::inbound::http::consumption::log_pizza,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        UserWithHistory,
        NewUser,
        PizzaSlice,
        LeaderboardEntry,
        HistoryEntry,
        HistorySummary,
        LineItem,
        BuyRequest,
        LogRequest,
        ErrorCode,
        ErrorResponse,
    )),
    tags(
        (name = "users", description = "User directory and administration"),
        (name = "economy", description = "Purchases, consumption, and the leaderboard"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
