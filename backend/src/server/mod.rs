//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::ports::{LeaderboardNotifier, RecordStore};
use backend::inbound::http::consumption::log_pizza;
use backend::inbound::http::error::json_config;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::leaderboard::get_leaderboard;
use backend::inbound::http::purchases::{buy_pizza, user_history};
use backend::inbound::http::slices::list_slices;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{create_user, delete_user, list_users};
use backend::inbound::ws;
use backend::inbound::ws::state::WsState;
use backend::outbound::notify::UpdateHub;
use backend::outbound::store::{HttpRecordStore, MemoryRecordStore};

/// Pick the record store adapter the configuration asks for. Without a
/// remote store URL the process keeps all records in memory, which is only
/// suitable for development.
fn build_record_store(config: &ServerConfig) -> std::io::Result<Arc<dyn RecordStore>> {
    match &config.store {
        Some(settings) => {
            info!(url = %settings.url, "using remote record store");
            let store = HttpRecordStore::new(settings.clone())
                .map_err(|e| std::io::Error::other(format!("record store client: {e}")))?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("STORE_URL not set; records are kept in memory and lost on restart");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    ws_state: web::Data<WsState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        ws_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(ws_state)
        .app_data(json_config())
        .service(list_users)
        .service(create_user)
        .service(delete_user)
        .service(list_slices)
        .service(get_leaderboard)
        .service(buy_pizza)
        .service(user_history)
        .service(log_pizza)
        .service(ws::ws_entry)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.route(
        "/api-docs/openapi.json",
        web::get().to(|| async { web::Json(ApiDoc::openapi()) }),
    );
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server over the configured record store.
///
/// # Errors
/// Propagates [`std::io::Error`] when the store client cannot be built or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let store = build_record_store(&config)?;
    let hub = Arc::new(UpdateHub::new());
    let notifier: Arc<dyn LeaderboardNotifier> = Arc::clone(&hub) as Arc<dyn LeaderboardNotifier>;
    let http_state = web::Data::new(HttpState::new(store, notifier));
    let ws_state = web::Data::new(WsState::new(hub));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            ws_state: ws_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
