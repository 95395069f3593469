use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{
        fallback::fallback_handler,
        server::healthcheck::healthcheck,
        signup::signup::signup_handler,
        site::{static_assets::static_asset_handler, welcome::welcome_handler},
    },
    init::state::ServerState,
};

use super::middleware::logging::log_middleware;

pub fn build_router(state: Arc<ServerState>) -> Router {
    let log_middleware = from_fn_with_state(state.clone(), log_middleware);
    let compression_middleware = CompressionLayer::new().gzip(true);

    let app_router = Router::new()
        .route("/", get(welcome_handler))
        .route("/signup", post(signup_handler))
        .route("/api/healthcheck/server", get(healthcheck))
        .route("/static/{*path}", get(static_asset_handler))
        .fallback(fallback_handler)
        .layer(compression_middleware)
        .layer(log_middleware)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Router::new()
        .merge(app_router)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
}
