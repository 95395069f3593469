use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::{
    dto::responses::{
        response_data::http_resp, server::healthcheck_response::ServerHealthcheckResponse,
    },
    init::state::ServerState,
    util::time::{duration_formatter::format_duration, now::tokio_now},
};

#[utoipa::path(
    get,
    path = "/api/healthcheck/server",
    tag = "server",
    responses(
        (status = 200, description = "Server is healthy", body = ServerHealthcheckResponse)
    )
)]
pub async fn healthcheck(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let start = tokio_now();

    http_resp::<ServerHealthcheckResponse, ()>(
        ServerHealthcheckResponse {
            app_name_version: state.get_app_name_version(),
            server_uptime: format_duration(state.get_uptime()),
            responses_handled: state.get_responses_handled(),
            deployment_environment: state.get_deployment_environment().as_str(),
        },
        (),
        start,
    )
}
