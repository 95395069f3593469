use std::sync::Arc;

use axum::{
    Form, Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{
    domain::signup::{
        signup_notifier::publish_best_effort,
        signup_record::SignupRecord,
        signup_store::StoreError,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    post,
    path = "/signup",
    tag = "signup",
    request_body(
        content = std::collections::HashMap<String, String>,
        content_type = "application/x-www-form-urlencoded",
        description = "Signup form fields; `email` is required and must be unique"
    ),
    responses(
        (status = 201, description = "Signup stored; echoes the submitted fields", body = std::collections::HashMap<String, String>),
        (status = 400, description = "Form has no email field", body = CodeErrorResp),
        (status = 409, description = "Email already signed up, or the store refused the write; empty body"),
        (status = 503, description = "Signup store unavailable", body = CodeErrorResp)
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<ServerState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> HandlerResponse<Response> {
    let start = tokio_now();

    let record = SignupRecord::from_form_fields(fields)
        .map_err(|e| code_err(CodeError::EMAIL_REQUIRED, e))?;

    match state.signup_store().insert(&record).await {
        Ok(()) => (),
        Err(e @ StoreError::AlreadyExists { .. }) => {
            info!(email = %record.email(), error = %e, "Duplicate signup refused");
            return Ok(conflict_response());
        }
        Err(e @ StoreError::Rejected { .. }) => {
            warn!(email = %record.email(), error = %e, "Signup store rejected the write");
            return Ok(conflict_response());
        }
        Err(e @ StoreError::Unavailable { .. }) => {
            return Err(code_err(CodeError::SIGNUP_STORE_UNAVAILABLE, e));
        }
    }

    // The signup is durable from here on; notification failures are logged, not returned.
    publish_best_effort(state.signup_notifier(), &record).await;

    info!(
        email = %record.email(),
        fields = record.len(),
        elapsed = ?start.elapsed(),
        "Signup created"
    );

    Ok((StatusCode::CREATED, Json(record)).into_response())
}

fn conflict_response() -> Response {
    (
        StatusCode::CONFLICT,
        [(header::CONTENT_TYPE, "application/json")],
        "",
    )
        .into_response()
}
