use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request, Response},
    middleware::Next,
};
use chrono::Utc;
use tokio::time::Instant;
use tracing::{Level, error};

use crate::init::state::ServerState;

const ERROR_HEADERS: [&str; 5] = [
    "x-error-log-level",
    "x-error-status-code",
    "x-error-code",
    "x-error-message",
    "x-error-detail",
];

// by default, debug and below not logged at all; hence why
macro_rules! log_codeerror {
    ($level:expr, $kind:expr, response.method = $method:expr, response.path = $path:expr, response.client_ip = $client_ip:expr, response.status = $status:expr, response.status_code = $status_code:expr, response.duration = $duration:expr, response.error_code = $error_code:expr, response.message = $message:expr, response.detail = $detail:expr) => {
        match $level {
            Level::ERROR => tracing::error!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status = %$status, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::WARN => tracing::warn!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status = %$status, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::INFO => tracing::info!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status = %$status, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::DEBUG => tracing::debug!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status = %$status, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::TRACE => tracing::trace!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status = %$status, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
        }
    };
}

pub async fn log_middleware(
    State(state): State<Arc<ServerState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();
    let now = Utc::now(); // earliest possible timestamp of server-received request

    state.add_responses_handled();

    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    // ConnectInfo is only present when served with connect info, not under in-process tests
    let peer_addr: Option<SocketAddr> = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let client_ip: Option<IpAddr> = match request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
    {
        Some(val) => match val.trim().parse() {
            Ok(ip) => Some(ip),
            Err(e) => {
                error!(error = ?e, client_ip = val, "Could not parse IP address into IpAddr");
                None
            }
        },
        None => peer_addr.map(|addr| addr.ip()),
    };

    tracing::info!(kind = %"RECV", method = %method, path = %path, client_ip = ?client_ip);
    request.extensions_mut().insert(now);

    let mut response = next.run(request).await;
    let duration = start.elapsed();

    if response.status().is_success() {
        tracing::info!(kind = %"RESP", method = %method, path = %path, client_ip = ?client_ip, status_code = %response.status().as_u16(), duration = ?duration);
    } else {
        let headers = response.headers_mut();

        let log_level = header_value_to_str(headers.get("x-error-log-level")).unwrap_or("INFO");
        let status_code = header_value_to_str(headers.get("x-error-status-code")).unwrap_or("");
        let error_code = header_value_to_str(headers.get("x-error-code")).unwrap_or("");
        let message = header_value_to_str(headers.get("x-error-message")).unwrap_or("");
        let detail = header_value_to_str(headers.get("x-error-detail")).unwrap_or("");

        log_codeerror!(
            log_level.parse::<Level>().unwrap_or(Level::ERROR),
            "ERSP",
            response.method = method,
            response.path = path,
            response.client_ip = client_ip,
            response.status = "ERROR",
            response.status_code = status_code,
            response.duration = format!("{:?}", duration),
            response.error_code = error_code,
            response.message = message,
            response.detail = detail
        );

        for name in ERROR_HEADERS {
            headers.remove(name);
        }
    }

    response
}

fn header_value_to_str(value: Option<&HeaderValue>) -> Option<&str> {
    value.and_then(|v| v.to_str().ok())
}
