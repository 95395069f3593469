use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
};
use mime_guess::from_path;
use rust_embed::Embed;

use crate::errors::code_error::{CodeError, HandlerResponse, code_err};

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// Serves files embedded from `static/` under `/static/*`.
pub async fn static_asset_handler(Path(path): Path<String>) -> HandlerResponse<Response> {
    let path = path.trim_start_matches('/');
    let content =
        StaticAssets::get(path).ok_or_else(|| code_err(CodeError::ASSET_NOT_FOUND, path))?;
    let mime = from_path(path).first_or_octet_stream();

    Ok((
        [(header::CONTENT_TYPE, mime.as_ref().to_owned())],
        content.data,
    )
        .into_response())
}
